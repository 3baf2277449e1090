use jiff::{Timestamp, civil::DateTime};
use serde::{Deserialize, Serialize};

use crate::{
    entities::{actor, cinema_hall, genre, movie, movie_session, order, ticket},
    error::{AppResult, ValidationErrors},
    query::{LoadedMovie, LoadedSession},
    representation::{MovieSessionShape, MovieShape},
};

const MAX_NAME_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenreView {
    pub id: i32,
    pub name: String,
}

impl From<&genre::Model> for GenreView {
    fn from(genre: &genre::Model) -> Self {
        Self { id: genre.id, name: genre.name.clone() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActorView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<&actor::Model> for ActorView {
    fn from(actor: &actor::Model) -> Self {
        Self {
            id: actor.id,
            first_name: actor.first_name.clone(),
            last_name: actor.last_name.clone(),
            full_name: actor.full_name(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MovieListView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
}

impl MovieListView {
    pub fn new(movie: movie::Model, genres: &[genre::Model], actors: &[actor::Model]) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            duration: movie.duration,
            genres: genres.iter().map(|g| g.name.clone()).collect(),
            actors: actors.iter().map(actor::Model::full_name).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MovieDetailView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<GenreView>,
    pub actors: Vec<ActorView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MovieView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub genres: Vec<i32>,
    pub actors: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MovieRepresentation {
    Compact(MovieListView),
    Expanded(MovieDetailView),
    Writable(MovieView),
}

impl MovieRepresentation {
    pub fn project(shape: MovieShape, loaded: LoadedMovie) -> Self {
        let LoadedMovie { movie, genres, actors } = loaded;
        match shape {
            MovieShape::Compact => Self::Compact(MovieListView::new(movie, &genres, &actors)),
            MovieShape::Expanded => Self::Expanded(MovieDetailView {
                id: movie.id,
                title: movie.title,
                description: movie.description,
                duration: movie.duration,
                genres: genres.iter().map(GenreView::from).collect(),
                actors: actors.iter().map(ActorView::from).collect(),
            }),
            MovieShape::Writable => Self::Writable(MovieView {
                id: movie.id,
                title: movie.title,
                description: movie.description,
                duration: movie.duration,
                genres: genres.iter().map(|g| g.id).collect(),
                actors: actors.iter().map(|a| a.id).collect(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CinemaHallView {
    pub id: i32,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub capacity: i32,
}

impl From<&cinema_hall::Model> for CinemaHallView {
    fn from(hall: &cinema_hall::Model) -> Self {
        Self {
            id: hall.id,
            name: hall.name.clone(),
            rows: hall.rows,
            seats_in_row: hall.seats_in_row,
            capacity: hall.capacity(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieSessionListView {
    pub id: i32,
    pub show_time: DateTime,
    pub movie_title: String,
    pub cinema_hall_name: String,
    pub cinema_hall_capacity: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieSessionDetailView {
    pub id: i32,
    pub show_time: DateTime,
    pub movie: MovieListView,
    pub cinema_hall: CinemaHallView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieSessionView {
    pub id: i32,
    pub show_time: DateTime,
    pub movie: i32,
    pub cinema_hall: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MovieSessionRepresentation {
    Flat(MovieSessionListView),
    Nested(MovieSessionDetailView),
    Writable(MovieSessionView),
}

impl MovieSessionRepresentation {
    pub fn project(shape: MovieSessionShape, loaded: LoadedSession) -> AppResult<Self> {
        let LoadedSession { session, movie, cinema_hall, genres, actors } = loaded;
        let show_time: DateTime = session.show_time.parse()?;
        Ok(match shape {
            MovieSessionShape::Flat => Self::Flat(MovieSessionListView {
                id: session.id,
                show_time,
                movie_title: movie.title,
                cinema_hall_name: cinema_hall.name.clone(),
                cinema_hall_capacity: cinema_hall.capacity(),
            }),
            MovieSessionShape::Nested => Self::Nested(MovieSessionDetailView {
                id: session.id,
                show_time,
                movie: MovieListView::new(movie, &genres, &actors),
                cinema_hall: CinemaHallView::from(&cinema_hall),
            }),
            MovieSessionShape::Writable => Self::Writable(MovieSessionView {
                id: session.id,
                show_time,
                movie: movie.id,
                cinema_hall: cinema_hall.id,
            }),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderView {
    pub id: i32,
    pub created_at: Timestamp,
    pub user: i32,
}

impl TryFrom<&order::Model> for OrderView {
    type Error = jiff::Error;

    fn try_from(order: &order::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: order.id,
            created_at: Timestamp::from_second(order.created_at)?,
            user: order.user_id,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TicketView {
    pub id: i32,
    pub movie_session: i32,
    pub order: i32,
    pub row: i32,
    pub seat: i32,
}

impl From<&ticket::Model> for TicketView {
    fn from(ticket: &ticket::Model) -> Self {
        Self {
            id: ticket.id,
            movie_session: ticket.movie_session_id,
            order: ticket.order_id,
            row: ticket.row,
            seat: ticket.seat,
        }
    }
}

// Write payloads. Every field is optional so a missing one surfaces as a
// field error instead of a deserialization failure. Read-only fields
// (`id`, `full_name`, `capacity`, `created_at`) are not declared and are
// ignored when supplied. A partial update fills absent fields from the
// stored record with `merged_with` and then runs the same `validate`.

#[derive(Debug, Default, Deserialize)]
pub struct GenrePayload {
    pub name: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct GenreInput {
    pub name: String,
}

impl GenrePayload {
    pub fn merged_with(self, genre: &genre::Model) -> Self {
        Self { name: self.name.or_else(|| Some(genre.name.clone())) }
    }

    pub fn validate(self) -> Result<GenreInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = char_field(&mut errors, "name", self.name, Some(MAX_NAME_LEN));
        match name {
            Some(name) if errors.is_empty() => Ok(GenreInput { name }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ActorPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ActorInput {
    pub first_name: String,
    pub last_name: String,
}

impl ActorPayload {
    pub fn merged_with(self, actor: &actor::Model) -> Self {
        Self {
            first_name: self.first_name.or_else(|| Some(actor.first_name.clone())),
            last_name: self.last_name.or_else(|| Some(actor.last_name.clone())),
        }
    }

    pub fn validate(self) -> Result<ActorInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let first_name = char_field(&mut errors, "first_name", self.first_name, Some(MAX_NAME_LEN));
        let last_name = char_field(&mut errors, "last_name", self.last_name, Some(MAX_NAME_LEN));
        match (first_name, last_name) {
            (Some(first_name), Some(last_name)) if errors.is_empty() => {
                Ok(ActorInput { first_name, last_name })
            },
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MoviePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub genres: Option<Vec<i32>>,
    pub actors: Option<Vec<i32>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MovieInput {
    pub title: String,
    pub description: String,
    pub duration: i32,
    /// Sorted, without duplicates.
    pub genres: Vec<i32>,
    /// Sorted, without duplicates.
    pub actors: Vec<i32>,
}

impl MoviePayload {
    /// Relation sets left out keep the movie's current members.
    pub fn merged_with(self, current: &LoadedMovie) -> Self {
        Self {
            title: self.title.or_else(|| Some(current.movie.title.clone())),
            description: self.description.or_else(|| Some(current.movie.description.clone())),
            duration: self.duration.or(Some(current.movie.duration)),
            genres: self.genres.or_else(|| Some(current.genres.iter().map(|g| g.id).collect())),
            actors: self.actors.or_else(|| Some(current.actors.iter().map(|a| a.id).collect())),
        }
    }

    pub fn validate(self) -> Result<MovieInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let title = char_field(&mut errors, "title", self.title, Some(MAX_NAME_LEN));
        let description = char_field(&mut errors, "description", self.description, None);
        let duration = positive(&mut errors, "duration", self.duration);
        let genres = errors.required("genres", self.genres).map(unique_ids);
        let actors = errors.required("actors", self.actors).map(unique_ids);
        match (title, description, duration, genres, actors) {
            (Some(title), Some(description), Some(duration), Some(genres), Some(actors))
                if errors.is_empty() =>
            {
                Ok(MovieInput { title, description, duration, genres, actors })
            },
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CinemaHallPayload {
    pub name: Option<String>,
    pub rows: Option<i32>,
    pub seats_in_row: Option<i32>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CinemaHallInput {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

impl CinemaHallPayload {
    pub fn merged_with(self, hall: &cinema_hall::Model) -> Self {
        Self {
            name: self.name.or_else(|| Some(hall.name.clone())),
            rows: self.rows.or(Some(hall.rows)),
            seats_in_row: self.seats_in_row.or(Some(hall.seats_in_row)),
        }
    }

    pub fn validate(self) -> Result<CinemaHallInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = char_field(&mut errors, "name", self.name, Some(MAX_NAME_LEN));
        let rows = positive(&mut errors, "rows", self.rows);
        let seats_in_row = positive(&mut errors, "seats_in_row", self.seats_in_row);
        if let (Some(rows), Some(seats)) = (rows, seats_in_row) {
            if rows.checked_mul(seats).is_none() {
                errors.add("seats_in_row", "Capacity is out of range.");
            }
        }
        match (name, rows, seats_in_row) {
            (Some(name), Some(rows), Some(seats_in_row)) if errors.is_empty() => {
                Ok(CinemaHallInput { name, rows, seats_in_row })
            },
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MovieSessionPayload {
    pub show_time: Option<DateTime>,
    pub movie: Option<i32>,
    pub cinema_hall: Option<i32>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MovieSessionInput {
    pub show_time: DateTime,
    pub movie: i32,
    pub cinema_hall: i32,
}

impl MovieSessionPayload {
    pub fn merged_with(self, session: &movie_session::Model) -> Result<Self, jiff::Error> {
        let show_time = match self.show_time {
            Some(show_time) => show_time,
            None => session.show_time.parse()?,
        };
        Ok(Self {
            show_time: Some(show_time),
            movie: self.movie.or(Some(session.movie_id)),
            cinema_hall: self.cinema_hall.or(Some(session.cinema_hall_id)),
        })
    }

    pub fn validate(self) -> Result<MovieSessionInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let show_time = errors.required("show_time", self.show_time);
        let movie = errors.required("movie", self.movie);
        let cinema_hall = errors.required("cinema_hall", self.cinema_hall);
        match (show_time, movie, cinema_hall) {
            (Some(show_time), Some(movie), Some(cinema_hall)) if errors.is_empty() => {
                Ok(MovieSessionInput { show_time, movie, cinema_hall })
            },
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderPayload {
    pub user: Option<i32>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct OrderInput {
    pub user: i32,
}

impl OrderPayload {
    pub fn merged_with(self, order: &order::Model) -> Self {
        Self { user: self.user.or(Some(order.user_id)) }
    }

    pub fn validate(self) -> Result<OrderInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let user = positive(&mut errors, "user", self.user);
        match user {
            Some(user) if errors.is_empty() => Ok(OrderInput { user }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TicketPayload {
    pub movie_session: Option<i32>,
    pub order: Option<i32>,
    pub row: Option<i32>,
    pub seat: Option<i32>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TicketInput {
    pub movie_session: i32,
    pub order: i32,
    pub row: i32,
    pub seat: i32,
}

impl TicketPayload {
    pub fn merged_with(self, ticket: &ticket::Model) -> Self {
        Self {
            movie_session: self.movie_session.or(Some(ticket.movie_session_id)),
            order: self.order.or(Some(ticket.order_id)),
            row: self.row.or(Some(ticket.row)),
            seat: self.seat.or(Some(ticket.seat)),
        }
    }

    pub fn validate(self) -> Result<TicketInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let movie_session = errors.required("movie_session", self.movie_session);
        let order = errors.required("order", self.order);
        let row = positive(&mut errors, "row", self.row);
        let seat = positive(&mut errors, "seat", self.seat);
        match (movie_session, order, row, seat) {
            (Some(movie_session), Some(order), Some(row), Some(seat)) if errors.is_empty() => {
                Ok(TicketInput { movie_session, order, row, seat })
            },
            _ => Err(errors),
        }
    }
}

fn char_field(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
    max_len: Option<usize>,
) -> Option<String> {
    let value = errors.required(field, value)?.trim().to_string();
    if value.is_empty() {
        errors.add(field, "This field may not be blank.");
        return None;
    }
    if let Some(max) = max_len {
        if value.chars().count() > max {
            errors.add(field, format!("Ensure this field has no more than {max} characters."));
            return None;
        }
    }
    Some(value)
}

fn positive(errors: &mut ValidationErrors, field: &'static str, value: Option<i32>) -> Option<i32> {
    let value = errors.required(field, value)?;
    if value < 1 {
        errors.add(field, "Ensure this value is greater than or equal to 1.");
        return None;
    }
    Some(value)
}

fn unique_ids(mut ids: Vec<i32>) -> Vec<i32> {
    ids.sort_unstable();
    ids.dedup();
    ids
}
