//! Decides which relations each read must materialize, and reads them in a
//! number of round trips that does not grow with the result set.

use std::collections::HashMap;

use jiff::civil::Date;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
    sea_query::{Expr, Query},
};
use serde::Deserialize;

use crate::{
    entities::{actor, cinema_hall, genre, movie, movie_actor, movie_genre, movie_session},
    error::{AppError, AppResult},
    representation::{Operation, ResourceType},
};

/// A relation a read may need before projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link {
    Genres,
    Actors,
    Movie,
    CinemaHall,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadPlan {
    /// Joined into the primary fetch.
    pub joined: &'static [Link],
    /// Preloaded for the whole result set, one round trip per relation.
    pub batched: &'static [Link],
}

impl LoadPlan {
    pub const NONE: LoadPlan = LoadPlan { joined: &[], batched: &[] };

    pub fn joins(&self, link: Link) -> bool {
        self.joined.contains(&link)
    }

    pub fn batches(&self, link: Link) -> bool {
        self.batched.contains(&link)
    }

    /// Upper bound on statements issued to read any number of records.
    pub fn max_round_trips(&self) -> usize {
        1 + self.batched.len()
    }
}

const MOVIE_RELATIONS: LoadPlan =
    LoadPlan { joined: &[], batched: &[Link::Genres, Link::Actors] };
const SESSION_JOINED: LoadPlan =
    LoadPlan { joined: &[Link::Movie, Link::CinemaHall], batched: &[] };
const SESSION_DETAIL: LoadPlan = LoadPlan {
    joined: &[Link::Movie, Link::CinemaHall],
    batched: &[Link::Genres, Link::Actors],
};

pub const fn shape_query(resource: ResourceType, operation: Operation) -> LoadPlan {
    match (resource, operation) {
        (ResourceType::Movie, Operation::List | Operation::Retrieve) => MOVIE_RELATIONS,
        (ResourceType::Movie, Operation::Write) => LoadPlan::NONE,
        (ResourceType::MovieSession, Operation::Retrieve) => SESSION_DETAIL,
        (ResourceType::MovieSession, Operation::List | Operation::Write) => SESSION_JOINED,
        (
            ResourceType::Genre
            | ResourceType::Actor
            | ResourceType::CinemaHall
            | ResourceType::Order
            | ResourceType::Ticket,
            _,
        ) => LoadPlan::NONE,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedMovie {
    pub movie: movie::Model,
    pub genres: Vec<genre::Model>,
    pub actors: Vec<actor::Model>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedSession {
    pub session: movie_session::Model,
    pub movie: movie::Model,
    pub cinema_hall: cinema_hall::Model,
    /// Genres of `movie`; empty unless the plan batches them.
    pub genres: Vec<genre::Model>,
    /// Actors of `movie`; empty unless the plan batches them.
    pub actors: Vec<actor::Model>,
}

/// Movie list filters, as supplied on the query string.
#[derive(Debug, Default, Deserialize)]
pub struct MovieFilter {
    pub title: Option<String>,
    /// Comma-separated genre ids; matches movies with any of them.
    pub genres: Option<String>,
    /// Comma-separated actor ids; matches movies with any of them.
    pub actors: Option<String>,
}

impl MovieFilter {
    pub fn condition(&self) -> AppResult<Condition> {
        let mut condition = Condition::all();
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            condition = condition.add(movie::Column::Title.contains(title));
        }
        if let Some(raw) = &self.genres {
            let ids = parse_ids("genres", raw)?;
            condition = condition.add(
                movie::Column::Id.in_subquery(
                    Query::select()
                        .column(movie_genre::Column::MovieId)
                        .from(movie_genre::Entity)
                        .and_where(movie_genre::Column::GenreId.is_in(ids))
                        .to_owned(),
                ),
            );
        }
        if let Some(raw) = &self.actors {
            let ids = parse_ids("actors", raw)?;
            condition = condition.add(
                movie::Column::Id.in_subquery(
                    Query::select()
                        .column(movie_actor::Column::MovieId)
                        .from(movie_actor::Entity)
                        .and_where(movie_actor::Column::ActorId.is_in(ids))
                        .to_owned(),
                ),
            );
        }
        Ok(condition)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionFilter {
    /// Sessions whose show time falls on this day.
    pub date: Option<Date>,
    pub movie: Option<i32>,
}

impl SessionFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(date) = self.date {
            condition = condition.add(movie_session::Column::ShowTime.starts_with(format!("{date}T")));
        }
        if let Some(movie) = self.movie {
            condition = condition.add(movie_session::Column::MovieId.eq(movie));
        }
        condition
    }
}

fn parse_ids(field: &str, raw: &str) -> AppResult<Vec<i32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| AppError::BadRequest(format!("{field}: `{s}` is not a valid id")))
        })
        .collect()
}

/// Reads movies from `select` (ordered by id), then preloads whatever
/// relations `plan` batches.
pub async fn load_movies<C: ConnectionTrait>(
    db: &C,
    select: Select<movie::Entity>,
    plan: &LoadPlan,
) -> AppResult<Vec<LoadedMovie>> {
    let movies = select.order_by_asc(movie::Column::Id).all(db).await?;
    let ids: Vec<i32> = movies.iter().map(|m| m.id).collect();

    let (mut genres, mut actors) = futures::try_join!(
        async {
            if plan.batches(Link::Genres) { genres_by_movie(db, &ids).await } else { Ok(HashMap::new()) }
        },
        async {
            if plan.batches(Link::Actors) { actors_by_movie(db, &ids).await } else { Ok(HashMap::new()) }
        },
    )?;

    Ok(movies
        .into_iter()
        .map(|movie| LoadedMovie {
            genres: genres.remove(&movie.id).unwrap_or_default(),
            actors: actors.remove(&movie.id).unwrap_or_default(),
            movie,
        })
        .collect())
}

#[derive(Debug, FromQueryResult)]
struct SessionRow {
    id: i32,
    show_time: String,
    movie_id: i32,
    cinema_hall_id: i32,
    movie_title: String,
    movie_description: String,
    movie_duration: i32,
    cinema_hall_name: String,
    cinema_hall_rows: i32,
    cinema_hall_seats_in_row: i32,
}

impl SessionRow {
    fn into_parts(self) -> (movie_session::Model, movie::Model, cinema_hall::Model) {
        (
            movie_session::Model {
                id: self.id,
                show_time: self.show_time,
                movie_id: self.movie_id,
                cinema_hall_id: self.cinema_hall_id,
            },
            movie::Model {
                id: self.movie_id,
                title: self.movie_title,
                description: self.movie_description,
                duration: self.movie_duration,
            },
            cinema_hall::Model {
                id: self.cinema_hall_id,
                name: self.cinema_hall_name,
                rows: self.cinema_hall_rows,
                seats_in_row: self.cinema_hall_seats_in_row,
            },
        )
    }
}

/// Reads sessions matching `condition` with their movie and cinema hall
/// joined into the same statement, ordered by show time.
pub async fn load_sessions<C: ConnectionTrait>(
    db: &C,
    condition: Condition,
    plan: &LoadPlan,
) -> AppResult<Vec<LoadedSession>> {
    debug_assert!(plan.joins(Link::Movie) && plan.joins(Link::CinemaHall));

    let rows = movie_session::Entity::find()
        .select_only()
        .columns([
            movie_session::Column::Id,
            movie_session::Column::ShowTime,
            movie_session::Column::MovieId,
            movie_session::Column::CinemaHallId,
        ])
        .column_as(movie::Column::Title, "movie_title")
        .column_as(movie::Column::Description, "movie_description")
        .column_as(movie::Column::Duration, "movie_duration")
        .column_as(cinema_hall::Column::Name, "cinema_hall_name")
        .column_as(cinema_hall::Column::Rows, "cinema_hall_rows")
        .column_as(cinema_hall::Column::SeatsInRow, "cinema_hall_seats_in_row")
        .join(JoinType::InnerJoin, movie_session::Relation::Movie.def())
        .join(JoinType::InnerJoin, movie_session::Relation::CinemaHall.def())
        .filter(condition)
        .order_by_asc(movie_session::Column::ShowTime)
        .order_by_asc(movie_session::Column::Id)
        .into_model::<SessionRow>()
        .all(db)
        .await?;

    let mut movie_ids: Vec<i32> = rows.iter().map(|r| r.movie_id).collect();
    movie_ids.sort_unstable();
    movie_ids.dedup();

    let (genres, actors) = futures::try_join!(
        async {
            if plan.batches(Link::Genres) {
                genres_by_movie(db, &movie_ids).await
            } else {
                Ok(HashMap::new())
            }
        },
        async {
            if plan.batches(Link::Actors) {
                actors_by_movie(db, &movie_ids).await
            } else {
                Ok(HashMap::new())
            }
        },
    )?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let (session, movie, cinema_hall) = row.into_parts();
            LoadedSession {
                genres: genres.get(&movie.id).cloned().unwrap_or_default(),
                actors: actors.get(&movie.id).cloned().unwrap_or_default(),
                session,
                movie,
                cinema_hall,
            }
        })
        .collect())
}

/// One statement: junction rows for `movie_ids` joined to their genres.
async fn genres_by_movie<C: ConnectionTrait>(
    db: &C,
    movie_ids: &[i32],
) -> AppResult<HashMap<i32, Vec<genre::Model>>> {
    let mut by_movie: HashMap<i32, Vec<genre::Model>> = HashMap::new();
    if movie_ids.is_empty() {
        return Ok(by_movie);
    }

    let rows = movie_genre::Entity::find()
        .filter(movie_genre::Column::MovieId.is_in(movie_ids.iter().copied()))
        .find_also_related(genre::Entity)
        .order_by_asc(genre::Column::Id)
        .all(db)
        .await?;

    for (link, genre) in rows {
        if let Some(genre) = genre {
            by_movie.entry(link.movie_id).or_default().push(genre);
        }
    }
    Ok(by_movie)
}

/// One statement: junction rows for `movie_ids` joined to their actors.
async fn actors_by_movie<C: ConnectionTrait>(
    db: &C,
    movie_ids: &[i32],
) -> AppResult<HashMap<i32, Vec<actor::Model>>> {
    let mut by_movie: HashMap<i32, Vec<actor::Model>> = HashMap::new();
    if movie_ids.is_empty() {
        return Ok(by_movie);
    }

    let rows = movie_actor::Entity::find()
        .filter(movie_actor::Column::MovieId.is_in(movie_ids.iter().copied()))
        .find_also_related(actor::Entity)
        .order_by_asc(actor::Column::Id)
        .all(db)
        .await?;

    for (link, actor) in rows {
        if let Some(actor) = actor {
            by_movie.entry(link.movie_id).or_default().push(actor);
        }
    }
    Ok(by_movie)
}

/// Ids in `requested` that are absent from `found`.
pub fn missing_ids(requested: &[i32], found: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let found: Vec<i32> = found.into_iter().collect();
    requested.iter().copied().filter(|id| !found.contains(id)).collect()
}

/// Whether a row of `E` has `column == id`.
pub async fn exists<E, C>(db: &C, column: E::Column, id: i32) -> AppResult<bool>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let count = E::find()
        .select_only()
        .expr(Expr::col(column).count())
        .filter(column.eq(id))
        .into_tuple::<i64>()
        .one(db)
        .await?;
    Ok(count.unwrap_or(0) > 0)
}
