use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::{
    AppState,
    entities::{actor, genre, movie, movie_actor, movie_genre},
    error::{AppError, AppResult, ValidationErrors},
    models::{MovieInput, MoviePayload, MovieRepresentation},
    query::{self, LoadedMovie, MovieFilter},
    representation::{MovieShape, Operation, ResourceType},
};

const RESOURCE: ResourceType = ResourceType::Movie;

pub async fn list(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<MovieFilter>, QueryRejection>,
) -> AppResult<Json<Vec<MovieRepresentation>>> {
    let Query(filter) = filter?;
    let shape = MovieShape::select(Operation::List);
    let plan = query::shape_query(RESOURCE, Operation::List);

    let select = movie::Entity::find().filter(filter.condition()?);
    let movies = query::load_movies(&state.db, select, &plan).await?;
    debug!(count = movies.len(), ?shape, "listed movies");

    Ok(Json(movies.into_iter().map(|m| MovieRepresentation::project(shape, m)).collect()))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<MovieRepresentation>> {
    let Path(id) = path?;
    let shape = MovieShape::select(Operation::Retrieve);
    let movie = load_one(&state.db, id, Operation::Retrieve).await?;
    Ok(Json(MovieRepresentation::project(shape, movie)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MovieRepresentation>)> {
    let input = payload?.0.validate()?;
    let (genres, actors) = resolve_relations(&state.db, &input).await?;

    let txn = state.db.begin().await?;
    let movie = movie::ActiveModel {
        title: Set(input.title),
        description: Set(input.description),
        duration: Set(input.duration),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    link_relations(&txn, movie.id, &input.genres, &input.actors).await?;
    txn.commit().await?;

    info!(id = movie.id, title = %movie.title, "created movie");
    let shape = MovieShape::select(Operation::Write);
    let loaded = LoadedMovie { movie, genres, actors };
    Ok((StatusCode::CREATED, Json(MovieRepresentation::project(shape, loaded))))
}

/// Replaces scalar fields and both relation sets.
pub async fn update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> AppResult<Json<MovieRepresentation>> {
    let Path(id) = path?;
    let existing = super::find::<movie::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.validate()?;
    save(&state, existing, input, Relink::BOTH).await.map(Json)
}

/// Replaces the supplied fields. A relation set is replaced only when the
/// payload names it.
pub async fn partial_update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MoviePayload>, JsonRejection>,
) -> AppResult<Json<MovieRepresentation>> {
    let Path(id) = path?;
    let current = load_one(&state.db, id, Operation::Retrieve).await?;
    let payload = payload?.0;
    let relink = Relink { genres: payload.genres.is_some(), actors: payload.actors.is_some() };
    let input = payload.merged_with(&current).validate()?;
    save(&state, current.movie, input, relink).await.map(Json)
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    super::destroy::<movie::Entity, _>(&state.db, RESOURCE, id).await
}

/// Which junction sets a write rewrites.
#[derive(Clone, Copy, Debug)]
struct Relink {
    genres: bool,
    actors: bool,
}

impl Relink {
    const BOTH: Self = Self { genres: true, actors: true };
}

async fn load_one<C: ConnectionTrait>(db: &C, id: i32, operation: Operation) -> AppResult<LoadedMovie> {
    let plan = query::shape_query(RESOURCE, operation);
    query::load_movies(db, movie::Entity::find_by_id(id), &plan)
        .await?
        .pop()
        .ok_or(AppError::not_found(RESOURCE, id))
}

async fn save(
    state: &AppState,
    existing: movie::Model,
    input: MovieInput,
    relink: Relink,
) -> AppResult<MovieRepresentation> {
    let (genres, actors) = resolve_relations(&state.db, &input).await?;
    let id = existing.id;

    let txn = state.db.begin().await?;
    let mut active: movie::ActiveModel = existing.into();
    active.title = Set(input.title);
    active.description = Set(input.description);
    active.duration = Set(input.duration);
    let movie = active.update(&txn).await?;

    if relink.genres {
        movie_genre::Entity::delete_many()
            .filter(movie_genre::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
    }
    if relink.actors {
        movie_actor::Entity::delete_many()
            .filter(movie_actor::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
    }
    let genre_ids: &[i32] = if relink.genres { &input.genres } else { &[] };
    let actor_ids: &[i32] = if relink.actors { &input.actors } else { &[] };
    link_relations(&txn, id, genre_ids, actor_ids).await?;
    txn.commit().await?;

    info!(id, ?relink, "updated movie");
    let shape = MovieShape::select(Operation::Write);
    Ok(MovieRepresentation::project(shape, LoadedMovie { movie, genres, actors }))
}

/// Loads the referenced genres and actors, failing validation for any id
/// that does not exist.
async fn resolve_relations<C: ConnectionTrait>(
    db: &C,
    input: &MovieInput,
) -> AppResult<(Vec<genre::Model>, Vec<actor::Model>)> {
    let genres = if input.genres.is_empty() {
        Vec::new()
    } else {
        genre::Entity::find()
            .filter(genre::Column::Id.is_in(input.genres.iter().copied()))
            .order_by_asc(genre::Column::Id)
            .all(db)
            .await?
    };
    let actors = if input.actors.is_empty() {
        Vec::new()
    } else {
        actor::Entity::find()
            .filter(actor::Column::Id.is_in(input.actors.iter().copied()))
            .order_by_asc(actor::Column::Id)
            .all(db)
            .await?
    };

    let mut errors = ValidationErrors::default();
    for id in query::missing_ids(&input.genres, genres.iter().map(|g| g.id)) {
        errors.invalid_pk("genres", id);
    }
    for id in query::missing_ids(&input.actors, actors.iter().map(|a| a.id)) {
        errors.invalid_pk("actors", id);
    }
    errors.finish()?;
    Ok((genres, actors))
}

async fn link_relations<C: ConnectionTrait>(
    db: &C,
    movie_id: i32,
    genres: &[i32],
    actors: &[i32],
) -> AppResult<()> {
    if !genres.is_empty() {
        movie_genre::Entity::insert_many(genres.iter().map(|&genre_id| movie_genre::ActiveModel {
            movie_id: Set(movie_id),
            genre_id: Set(genre_id),
        }))
        .exec_without_returning(db)
        .await?;
    }
    if !actors.is_empty() {
        movie_actor::Entity::insert_many(actors.iter().map(|&actor_id| movie_actor::ActiveModel {
            movie_id: Set(movie_id),
            actor_id: Set(actor_id),
        }))
        .exec_without_returning(db)
        .await?;
    }
    Ok(())
}
