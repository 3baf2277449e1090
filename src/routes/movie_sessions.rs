use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, Set};
use tracing::{debug, info};

use crate::{
    AppState,
    entities::{cinema_hall, movie, movie_session},
    error::{AppError, AppResult, ValidationErrors},
    models::{MovieSessionInput, MovieSessionPayload, MovieSessionRepresentation},
    query::{self, LoadedSession, SessionFilter},
    representation::{MovieSessionShape, Operation, ResourceType},
};

const RESOURCE: ResourceType = ResourceType::MovieSession;

pub async fn list(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<SessionFilter>, QueryRejection>,
) -> AppResult<Json<Vec<MovieSessionRepresentation>>> {
    let Query(filter) = filter?;
    let shape = MovieSessionShape::select(Operation::List);
    let plan = query::shape_query(RESOURCE, Operation::List);

    let sessions = query::load_sessions(&state.db, filter.condition(), &plan).await?;
    debug!(count = sessions.len(), ?shape, "listed movie sessions");

    let body = sessions
        .into_iter()
        .map(|s| MovieSessionRepresentation::project(shape, s))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(body))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<MovieSessionRepresentation>> {
    let Path(id) = path?;
    let shape = MovieSessionShape::select(Operation::Retrieve);
    let session = load_one(&state.db, id, Operation::Retrieve).await?;
    Ok(Json(MovieSessionRepresentation::project(shape, session)?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MovieSessionPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MovieSessionRepresentation>)> {
    let input = payload?.0.validate()?;
    check_references(&state.db, &input).await?;

    let session = movie_session::ActiveModel {
        show_time: Set(input.show_time.to_string()),
        movie_id: Set(input.movie),
        cinema_hall_id: Set(input.cinema_hall),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    info!(id = session.id, movie = session.movie_id, "created movie session");

    let shape = MovieSessionShape::select(Operation::Write);
    let written = load_one(&state.db, session.id, Operation::Write).await?;
    Ok((StatusCode::CREATED, Json(MovieSessionRepresentation::project(shape, written)?)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MovieSessionPayload>, JsonRejection>,
) -> AppResult<Json<MovieSessionRepresentation>> {
    let Path(id) = path?;
    let existing = super::find::<movie_session::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn partial_update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MovieSessionPayload>, JsonRejection>,
) -> AppResult<Json<MovieSessionRepresentation>> {
    let Path(id) = path?;
    let existing = super::find::<movie_session::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.merged_with(&existing)?.validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    super::destroy::<movie_session::Entity, _>(&state.db, RESOURCE, id).await
}

async fn save(
    state: &AppState,
    existing: movie_session::Model,
    input: MovieSessionInput,
) -> AppResult<MovieSessionRepresentation> {
    check_references(&state.db, &input).await?;

    let id = existing.id;
    let mut active: movie_session::ActiveModel = existing.into();
    active.show_time = Set(input.show_time.to_string());
    active.movie_id = Set(input.movie);
    active.cinema_hall_id = Set(input.cinema_hall);
    active.update(&state.db).await?;
    info!(id, "updated movie session");

    let shape = MovieSessionShape::select(Operation::Write);
    let written = load_one(&state.db, id, Operation::Write).await?;
    MovieSessionRepresentation::project(shape, written)
}

/// Reads one session through the plan for `operation`.
async fn load_one<C: ConnectionTrait>(
    db: &C,
    id: i32,
    operation: Operation,
) -> AppResult<LoadedSession> {
    let plan = query::shape_query(RESOURCE, operation);
    let condition = Condition::all().add(movie_session::Column::Id.eq(id));
    query::load_sessions(db, condition, &plan)
        .await?
        .pop()
        .ok_or(AppError::not_found(RESOURCE, id))
}

async fn check_references<C: ConnectionTrait>(db: &C, input: &MovieSessionInput) -> AppResult<()> {
    let mut errors = ValidationErrors::default();
    if !query::exists::<movie::Entity, _>(db, movie::Column::Id, input.movie).await? {
        errors.invalid_pk("movie", input.movie);
    }
    if !query::exists::<cinema_hall::Entity, _>(db, cinema_hall::Column::Id, input.cinema_hall)
        .await?
    {
        errors.invalid_pk("cinema_hall", input.cinema_hall);
    }
    errors.finish()
}
