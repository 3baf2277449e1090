use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::{debug, info};

use crate::{
    AppState,
    entities::cinema_hall,
    error::AppResult,
    models::{CinemaHallInput, CinemaHallPayload, CinemaHallView},
    representation::ResourceType,
};

const RESOURCE: ResourceType = ResourceType::CinemaHall;

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<CinemaHallView>>> {
    let halls =
        cinema_hall::Entity::find().order_by_asc(cinema_hall::Column::Id).all(&state.db).await?;
    debug!(count = halls.len(), "listed cinema halls");
    Ok(Json(halls.iter().map(CinemaHallView::from).collect()))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<CinemaHallView>> {
    let Path(id) = path?;
    let hall = super::find::<cinema_hall::Entity, _>(&state.db, RESOURCE, id).await?;
    Ok(Json(CinemaHallView::from(&hall)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CinemaHallPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CinemaHallView>)> {
    let input = payload?.0.validate()?;
    let hall = cinema_hall::ActiveModel {
        name: Set(input.name),
        rows: Set(input.rows),
        seats_in_row: Set(input.seats_in_row),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    info!(id = hall.id, capacity = hall.capacity(), "created cinema hall");
    Ok((StatusCode::CREATED, Json(CinemaHallView::from(&hall))))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CinemaHallPayload>, JsonRejection>,
) -> AppResult<Json<CinemaHallView>> {
    let Path(id) = path?;
    let existing = super::find::<cinema_hall::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn partial_update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CinemaHallPayload>, JsonRejection>,
) -> AppResult<Json<CinemaHallView>> {
    let Path(id) = path?;
    let existing = super::find::<cinema_hall::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.merged_with(&existing).validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    super::destroy::<cinema_hall::Entity, _>(&state.db, RESOURCE, id).await
}

async fn save(
    state: &AppState,
    existing: cinema_hall::Model,
    input: CinemaHallInput,
) -> AppResult<CinemaHallView> {
    let id = existing.id;
    let mut active: cinema_hall::ActiveModel = existing.into();
    active.name = Set(input.name);
    active.rows = Set(input.rows);
    active.seats_in_row = Set(input.seats_in_row);
    let hall = active.update(&state.db).await?;
    info!(id, capacity = hall.capacity(), "updated cinema hall");
    Ok(CinemaHallView::from(&hall))
}
