use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{debug, info};

use crate::{
    AppState,
    entities::genre,
    error::{AppResult, ValidationErrors},
    models::{GenreInput, GenrePayload, GenreView},
    representation::ResourceType,
};

const RESOURCE: ResourceType = ResourceType::Genre;

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<GenreView>>> {
    let genres = genre::Entity::find().order_by_asc(genre::Column::Id).all(&state.db).await?;
    debug!(count = genres.len(), "listed genres");
    Ok(Json(genres.iter().map(GenreView::from).collect()))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<GenreView>> {
    let Path(id) = path?;
    let genre = super::find::<genre::Entity, _>(&state.db, RESOURCE, id).await?;
    Ok(Json(GenreView::from(&genre)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenrePayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<GenreView>)> {
    let input = payload?.0.validate()?;
    ensure_unique_name(&state, &input.name, None).await?;

    let genre = genre::ActiveModel { name: Set(input.name), ..Default::default() }
        .insert(&state.db)
        .await?;
    info!(id = genre.id, name = %genre.name, "created genre");
    Ok((StatusCode::CREATED, Json(GenreView::from(&genre))))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<GenrePayload>, JsonRejection>,
) -> AppResult<Json<GenreView>> {
    let Path(id) = path?;
    let existing = super::find::<genre::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn partial_update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<GenrePayload>, JsonRejection>,
) -> AppResult<Json<GenreView>> {
    let Path(id) = path?;
    let existing = super::find::<genre::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.merged_with(&existing).validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    super::destroy::<genre::Entity, _>(&state.db, RESOURCE, id).await
}

async fn save(state: &AppState, existing: genre::Model, input: GenreInput) -> AppResult<GenreView> {
    let id = existing.id;
    ensure_unique_name(state, &input.name, Some(id)).await?;

    let mut active: genre::ActiveModel = existing.into();
    active.name = Set(input.name);
    let genre = active.update(&state.db).await?;
    info!(id, "updated genre");
    Ok(GenreView::from(&genre))
}

async fn ensure_unique_name(state: &AppState, name: &str, except: Option<i32>) -> AppResult<()> {
    let mut query = genre::Entity::find().filter(genre::Column::Name.eq(name));
    if let Some(id) = except {
        query = query.filter(genre::Column::Id.ne(id));
    }
    let mut errors = ValidationErrors::default();
    if query.one(&state.db).await?.is_some() {
        errors.add("name", "genre with this name already exists.");
    }
    errors.finish()
}
