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
    entities::actor,
    error::AppResult,
    models::{ActorInput, ActorPayload, ActorView},
    representation::ResourceType,
};

const RESOURCE: ResourceType = ResourceType::Actor;

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<ActorView>>> {
    let actors = actor::Entity::find().order_by_asc(actor::Column::Id).all(&state.db).await?;
    debug!(count = actors.len(), "listed actors");
    Ok(Json(actors.iter().map(ActorView::from).collect()))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<ActorView>> {
    let Path(id) = path?;
    let actor = super::find::<actor::Entity, _>(&state.db, RESOURCE, id).await?;
    Ok(Json(ActorView::from(&actor)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ActorPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ActorView>)> {
    let input = payload?.0.validate()?;
    let actor = actor::ActiveModel {
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    info!(id = actor.id, name = %actor.full_name(), "created actor");
    Ok((StatusCode::CREATED, Json(ActorView::from(&actor))))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ActorPayload>, JsonRejection>,
) -> AppResult<Json<ActorView>> {
    let Path(id) = path?;
    let existing = super::find::<actor::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn partial_update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ActorPayload>, JsonRejection>,
) -> AppResult<Json<ActorView>> {
    let Path(id) = path?;
    let existing = super::find::<actor::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.merged_with(&existing).validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    super::destroy::<actor::Entity, _>(&state.db, RESOURCE, id).await
}

async fn save(state: &AppState, existing: actor::Model, input: ActorInput) -> AppResult<ActorView> {
    let id = existing.id;
    let mut active: actor::ActiveModel = existing.into();
    active.first_name = Set(input.first_name);
    active.last_name = Set(input.last_name);
    let actor = active.update(&state.db).await?;
    info!(id, "updated actor");
    Ok(ActorView::from(&actor))
}
