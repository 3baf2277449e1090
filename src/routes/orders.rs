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
    entities::order,
    error::AppResult,
    models::{OrderInput, OrderPayload, OrderView},
    representation::ResourceType,
};

const RESOURCE: ResourceType = ResourceType::Order;

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<OrderView>>> {
    let orders = order::Entity::find().order_by_asc(order::Column::Id).all(&state.db).await?;
    debug!(count = orders.len(), "listed orders");
    let views = orders.iter().map(OrderView::try_from).collect::<Result<Vec<_>, _>>()?;
    Ok(Json(views))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<OrderView>> {
    let Path(id) = path?;
    let order = super::find::<order::Entity, _>(&state.db, RESOURCE, id).await?;
    Ok(Json(OrderView::try_from(&order)?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrderPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<OrderView>)> {
    let input = payload?.0.validate()?;
    let order = order::ActiveModel {
        created_at: Set(super::now_sec()),
        user_id: Set(input.user),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    info!(id = order.id, user = order.user_id, "created order");
    Ok((StatusCode::CREATED, Json(OrderView::try_from(&order)?)))
}

/// Only `user` is writable; `created_at` keeps its original value.
pub async fn update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<OrderPayload>, JsonRejection>,
) -> AppResult<Json<OrderView>> {
    let Path(id) = path?;
    let existing = super::find::<order::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn partial_update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<OrderPayload>, JsonRejection>,
) -> AppResult<Json<OrderView>> {
    let Path(id) = path?;
    let existing = super::find::<order::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.merged_with(&existing).validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    super::destroy::<order::Entity, _>(&state.db, RESOURCE, id).await
}

async fn save(state: &AppState, existing: order::Model, input: OrderInput) -> AppResult<OrderView> {
    let id = existing.id;
    let mut active: order::ActiveModel = existing.into();
    active.user_id = Set(input.user);
    let order = active.update(&state.db).await?;
    info!(id, "updated order");
    Ok(OrderView::try_from(&order)?)
}
