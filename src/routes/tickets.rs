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
    entities::{movie_session, order, ticket},
    error::{AppResult, ValidationErrors},
    models::{TicketInput, TicketPayload, TicketView},
    query,
    representation::ResourceType,
};

const RESOURCE: ResourceType = ResourceType::Ticket;

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<TicketView>>> {
    let tickets = ticket::Entity::find().order_by_asc(ticket::Column::Id).all(&state.db).await?;
    debug!(count = tickets.len(), "listed tickets");
    Ok(Json(tickets.iter().map(TicketView::from).collect()))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<TicketView>> {
    let Path(id) = path?;
    let ticket = super::find::<ticket::Entity, _>(&state.db, RESOURCE, id).await?;
    Ok(Json(TicketView::from(&ticket)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TicketPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TicketView>)> {
    let input = payload?.0.validate()?;
    check_references(&state, &input).await?;

    let ticket = ticket::ActiveModel {
        row: Set(input.row),
        seat: Set(input.seat),
        movie_session_id: Set(input.movie_session),
        order_id: Set(input.order),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;
    info!(id = ticket.id, order = ticket.order_id, "created ticket");
    Ok((StatusCode::CREATED, Json(TicketView::from(&ticket))))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<TicketPayload>, JsonRejection>,
) -> AppResult<Json<TicketView>> {
    let Path(id) = path?;
    let existing = super::find::<ticket::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn partial_update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<TicketPayload>, JsonRejection>,
) -> AppResult<Json<TicketView>> {
    let Path(id) = path?;
    let existing = super::find::<ticket::Entity, _>(&state.db, RESOURCE, id).await?;
    let input = payload?.0.merged_with(&existing).validate()?;
    save(&state, existing, input).await.map(Json)
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    super::destroy::<ticket::Entity, _>(&state.db, RESOURCE, id).await
}

async fn save(state: &AppState, existing: ticket::Model, input: TicketInput) -> AppResult<TicketView> {
    check_references(state, &input).await?;

    let id = existing.id;
    let mut active: ticket::ActiveModel = existing.into();
    active.row = Set(input.row);
    active.seat = Set(input.seat);
    active.movie_session_id = Set(input.movie_session);
    active.order_id = Set(input.order);
    let ticket = active.update(&state.db).await?;
    info!(id, "updated ticket");
    Ok(TicketView::from(&ticket))
}

async fn check_references(state: &AppState, input: &TicketInput) -> AppResult<()> {
    let mut errors = ValidationErrors::default();
    if !query::exists::<movie_session::Entity, _>(
        &state.db,
        movie_session::Column::Id,
        input.movie_session,
    )
    .await?
    {
        errors.invalid_pk("movie_session", input.movie_session);
    }
    if !query::exists::<order::Entity, _>(&state.db, order::Column::Id, input.order).await? {
        errors.invalid_pk("order", input.order);
    }
    errors.finish()
}
