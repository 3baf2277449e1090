mod actors;
mod cinema_halls;
mod genres;
mod movie_sessions;
mod movies;
mod orders;
mod tickets;

use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, Router, http::StatusCode, routing::get};
use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    query,
    representation::{FieldKind, Operation, ResourceType, select_shape},
};

const API_ROOT: &str = "/api/cinema/";

pub fn router(state: Arc<AppState>) -> Router {
    log_representations();

    Router::new()
        .route(API_ROOT, get(index))
        .route("/api/cinema/genres/", get(genres::list).post(genres::create))
        .route(
            "/api/cinema/genres/{id}/",
            get(genres::retrieve)
                .put(genres::update)
                .patch(genres::partial_update)
                .delete(genres::destroy),
        )
        .route("/api/cinema/actors/", get(actors::list).post(actors::create))
        .route(
            "/api/cinema/actors/{id}/",
            get(actors::retrieve)
                .put(actors::update)
                .patch(actors::partial_update)
                .delete(actors::destroy),
        )
        .route("/api/cinema/movies/", get(movies::list).post(movies::create))
        .route(
            "/api/cinema/movies/{id}/",
            get(movies::retrieve)
                .put(movies::update)
                .patch(movies::partial_update)
                .delete(movies::destroy),
        )
        .route("/api/cinema/cinema_halls/", get(cinema_halls::list).post(cinema_halls::create))
        .route(
            "/api/cinema/cinema_halls/{id}/",
            get(cinema_halls::retrieve)
                .put(cinema_halls::update)
                .patch(cinema_halls::partial_update)
                .delete(cinema_halls::destroy),
        )
        .route(
            "/api/cinema/movie_sessions/",
            get(movie_sessions::list).post(movie_sessions::create),
        )
        .route(
            "/api/cinema/movie_sessions/{id}/",
            get(movie_sessions::retrieve)
                .put(movie_sessions::update)
                .patch(movie_sessions::partial_update)
                .delete(movie_sessions::destroy),
        )
        .route("/api/cinema/orders/", get(orders::list).post(orders::create))
        .route(
            "/api/cinema/orders/{id}/",
            get(orders::retrieve)
                .put(orders::update)
                .patch(orders::partial_update)
                .delete(orders::destroy),
        )
        .route("/api/cinema/tickets/", get(tickets::list).post(tickets::create))
        .route(
            "/api/cinema/tickets/{id}/",
            get(tickets::retrieve)
                .put(tickets::update)
                .patch(tickets::partial_update)
                .delete(tickets::destroy),
        )
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

/// Resolves the shape and load plan of every (resource, operation) pair
/// once, when the router is composed.
fn log_representations() {
    for resource in ResourceType::ALL {
        for operation in Operation::ALL {
            let shape = select_shape(resource, operation);
            let plan = query::shape_query(resource, operation);
            let nested = shape
                .fields()
                .iter()
                .filter(|f| matches!(f.kind, FieldKind::Nested(_) | FieldKind::NestedMany(_)))
                .count();
            tracing::debug!(
                %resource,
                ?operation,
                ?shape,
                fields = ?shape.field_names(),
                nested,
                joined = ?plan.joined,
                batched = ?plan.batched,
                "resolved representation"
            );
        }
    }
}

async fn index() -> Json<BTreeMap<&'static str, String>> {
    Json(
        ResourceType::ALL
            .iter()
            .map(|r| (r.collection(), format!("{API_ROOT}{}/", r.collection())))
            .collect(),
    )
}

/// Fetches `E` by primary key, mapping absence to a not-found error.
async fn find<E, C>(db: &C, resource: ResourceType, id: i32) -> AppResult<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id).one(db).await?.ok_or(AppError::not_found(resource, id))
}

async fn destroy<E, C>(db: &C, resource: ResourceType, id: i32) -> AppResult<StatusCode>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let result = E::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(resource, id));
    }
    tracing::info!(%resource, id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
