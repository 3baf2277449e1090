//! Fixtures shared by store-backed and HTTP tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    AppState,
    entities::{actor, cinema_hall, genre, movie, movie_actor, movie_genre, movie_session},
};

/// Counts every statement `db` executes from now on.
pub fn count_round_trips(db: &mut DatabaseConnection) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = counter.clone();
    db.set_metric_callback(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    counter
}

pub async fn genre(db: &DatabaseConnection, name: &str) -> genre::Model {
    genre::ActiveModel { name: Set(name.to_string()), ..Default::default() }
        .insert(db)
        .await
        .expect("insert genre")
}

pub async fn actor(db: &DatabaseConnection, first_name: &str, last_name: &str) -> actor::Model {
    actor::ActiveModel {
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert actor")
}

pub async fn movie(
    db: &DatabaseConnection,
    title: &str,
    duration: i32,
    genres: &[i32],
    actors: &[i32],
) -> movie::Model {
    let movie = movie::ActiveModel {
        title: Set(title.to_string()),
        description: Set(format!("About {title}.")),
        duration: Set(duration),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert movie");

    if !genres.is_empty() {
        movie_genre::Entity::insert_many(genres.iter().map(|&genre_id| movie_genre::ActiveModel {
            movie_id: Set(movie.id),
            genre_id: Set(genre_id),
        }))
        .exec_without_returning(db)
        .await
        .expect("link genres");
    }
    if !actors.is_empty() {
        movie_actor::Entity::insert_many(actors.iter().map(|&actor_id| movie_actor::ActiveModel {
            movie_id: Set(movie.id),
            actor_id: Set(actor_id),
        }))
        .exec_without_returning(db)
        .await
        .expect("link actors");
    }
    movie
}

pub async fn hall(
    db: &DatabaseConnection,
    name: &str,
    rows: i32,
    seats_in_row: i32,
) -> cinema_hall::Model {
    cinema_hall::ActiveModel {
        name: Set(name.to_string()),
        rows: Set(rows),
        seats_in_row: Set(seats_in_row),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert cinema hall")
}

pub async fn session(
    db: &DatabaseConnection,
    show_time: &str,
    movie_id: i32,
    cinema_hall_id: i32,
) -> movie_session::Model {
    movie_session::ActiveModel {
        show_time: Set(show_time.to_string()),
        movie_id: Set(movie_id),
        cinema_hall_id: Set(cinema_hall_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert movie session")
}

pub fn app(db: DatabaseConnection) -> Router {
    crate::routes::router(Arc::new(AppState { db }))
}

/// Sends one request through the router and decodes the JSON body
/// (`Value::Null` when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        },
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}
