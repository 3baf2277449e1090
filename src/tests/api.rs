use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{self, send};
use crate::db;

#[tokio::test]
async fn index_lists_every_collection() {
    let app = support::app(db::memory().await);

    let (status, body) = send(&app, Method::GET, "/api/cinema/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["movies"], "/api/cinema/movies/");
    assert_eq!(body["movie_sessions"], "/api/cinema/movie_sessions/");
    assert_eq!(body.as_object().unwrap().len(), 7);
}

#[tokio::test]
async fn cinema_hall_capacity_is_derived() {
    let app = support::app(db::memory().await);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/cinema/cinema_halls/",
        Some(json!({ "name": "Blue", "rows": 10, "seats_in_row": 15 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["capacity"], 150);

    let uri = format!("/api/cinema/cinema_halls/{}/", created["id"]);
    let (status, read) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["capacity"], 150);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Blue", "rows": 4, "seats_in_row": 5, "capacity": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["capacity"], 20);

    let (_, listed) = send(&app, Method::GET, "/api/cinema/cinema_halls/", None).await;
    assert_eq!(listed[0]["capacity"], 20);
}

#[tokio::test]
async fn missing_session_is_not_found() {
    let app = support::app(db::memory().await);

    let (status, body) = send(&app, Method::GET, "/api/cinema/movie_sessions/42/", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not found." }));
}

#[tokio::test]
async fn movie_list_and_detail_use_different_shapes() {
    let db = db::memory().await;
    let scifi = support::genre(&db, "Sci-Fi").await;
    let adventure = support::genre(&db, "Adventure").await;
    let actor = support::actor(&db, "Timothée", "Chalamet").await;
    let dune = support::movie(&db, "Dune", 155, &[scifi.id, adventure.id], &[actor.id]).await;
    let app = support::app(db);

    let (status, list) = send(&app, Method::GET, "/api/cinema/movies/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["title"], "Dune");
    assert_eq!(list[0]["duration"], 155);
    assert_eq!(list[0]["genres"], json!(["Sci-Fi", "Adventure"]));
    assert_eq!(list[0]["actors"], json!(["Timothée Chalamet"]));

    let (status, detail) =
        send(&app, Method::GET, &format!("/api/cinema/movies/{}/", dune.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        detail["genres"],
        json!([
            { "id": scifi.id, "name": "Sci-Fi" },
            { "id": adventure.id, "name": "Adventure" }
        ])
    );
    assert_eq!(
        detail["actors"],
        json!([{
            "id": actor.id,
            "first_name": "Timothée",
            "last_name": "Chalamet",
            "full_name": "Timothée Chalamet"
        }])
    );
    assert_eq!(detail["actors"][0]["full_name"], list[0]["actors"][0]);
}

#[tokio::test]
async fn movie_write_round_trip() {
    let db = db::memory().await;
    let drama = support::genre(&db, "Drama").await;
    let actor = support::actor(&db, "Al", "Pacino").await;
    let app = support::app(db);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/cinema/movies/",
        Some(json!({
            "title": "Heat",
            "description": "Cops and robbers.",
            "duration": 170,
            "genres": [drama.id],
            "actors": [actor.id, actor.id]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["genres"], json!([drama.id]));
    assert_eq!(created["actors"], json!([actor.id]));

    let uri = format!("/api/cinema/movies/{}/", created["id"]);
    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "title": "Heat",
            "description": "Cops and robbers in LA.",
            "duration": 171,
            "genres": [],
            "actors": [actor.id]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["duration"], 171);
    assert_eq!(updated["genres"], json!([]));

    let (_, detail) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(detail["genres"], json!([]));
    assert_eq!(detail["actors"][0]["full_name"], "Al Pacino");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn movie_write_rejects_unknown_relations() {
    let db = db::memory().await;
    let drama = support::genre(&db, "Drama").await;
    let app = support::app(db);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cinema/movies/",
        Some(json!({
            "title": "Heat",
            "description": "Cops and robbers.",
            "duration": 170,
            "genres": [drama.id, 77],
            "actors": []
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "genres": ["Invalid pk \"77\" - object does not exist."] }));

    let (_, list) = send(&app, Method::GET, "/api/cinema/movies/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn movie_write_reports_missing_fields() {
    let app = support::app(db::memory().await);

    let (status, body) =
        send(&app, Method::POST, "/api/cinema/movies/", Some(json!({ "title": "Heat" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["description", "duration", "genres", "actors"] {
        assert_eq!(body[field], json!(["This field is required."]), "{field}");
    }
    assert!(body.get("title").is_none());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = support::app(db::memory().await);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cinema/genres/",
        Some(json!({ "name": ["not", "a", "string"] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn movie_filters() {
    let db = db::memory().await;
    let drama = support::genre(&db, "Drama").await;
    let pacino = support::actor(&db, "Al", "Pacino").await;
    support::movie(&db, "Dune", 155, &[], &[]).await;
    support::movie(&db, "Heat", 170, &[drama.id], &[pacino.id]).await;
    let app = support::app(db);

    let (_, by_title) = send(&app, Method::GET, "/api/cinema/movies/?title=un", None).await;
    assert_eq!(by_title.as_array().unwrap().len(), 1);
    assert_eq!(by_title[0]["title"], "Dune");

    let uri = format!("/api/cinema/movies/?genres={},99&actors={}", drama.id, pacino.id);
    let (_, by_relations) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(by_relations.as_array().unwrap().len(), 1);
    assert_eq!(by_relations[0]["title"], "Heat");

    let (status, _) = send(&app, Method::GET, "/api/cinema/movies/?genres=x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn session_shapes_follow_operation() {
    let db = db::memory().await;
    let scifi = support::genre(&db, "Sci-Fi").await;
    let hall = support::hall(&db, "Blue", 10, 15).await;
    let dune = support::movie(&db, "Dune", 155, &[scifi.id], &[]).await;
    let app = support::app(db);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/cinema/movie_sessions/",
        Some(json!({
            "show_time": "2024-10-10T18:30:00",
            "movie": dune.id,
            "cinema_hall": hall.id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["movie"], dune.id);
    assert_eq!(created["cinema_hall"], hall.id);
    assert_eq!(created["show_time"], "2024-10-10T18:30:00");

    let (_, list) = send(&app, Method::GET, "/api/cinema/movie_sessions/", None).await;
    assert_eq!(
        list,
        json!([{
            "id": created["id"],
            "show_time": "2024-10-10T18:30:00",
            "movie_title": "Dune",
            "cinema_hall_name": "Blue",
            "cinema_hall_capacity": 150
        }])
    );

    let uri = format!("/api/cinema/movie_sessions/{}/", created["id"]);
    let (status, detail) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["movie"]["title"], "Dune");
    assert_eq!(detail["movie"]["genres"], json!(["Sci-Fi"]));
    assert_eq!(detail["cinema_hall"]["capacity"], 150);
    assert_eq!(detail["cinema_hall"]["id"], hall.id);
}

#[tokio::test]
async fn session_filters_by_day_and_movie() {
    let db = db::memory().await;
    let hall = support::hall(&db, "Blue", 10, 15).await;
    let dune = support::movie(&db, "Dune", 155, &[], &[]).await;
    let heat = support::movie(&db, "Heat", 170, &[], &[]).await;
    support::session(&db, "2024-10-10T18:30:00", dune.id, hall.id).await;
    support::session(&db, "2024-10-11T21:00:00", dune.id, hall.id).await;
    support::session(&db, "2024-10-11T12:00:00", heat.id, hall.id).await;
    let app = support::app(db);

    let (_, on_day) =
        send(&app, Method::GET, "/api/cinema/movie_sessions/?date=2024-10-11", None).await;
    let titles: Vec<&str> =
        on_day.as_array().unwrap().iter().map(|s| s["movie_title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Heat", "Dune"]);

    let uri = format!("/api/cinema/movie_sessions/?date=2024-10-11&movie={}", dune.id);
    let (_, narrowed) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(narrowed.as_array().unwrap().len(), 1);

    let (status, _) =
        send(&app, Method::GET, "/api/cinema/movie_sessions/?date=tomorrow", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn session_write_validates_references() {
    let db = db::memory().await;
    let hall = support::hall(&db, "Blue", 10, 15).await;
    let app = support::app(db);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cinema/movie_sessions/",
        Some(json!({ "show_time": "2024-10-10T18:30:00", "movie": 5, "cinema_hall": hall.id })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "movie": ["Invalid pk \"5\" - object does not exist."] }));
}

#[tokio::test]
async fn genre_names_are_unique() {
    let app = support::app(db::memory().await);
    let genre = json!({ "name": "Drama" });

    let (status, created) =
        send(&app, Method::POST, "/api/cinema/genres/", Some(genre.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/cinema/genres/", Some(genre.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["name"].is_array());

    let uri = format!("/api/cinema/genres/{}/", created["id"]);
    let (status, _) = send(&app, Method::PUT, &uri, Some(genre)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn orders_and_tickets() {
    let db = db::memory().await;
    let hall = support::hall(&db, "Blue", 10, 15).await;
    let dune = support::movie(&db, "Dune", 155, &[], &[]).await;
    let session = support::session(&db, "2024-10-10T18:30:00", dune.id, hall.id).await;
    let app = support::app(db);

    let (status, order) = send(
        &app,
        Method::POST,
        "/api/cinema/orders/",
        Some(json!({ "user": 3, "created_at": "1999-01-01T00:00:00Z", "id": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["user"], 3);
    assert_ne!(order["id"], 100);
    assert_ne!(order["created_at"], "1999-01-01T00:00:00Z");

    let (status, ticket) = send(
        &app,
        Method::POST,
        "/api/cinema/tickets/",
        Some(json!({ "movie_session": session.id, "order": order["id"], "row": 2, "seat": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ticket["movie_session"], session.id);
    assert_eq!(ticket["row"], 2);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cinema/tickets/",
        Some(json!({ "movie_session": 404, "order": order["id"], "row": 1, "seat": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["movie_session"].is_array());

    let (status, _) =
        send(&app, Method::DELETE, &format!("/api/cinema/orders/{}/", order["id"]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, tickets) = send(&app, Method::GET, "/api/cinema/tickets/", None).await;
    assert_eq!(tickets, json!([]));
}

#[tokio::test]
async fn deleting_unknown_record_is_not_found() {
    let app = support::app(db::memory().await);

    let (status, _) = send(&app, Method::DELETE, "/api/cinema/actors/9/", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unparseable_ids_are_not_found() {
    let app = support::app(db::memory().await);

    for (method, uri) in [
        (Method::GET, "/api/cinema/movie_sessions/abc/"),
        (Method::GET, "/api/cinema/movies/99999999999/"),
        (Method::DELETE, "/api/cinema/genres/-x/"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "detail": "Not found." }), "{uri}");
    }

    let (status, body) =
        send(&app, Method::PATCH, "/api/cinema/cinema_halls/abc/", Some(json!({ "name": "Red" })))
            .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not found." }));
}

#[tokio::test]
async fn actors_create_list_and_update() {
    let app = support::app(db::memory().await);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/cinema/actors/",
        Some(json!({ "first_name": "Zendaya", "last_name": "Coleman", "full_name": "ignored" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["full_name"], "Zendaya Coleman");

    let (status, listed) = send(&app, Method::GET, "/api/cinema/actors/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created.clone()]));

    let uri = format!("/api/cinema/actors/{}/", created["id"]);
    let (status, body) =
        send(&app, Method::PUT, &uri, Some(json!({ "first_name": "Rebecca" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "last_name": ["This field is required."] }));

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "first_name": "Rebecca", "last_name": "Ferguson" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["full_name"], "Rebecca Ferguson");

    let (status, patched) =
        send(&app, Method::PATCH, &uri, Some(json!({ "last_name": "Hall" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["first_name"], "Rebecca");
    assert_eq!(patched["full_name"], "Rebecca Hall");
}

#[tokio::test]
async fn cinema_hall_partial_update_keeps_layout() {
    let db = db::memory().await;
    let hall = support::hall(&db, "Blue", 10, 15).await;
    let app = support::app(db);
    let uri = format!("/api/cinema/cinema_halls/{}/", hall.id);

    let (status, patched) = send(&app, Method::PATCH, &uri, Some(json!({ "name": "Red" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        patched,
        json!({ "id": hall.id, "name": "Red", "rows": 10, "seats_in_row": 15, "capacity": 150 })
    );

    let (status, patched) = send(&app, Method::PATCH, &uri, Some(json!({ "rows": 2 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["capacity"], 30);

    let (status, body) =
        send(&app, Method::PATCH, &uri, Some(json!({ "rows": 0, "capacity": 5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["rows"].is_array());
}

#[tokio::test]
async fn cinema_hall_capacity_overflow_is_rejected() {
    let db = db::memory().await;
    let hall = support::hall(&db, "Blue", 10, 15).await;
    let app = support::app(db);
    let overflow = json!({ "seats_in_row": ["Capacity is out of range."] });

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cinema/cinema_halls/",
        Some(json!({ "name": "Vast", "rows": 65536, "seats_in_row": 65536 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, overflow);

    let uri = format!("/api/cinema/cinema_halls/{}/", hall.id);
    let (status, body) =
        send(&app, Method::PATCH, &uri, Some(json!({ "rows": 2147483647 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, overflow);

    let (_, read) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(read["capacity"], 150);
}

#[tokio::test]
async fn movie_partial_update_replaces_only_named_relations() {
    let db = db::memory().await;
    let drama = support::genre(&db, "Drama").await;
    let crime = support::genre(&db, "Crime").await;
    let pacino = support::actor(&db, "Al", "Pacino").await;
    let heat = support::movie(&db, "Heat", 170, &[drama.id], &[pacino.id]).await;
    let app = support::app(db);
    let uri = format!("/api/cinema/movies/{}/", heat.id);

    let (status, patched) =
        send(&app, Method::PATCH, &uri, Some(json!({ "genres": [crime.id] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["title"], "Heat");
    assert_eq!(patched["genres"], json!([crime.id]));
    assert_eq!(patched["actors"], json!([pacino.id]));

    let (status, patched) =
        send(&app, Method::PATCH, &uri, Some(json!({ "title": "Heat (1995)" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["genres"], json!([crime.id]));
    assert_eq!(patched["actors"], json!([pacino.id]));

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "actors": [77] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "actors": ["Invalid pk \"77\" - object does not exist."] }));

    let (_, detail) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(detail["title"], "Heat (1995)");
    assert_eq!(detail["genres"], json!([{ "id": crime.id, "name": "Crime" }]));
    assert_eq!(detail["actors"][0]["full_name"], "Al Pacino");
}

#[tokio::test]
async fn session_update_and_delete() {
    let db = db::memory().await;
    let blue = support::hall(&db, "Blue", 10, 15).await;
    let red = support::hall(&db, "Red", 5, 5).await;
    let dune = support::movie(&db, "Dune", 155, &[], &[]).await;
    let session = support::session(&db, "2024-10-10T18:30:00", dune.id, blue.id).await;
    let app = support::app(db);
    let uri = format!("/api/cinema/movie_sessions/{}/", session.id);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "show_time": "2024-10-11T20:00:00", "movie": dune.id, "cinema_hall": red.id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({
            "id": session.id,
            "show_time": "2024-10-11T20:00:00",
            "movie": dune.id,
            "cinema_hall": red.id
        })
    );

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "cinema_hall": 99 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "cinema_hall": ["Invalid pk \"99\" - object does not exist."] }));

    let (status, patched) =
        send(&app, Method::PATCH, &uri, Some(json!({ "show_time": "2024-10-12T09:15:00" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["show_time"], "2024-10-12T09:15:00");
    assert_eq!(patched["cinema_hall"], red.id);

    let (_, detail) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(detail["cinema_hall"]["name"], "Red");
    assert_eq!(detail["movie"]["title"], "Dune");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);
    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn partial_updates_revalidate_merged_records() {
    let db = db::memory().await;
    support::genre(&db, "Drama").await;
    let crime = support::genre(&db, "Crime").await;
    let hall = support::hall(&db, "Blue", 10, 15).await;
    let dune = support::movie(&db, "Dune", 155, &[], &[]).await;
    let session = support::session(&db, "2024-10-10T18:30:00", dune.id, hall.id).await;
    let app = support::app(db);

    let genre_uri = format!("/api/cinema/genres/{}/", crime.id);
    let (status, body) =
        send(&app, Method::PATCH, &genre_uri, Some(json!({ "name": "Drama" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["name"].is_array());
    let (status, kept) = send(&app, Method::PATCH, &genre_uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kept, json!({ "id": crime.id, "name": "Crime" }));

    let (_, order) =
        send(&app, Method::POST, "/api/cinema/orders/", Some(json!({ "user": 3 }))).await;
    let order_uri = format!("/api/cinema/orders/{}/", order["id"]);
    let (status, patched) = send(&app, Method::PATCH, &order_uri, Some(json!({ "user": 5 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["user"], 5);
    assert_eq!(patched["created_at"], order["created_at"]);

    let (_, ticket) = send(
        &app,
        Method::POST,
        "/api/cinema/tickets/",
        Some(json!({ "movie_session": session.id, "order": order["id"], "row": 2, "seat": 7 })),
    )
    .await;
    let ticket_uri = format!("/api/cinema/tickets/{}/", ticket["id"]);
    let (status, patched) = send(&app, Method::PATCH, &ticket_uri, Some(json!({ "seat": 9 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["row"], 2);
    assert_eq!(patched["seat"], 9);
    let (status, body) =
        send(&app, Method::PATCH, &ticket_uri, Some(json!({ "order": 404 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["order"].is_array());
}
