mod common;

use axum::http::StatusCode;
use common::{error_of, TestApp};
use serde_json::json;

async fn seeded() -> TestApp {
    let app = TestApp::new().await;
    app.post("/users", json!({ "name": "Leia", "email": "leia@alderaan.org", "password": "hope" })).await;
    app.post("/characters", json!({ "name": "Luke Skywalker", "gender": "male", "height": 172 })).await;
    app.post("/characters", json!({ "name": "Han Solo", "gender": "male" })).await;
    app.post("/planets", json!({ "name": "Alderaan", "climate": "temperate" })).await;
    app.post("/vehicles", json!({ "name": "Sand Crawler", "model": "Digger Crawler" })).await;
    app
}

#[tokio::test]
async fn adding_favorite_twice_inserts_duplicate_rows() {
    let app = seeded().await;
    let (status, body) = app
        .post("/users/1/favorites/character", json!({ "character_name": "Luke Skywalker" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "ok");
    assert_eq!(
        body["info"],
        json!([{
            "favorite_character_id": 1,
            "character_info": {
                "id": 1, "name": "Luke Skywalker", "gender": "male", "height": 172,
                "mass": null, "hair_color": null, "eye_color": null, "birth_year": null
            }
        }])
    );
    assert_eq!(app.count("favorite_characters").await, 1);

    let (_, body) = app
        .post("/users/1/favorites/character", json!({ "character_name": "Luke Skywalker" }))
        .await;
    let items = body["info"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["favorite_character_id"], 2);
    assert_eq!(app.count("favorite_characters").await, 2);
}

#[tokio::test]
async fn add_validates_user_body_and_name() {
    let app = seeded().await;
    let (status, body) = app
        .post("/users/9/favorites/planet", json!({ "planet_name": "Alderaan" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "The user with id 9 doesn't exist");

    let (_, body) = app
        .request(axum::http::Method::POST, "/users/1/favorites/planet", None)
        .await;
    assert_eq!(error_of(&body), "You must send information with the body");

    let (_, body) = app.post("/users/1/favorites/planet", json!({ "name": "Alderaan" })).await;
    assert_eq!(error_of(&body), "You must give the planet name with planet_name");

    let (_, body) = app.post("/users/1/favorites/planet", json!({ "planet_name": "Coruscant" })).await;
    assert_eq!(error_of(&body), "The planet Coruscant doesn't exist");
    assert_eq!(app.count("favorite_planets").await, 0);
}

#[tokio::test]
async fn removing_never_favorited_character_changes_nothing() {
    let app = seeded().await;
    app.post("/users/1/favorites/character", json!({ "character_name": "Luke Skywalker" })).await;

    let (status, body) = app
        .delete("/users/1/favorites/character", Some(json!({ "character_name": "Han Solo" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "The user didn't favorite this character before");
    assert_eq!(app.count("favorite_characters").await, 1);
}

#[tokio::test]
async fn remove_deletes_oldest_matching_row() {
    let app = seeded().await;
    for _ in 0..2 {
        app.post("/users/1/favorites/character", json!({ "character_name": "Luke Skywalker" })).await;
    }
    let (status, body) = app
        .delete("/users/1/favorites/character", Some(json!({ "character_name": "Luke Skywalker" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "ok");
    assert_eq!(body["user_name"], "Leia");
    let items = body["info"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["favorite_character_id"], 2);
}

#[tokio::test]
async fn planets_and_vehicles_can_be_removed() {
    let app = seeded().await;
    app.post("/users/1/favorites/planet", json!({ "planet_name": "Alderaan" })).await;
    app.post("/users/1/favorites/vehicle", json!({ "vehicle_name": "Sand Crawler" })).await;

    let (_, body) = app
        .delete("/users/1/favorites/planet", Some(json!({ "planet_name": "Alderaan" })))
        .await;
    assert_eq!(body["info"], json!([]));
    let (_, body) = app
        .delete("/users/1/favorites/vehicle", Some(json!({ "vehicle_name": "Sand Crawler" })))
        .await;
    assert_eq!(body["info"], json!([]));
    assert_eq!(app.count("favorite_planets").await, 0);
    assert_eq!(app.count("favorite_vehicles").await, 0);
}

#[tokio::test]
async fn user_favorites_bundle_all_kinds() {
    let app = seeded().await;
    app.post("/users/1/favorites/character", json!({ "character_name": "Han Solo" })).await;
    app.post("/users/1/favorites/vehicle", json!({ "vehicle_name": "Sand Crawler" })).await;

    let (status, body) = app.get("/users/1/favorites").await;
    assert_eq!(status, StatusCode::OK);
    let info = &body["info"];
    assert_eq!(info["user"]["name"], "Leia");
    assert_eq!(info["user"]["password"], "hope");
    assert_eq!(info["characters"][0]["character_info"]["name"], "Han Solo");
    assert_eq!(info["planets"], json!([]));
    assert_eq!(info["vehicles"][0]["vehicle_info"]["model"], "Digger Crawler");

    let (_, body) = app.get("/users/4/favorites").await;
    assert_eq!(error_of(&body), "The user with id 4 doesn't exist");
}

#[tokio::test]
async fn all_users_favorites_listed_in_user_order() {
    let app = seeded().await;
    app.post("/users", json!({ "name": "Han", "email": "han@falcon.io" })).await;
    app.post("/users/2/favorites/planet", json!({ "planet_name": "Alderaan" })).await;

    let (status, body) = app.get("/users/favorites").await;
    assert_eq!(status, StatusCode::OK);
    let bundles = body["info"].as_array().unwrap();
    assert_eq!(bundles.len(), 2);
    assert_eq!(bundles[0]["user"]["name"], "Leia");
    assert_eq!(bundles[0]["planets"], json!([]));
    assert_eq!(bundles[1]["user"]["name"], "Han");
    assert_eq!(bundles[1]["planets"][0]["planet_info"]["name"], "Alderaan");
}

#[tokio::test]
async fn deleted_target_drops_out_of_listing() {
    let app = seeded().await;
    app.post("/users/1/favorites/planet", json!({ "planet_name": "Alderaan" })).await;
    app.delete("/planets/1", None).await;

    let (_, body) = app.get("/users/1/favorites").await;
    assert_eq!(body["info"]["planets"], json!([]));
    assert_eq!(app.count("favorite_planets").await, 1);
}

#[tokio::test]
async fn duplicate_names_resolve_to_lowest_id() {
    let app = seeded().await;
    app.post("/characters", json!({ "name": "Luke Skywalker", "birth_year": "clone" })).await;
    let (_, body) = app
        .post("/users/1/favorites/character", json!({ "character_name": "Luke Skywalker" }))
        .await;
    assert_eq!(body["info"][0]["character_info"]["id"], 1);
}

#[tokio::test]
async fn sitemap_lists_routes() {
    let app = TestApp::new().await;
    let req = axum::http::Request::builder()
        .uri("/")
        .body(axum::body::Body::empty())
        .unwrap();
    let resp = tower::ServiceExt::oneshot(holocron::http_service(app.state.clone()), req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("href=\"/users/favorites\""));
    assert!(html.contains("href=\"/planets\""));
}
