//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use discgolf_api::state::AppState;
use discgolf_core::clock::Clock;
use discgolf_core::rng::DeterministicRng;
use discgolf_core::store::GameStore;
use discgolf_test_support::{FixedClock, InMemoryGameStore, MockRng, SequenceRng};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build the full app over `store` with a deterministic clock and an RNG
/// that leaves the turn order unshuffled. Uses the same router as `main.rs`.
pub fn build_test_app(store: Arc<InMemoryGameStore>) -> Router {
    build_app(store, MockRng)
}

/// Build the full app with a scripted `SequenceRng` for tests that need a
/// specific start-of-game shuffle.
pub fn build_test_app_with_rng(store: Arc<InMemoryGameStore>, rng: SequenceRng) -> Router {
    build_app(store, rng)
}

fn build_app(store: Arc<InMemoryGameStore>, rng: impl DeterministicRng + Send + 'static) -> Router {
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::default());
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    let game_store: Arc<dyn GameStore> = store;
    discgolf_api::app(AppState::new(clock, rng, game_store))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Create a game and return its id as sent back by the API.
pub async fn create_game(app: Router, creator: &str) -> String {
    let (status, json) = post_json(
        app,
        "/game",
        &serde_json::json!({ "playerName": creator }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["gameId"].as_str().unwrap().to_owned()
}
