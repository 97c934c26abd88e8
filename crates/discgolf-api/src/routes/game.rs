//! Routes for the game session: create, join, start, score and order.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use discgolf_core::error::DomainError;
use discgolf_core::id::GameId;
use discgolf_game::application::command_handlers::{self, ScoreOutcome};
use discgolf_game::application::query_handlers::{self, GameView};
use discgolf_game::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

const PLAYER_JOINED: &str = "Player joined the game";
const GAME_STARTED: &str = "Game started with randomized order for Round 1";
const SCORE_RECORDED: &str = "Score recorded successfully";

/// Request body for POST /game.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    /// The creating player.
    pub player_name: Option<String>,
}

/// Request body for POST /game/join and POST /game/start.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionRequest {
    /// The target game.
    pub game_id: Option<String>,
    /// The acting player.
    pub player_name: Option<String>,
}

/// Request body for POST /game/round/score.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordScoreRequest {
    /// The target game.
    pub game_id: Option<String>,
    /// The scoring player.
    pub player_name: Option<String>,
    /// The player's score for the current round.
    pub score: Option<i32>,
}

/// Response body for POST /game.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    /// The new game's identifier.
    pub game_id: GameId,
    /// The creator, echoed back.
    pub player_name: String,
}

/// Response body carrying a confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

fn message(text: impl Into<String>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: text.into(),
    })
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| DomainError::Validation(format!("{field} not provided")).into())
}

fn parse_game_id(raw: &str) -> Result<GameId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::UnknownGameId(raw.to_owned()))
}

fn score_message(outcome: ScoreOutcome) -> String {
    match outcome {
        ScoreOutcome::ScoreRecorded => SCORE_RECORDED.to_owned(),
        ScoreOutcome::RoundStarted { round } => format!("Round {round} started with a new order"),
    }
}

/// POST /game
#[instrument(skip(state, payload))]
async fn create_game(
    State(state): State<AppState>,
    payload: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<Json<CreateGameResponse>, ApiError> {
    let Json(request) = payload?;
    let command = commands::CreateGame {
        correlation_id: Uuid::new_v4(),
        player_name: required(request.player_name, "playerName")?,
    };

    info!(correlation_id = %command.correlation_id, "handling create_game command");

    let created = command_handlers::handle_create_game(
        &command,
        state.clock.as_ref(),
        &*state.game_store,
    )
    .await?;

    Ok(Json(CreateGameResponse {
        game_id: created.game_id,
        player_name: created.player_name,
    }))
}

/// POST /game/join
#[instrument(skip(state, payload))]
async fn join_game(
    State(state): State<AppState>,
    payload: Result<Json<PlayerActionRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    let game_id = parse_game_id(&required(request.game_id, "gameId")?)?;
    let command = commands::JoinGame {
        correlation_id: Uuid::new_v4(),
        game_id,
        player_name: required(request.player_name, "playerName")?,
    };

    info!(
        correlation_id = %command.correlation_id,
        game_id = %command.game_id,
        "handling join_game command"
    );

    command_handlers::handle_join_game(&command, &*state.game_store).await?;

    Ok(message(PLAYER_JOINED))
}

/// POST /game/start
#[instrument(skip(state, payload))]
async fn start_game(
    State(state): State<AppState>,
    payload: Result<Json<PlayerActionRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    let game_id = parse_game_id(&required(request.game_id, "gameId")?)?;
    let command = commands::StartGame {
        correlation_id: Uuid::new_v4(),
        game_id,
        player_name: required(request.player_name, "playerName")?,
    };

    info!(
        correlation_id = %command.correlation_id,
        game_id = %command.game_id,
        "handling start_game command"
    );

    command_handlers::handle_start_game(&command, &state.rng, &*state.game_store).await?;

    Ok(message(GAME_STARTED))
}

/// POST /game/round/score
#[instrument(skip(state, payload))]
async fn record_score(
    State(state): State<AppState>,
    payload: Result<Json<RecordScoreRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    let game_id = parse_game_id(&required(request.game_id, "gameId")?)?;
    let command = commands::RecordScore {
        correlation_id: Uuid::new_v4(),
        game_id,
        player_name: required(request.player_name, "playerName")?,
        score: required(request.score, "score")?,
    };

    info!(
        correlation_id = %command.correlation_id,
        game_id = %command.game_id,
        "handling record_score command"
    );

    let outcome = command_handlers::handle_record_score(&command, &*state.game_store).await?;

    Ok(message(score_message(outcome)))
}

/// GET /game/round/order/{game_id}
#[instrument(skip(state))]
async fn get_round_order(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let order = query_handlers::get_round_order(game_id, &*state.game_store).await?;
    Ok(Json(order))
}

/// GET /game/{game_id}
#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let view = query_handlers::get_game_by_id(game_id, &*state.game_store).await?;
    Ok(Json(view))
}

/// Returns the router for the game session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/game", post(create_game))
        .route("/game/join", post(join_game))
        .route("/game/start", post(start_game))
        .route("/game/round/score", post(record_score))
        .route("/game/round/order/{game_id}", get(get_round_order))
        .route("/game/{game_id}", get(get_game))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use discgolf_core::clock::Clock;
    use discgolf_core::rng::DeterministicRng;
    use discgolf_core::store::GameStore;
    use discgolf_test_support::{FailingGameStore, FixedClock, InMemoryGameStore, MockRng};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_state_with(game_store: Arc<dyn GameStore>) -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::default());
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
        AppState::new(clock, rng, game_store)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_create_game_returns_200_with_game_id() {
        // Arrange
        let store = Arc::new(InMemoryGameStore::new());
        let app = router().with_state(app_state_with(store.clone()));

        // Act
        let (status, json) = send(
            app,
            "POST",
            "/game",
            Some(serde_json::json!({ "playerName": "ann" })),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["playerName"], "ann");
        let game_id: GameId = json["gameId"].as_str().unwrap().parse().unwrap();
        assert_eq!(store.record(game_id).unwrap().order, vec!["ann"]);
    }

    #[tokio::test]
    async fn test_create_game_returns_400_when_player_name_missing() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(InMemoryGameStore::new())));

        // Act
        let (status, json) = send(app, "POST", "/game", Some(serde_json::json!({}))).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    async fn send_raw(app: Router, uri: &str, body: &'static str) -> (StatusCode, Option<String>, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        (status, content_type, json)
    }

    #[tokio::test]
    async fn test_create_game_returns_json_400_for_wrongly_typed_player_name() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(InMemoryGameStore::new())));

        // Act
        let (status, content_type, json) = send_raw(app, "/game", r#"{"playerName": 5}"#).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(json["error"], "validation_error");
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn test_create_game_returns_json_400_for_truncated_body() {
        let app = router().with_state(app_state_with(Arc::new(InMemoryGameStore::new())));

        let (status, content_type, json) = send_raw(app, "/game", r#"{"playerName": "#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_record_score_returns_400_for_fractional_score() {
        let app = router().with_state(app_state_with(Arc::new(InMemoryGameStore::new())));
        let body = r#"{"gameId": "0b9e4c1e-2f7e-4a53-9f3e-6c1d2a7b8e90", "playerName": "ann", "score": 3.5}"#;

        let (status, _, json) = send_raw(app, "/game/round/score", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_join_game_returns_404_for_unknown_game() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(InMemoryGameStore::new())));
        let body = serde_json::json!({ "gameId": GameId::new(), "playerName": "bob" });

        // Act
        let (status, json) = send(app, "POST", "/game/join", Some(body)).await;

        // Assert
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "game_not_found");
    }

    #[tokio::test]
    async fn test_join_game_returns_404_for_malformed_game_id() {
        let app = router().with_state(app_state_with(Arc::new(InMemoryGameStore::new())));
        let body = serde_json::json!({ "gameId": "64f1c0ffee", "playerName": "bob" });

        let (status, _) = send(app, "POST", "/game/join", Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_start_game_returns_400_for_non_creator() {
        // Arrange
        let store = Arc::new(InMemoryGameStore::new());
        let state = app_state_with(store.clone());
        let (_, json) = send(
            router().with_state(state.clone()),
            "POST",
            "/game",
            Some(serde_json::json!({ "playerName": "ann" })),
        )
        .await;
        let game_id = json["gameId"].clone();

        // Act
        let (status, json) = send(
            router().with_state(state),
            "POST",
            "/game/start",
            Some(serde_json::json!({ "gameId": game_id, "playerName": "bob" })),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "not_creator");
    }

    #[tokio::test]
    async fn test_record_score_returns_400_when_score_missing() {
        let app = router().with_state(app_state_with(Arc::new(InMemoryGameStore::new())));
        let body = serde_json::json!({ "gameId": GameId::new(), "playerName": "ann" });

        let (status, json) = send(app, "POST", "/game/round/score", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "validation error: score not provided");
    }

    #[tokio::test]
    async fn test_get_round_order_returns_404_for_unknown_game() {
        let app = router().with_state(app_state_with(Arc::new(InMemoryGameStore::new())));

        let (status, _) = send(
            app,
            "GET",
            &format!("/game/round/order/{}", GameId::new()),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_game_returns_500_when_store_fails() {
        // Arrange
        let app = router().with_state(app_state_with(Arc::new(FailingGameStore)));

        // Act
        let (status, json) = send(
            app,
            "POST",
            "/game",
            Some(serde_json::json!({ "playerName": "ann" })),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }

    #[test]
    fn test_score_message_distinguishes_rollover() {
        assert_eq!(score_message(ScoreOutcome::ScoreRecorded), "Score recorded successfully");
        assert_eq!(
            score_message(ScoreOutcome::RoundStarted { round: 3 }),
            "Round 3 started with a new order"
        );
    }
}
