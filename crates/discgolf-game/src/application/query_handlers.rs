//! Query handlers for the game context.

use chrono::{DateTime, Utc};
use discgolf_core::error::DomainError;
use discgolf_core::id::GameId;
use discgolf_core::store::{GameStore, Scores};
use serde::Serialize;

use crate::application::command_handlers;

/// Read-only view of a game.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// The game identifier.
    pub game_id: GameId,
    /// Turn order for the current round.
    pub order: Vec<String>,
    /// Whether the game has started.
    pub started: bool,
    /// Current round, absent before start.
    pub round: Option<u32>,
    /// Scores submitted so far this round.
    pub scores: Scores,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Returns the current round's turn order, verbatim.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` if the game does not exist.
pub async fn get_round_order(
    game_id: GameId,
    store: &dyn GameStore,
) -> Result<Vec<String>, DomainError> {
    let game = command_handlers::load(store, game_id).await?;
    Ok(game.order().to_vec())
}

/// Retrieves a game by its identifier.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` if the game does not exist.
pub async fn get_game_by_id(game_id: GameId, store: &dyn GameStore) -> Result<GameView, DomainError> {
    let game = command_handlers::load(store, game_id).await?;
    Ok(GameView {
        game_id,
        order: game.order().to_vec(),
        started: game.started(),
        round: game.round(),
        scores: game.scores().clone(),
        created_at: game.created_at(),
    })
}
