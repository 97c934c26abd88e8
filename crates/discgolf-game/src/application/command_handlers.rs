//! Command handlers for the game context.
//!
//! Each handler loads the game from the store, runs the domain method and
//! persists the resulting update with a single store call.

use std::sync::Mutex;

use discgolf_core::clock::Clock;
use discgolf_core::command::Command;
use discgolf_core::error::DomainError;
use discgolf_core::id::GameId;
use discgolf_core::rng::DeterministicRng;
use discgolf_core::store::GameStore;
use tracing::{debug, info};

use crate::domain::aggregates::Game;
use crate::domain::commands::{CreateGame, JoinGame, RecordScore, StartGame};

/// Result of a successful `CreateGame` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCreated {
    /// The newly allocated game identifier.
    pub game_id: GameId,
    /// The creator's name, echoed back.
    pub player_name: String,
}

/// Result of a successful `RecordScore` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// The score was stored; other players have yet to submit.
    ScoreRecorded,
    /// The score completed the round and the given round has begun.
    RoundStarted {
        /// The new round number.
        round: u32,
    },
}

/// Loads a game, mapping a missing record to `DomainError::GameNotFound`.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound` if no record exists, or the store's
/// error if loading fails.
pub(crate) async fn load(store: &dyn GameStore, game_id: GameId) -> Result<Game, DomainError> {
    store
        .get(game_id)
        .await?
        .map(Game::from_record)
        .ok_or(DomainError::GameNotFound(game_id))
}

/// Handles the `CreateGame` command: allocates an identifier, builds the game
/// and inserts it.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank name, or the store's error if
/// the insert fails.
pub async fn handle_create_game(
    command: &CreateGame,
    clock: &dyn Clock,
    store: &dyn GameStore,
) -> Result<GameCreated, DomainError> {
    let game = Game::create(GameId::new(), &command.player_name, clock)?;

    store.insert(&game.to_record()).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        game_id = %game.id,
        "game created"
    );

    Ok(GameCreated {
        game_id: game.id,
        player_name: command.player_name.clone(),
    })
}

/// Handles the `JoinGame` command.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound`, `DomainError::Validation` or
/// `DomainError::DuplicatePlayer`, or the store's error.
pub async fn handle_join_game(command: &JoinGame, store: &dyn GameStore) -> Result<(), DomainError> {
    let mut game = load(store, command.game_id).await?;

    let update = game.join(&command.player_name)?;
    store.update(command.game_id, update).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        game_id = %command.game_id,
        players = game.order().len(),
        "player joined"
    );

    Ok(())
}

/// Handles the `StartGame` command: shuffles the order with the injected RNG
/// and opens round 1.
///
/// The `Mutex` is locked only around the synchronous domain method call to
/// avoid holding a `MutexGuard` across await points.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound`, `DomainError::AlreadyStarted` or
/// `DomainError::NotCreator`, or the store's error.
pub async fn handle_start_game(
    command: &StartGame,
    rng: &Mutex<dyn DeterministicRng + Send>,
    store: &dyn GameStore,
) -> Result<(), DomainError> {
    let mut game = load(store, command.game_id).await?;

    let update = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("rng lock poisoned: {e}")))?;
        game.start(&command.player_name, &mut *rng_guard)?
    };

    store.update(command.game_id, update).await?;

    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        game_id = %command.game_id,
        order = ?game.order(),
        "game started"
    );

    Ok(())
}

/// Handles the `RecordScore` command.
///
/// After the score is written the record is read back, since other players
/// may have scored in the meantime, and the round rolls over if every player
/// has now submitted. The read and the rollover write are not guarded against
/// a concurrent final submission.
///
/// # Errors
///
/// Returns `DomainError::GameNotFound`, `DomainError::NotStarted` or
/// `DomainError::NotInGame`, or the store's error.
pub async fn handle_record_score(
    command: &RecordScore,
    store: &dyn GameStore,
) -> Result<ScoreOutcome, DomainError> {
    let mut game = load(store, command.game_id).await?;

    let update = game.record_score(&command.player_name, command.score)?;
    store.update(command.game_id, update).await?;

    debug!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        game_id = %command.game_id,
        player = %command.player_name,
        score = command.score,
        "score recorded"
    );

    let mut game = load(store, command.game_id).await?;
    let Some((round, update)) = game.advance_round() else {
        return Ok(ScoreOutcome::ScoreRecorded);
    };

    store.update(command.game_id, update).await?;

    info!(
        correlation_id = %command.correlation_id(),
        game_id = %command.game_id,
        round,
        order = ?game.order(),
        "round started"
    );

    Ok(ScoreOutcome::RoundStarted { round })
}
