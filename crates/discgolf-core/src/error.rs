//! Domain error types.

use thiserror::Error;

use crate::id::GameId;

/// Top-level domain error type.
///
/// Every variant except `Infrastructure` is caused by the caller's input and
/// is reported back verbatim; none of them are retried.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required input field was missing or blank.
    #[error("validation error: {0}")]
    Validation(String),

    /// No game exists with the given identifier.
    #[error("game not found: {0}")]
    GameNotFound(GameId),

    /// The game has already been started.
    #[error("game {0} has already started")]
    AlreadyStarted(GameId),

    /// Someone other than the creator tried to start the game.
    #[error("only the game creator can start the game (requested by {player})")]
    NotCreator {
        /// The player who attempted the start.
        player: String,
    },

    /// A score was submitted before the game was started.
    #[error("game {0} has not started yet")]
    NotStarted(GameId),

    /// A score was submitted for a player who is not part of the game.
    #[error("player {player} is not in the game")]
    NotInGame {
        /// The unknown player.
        player: String,
    },

    /// A player tried to join a game they are already in.
    #[error("player {player} has already joined the game")]
    DuplicatePlayer {
        /// The duplicate player.
        player: String,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
