//! Commands for the game context.

use discgolf_core::command::Command;
use discgolf_core::id::GameId;
use uuid::Uuid;

/// Command to create a new game with its creator as the only player.
#[derive(Debug, Clone)]
pub struct CreateGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The creating player's name.
    pub player_name: String,
}

impl Command for CreateGame {
    fn command_type(&self) -> &'static str {
        "game.create"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add a player to the end of a game's turn order.
#[derive(Debug, Clone)]
pub struct JoinGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game to join.
    pub game_id: GameId,
    /// The joining player's name.
    pub player_name: String,
}

impl Command for JoinGame {
    fn command_type(&self) -> &'static str {
        "game.join"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to start a game. Only the creator may issue it.
#[derive(Debug, Clone)]
pub struct StartGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game to start.
    pub game_id: GameId,
    /// The player requesting the start.
    pub player_name: String,
}

impl Command for StartGame {
    fn command_type(&self) -> &'static str {
        "game.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to submit a player's score for the current round.
#[derive(Debug, Clone)]
pub struct RecordScore {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The game being played.
    pub game_id: GameId,
    /// The scoring player.
    pub player_name: String,
    /// The player's score for the round.
    pub score: i32,
}

impl Command for RecordScore {
    fn command_type(&self) -> &'static str {
        "game.record_score"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
