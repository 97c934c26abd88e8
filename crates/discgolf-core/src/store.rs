//! Game store abstraction.
//!
//! One document per game, addressed by [`GameId`]. Implementations must
//! apply every field of a single [`GameUpdate`] atomically.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::GameId;

/// Per-round scores keyed by player name.
pub type Scores = BTreeMap<String, i32>;

/// Stored representation of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Game identifier.
    pub id: GameId,
    /// Turn order for the current round.
    pub order: Vec<String>,
    /// Whether the creator has started the game.
    pub started: bool,
    /// Current round, absent until the game starts.
    pub round: Option<u32>,
    /// Scores submitted in the current round.
    pub scores: Scores,
    /// Timestamp of game creation.
    pub created_at: DateTime<Utc>,
}

/// A partial update of a [`GameRecord`]. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameUpdate {
    /// Replacement turn order.
    pub order: Option<Vec<String>>,
    /// New started flag.
    pub started: Option<bool>,
    /// New round number.
    pub round: Option<u32>,
    /// Replacement score map.
    pub scores: Option<Scores>,
    /// A single score entry to set, applied after `scores`.
    pub score: Option<(String, i32)>,
}

impl GameUpdate {
    /// Sets the turn order.
    #[must_use]
    pub fn with_order(mut self, order: Vec<String>) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the started flag.
    #[must_use]
    pub fn with_started(mut self, started: bool) -> Self {
        self.started = Some(started);
        self
    }

    /// Sets the round number.
    #[must_use]
    pub fn with_round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    /// Replaces the whole score map.
    #[must_use]
    pub fn with_scores(mut self, scores: Scores) -> Self {
        self.scores = Some(scores);
        self
    }

    /// Sets one player's score, leaving the other entries untouched.
    #[must_use]
    pub fn with_score(mut self, player: impl Into<String>, score: i32) -> Self {
        self.score = Some((player.into(), score));
        self
    }

    /// Applies this update to an in-memory record.
    pub fn apply_to(self, record: &mut GameRecord) {
        if let Some(order) = self.order {
            record.order = order;
        }
        if let Some(started) = self.started {
            record.started = started;
        }
        if let Some(round) = self.round {
            record.round = Some(round);
        }
        if let Some(scores) = self.scores {
            record.scores = scores;
        }
        if let Some((player, score)) = self.score {
            record.scores.insert(player, score);
        }
    }
}

/// Store trait for loading and persisting game records.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Load a game by identifier. Returns `Ok(None)` if it does not exist.
    async fn get(&self, id: GameId) -> Result<Option<GameRecord>, DomainError>;

    /// Insert a newly created game.
    async fn insert(&self, record: &GameRecord) -> Result<(), DomainError>;

    /// Apply a partial update atomically.
    ///
    /// Returns `DomainError::GameNotFound` when no record matches `id`.
    async fn update(&self, id: GameId, update: GameUpdate) -> Result<(), DomainError>;
}
