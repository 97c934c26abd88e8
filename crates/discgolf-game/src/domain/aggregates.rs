//! Aggregate root for the game context.

use chrono::{DateTime, Utc};
use discgolf_core::clock::Clock;
use discgolf_core::error::DomainError;
use discgolf_core::id::GameId;
use discgolf_core::rng::DeterministicRng;
use discgolf_core::store::{GameRecord, GameUpdate, Scores};

use super::ordering::calculate_next_round_order;

/// The aggregate root for one scoring session.
///
/// Each mutating method validates against the current state, applies the
/// change in memory and returns the [`GameUpdate`] the caller must persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Aggregate identifier.
    pub id: GameId,
    pub(crate) order: Vec<String>,
    pub(crate) started: bool,
    pub(crate) round: Option<u32>,
    pub(crate) scores: Scores,
    pub(crate) created_at: DateTime<Utc>,
}

fn require_name(player: &str) -> Result<(), DomainError> {
    if player.trim().is_empty() {
        return Err(DomainError::Validation("player name must not be blank".to_owned()));
    }
    Ok(())
}

/// Fisher–Yates shuffle: every permutation is equally likely given a uniform
/// `rng`.
fn shuffle(players: &mut [String], rng: &mut dyn DeterministicRng) {
    for i in (1..players.len()).rev() {
        let upper = u32::try_from(i).unwrap_or(u32::MAX);
        let j = usize::try_from(rng.next_u32_range(0, upper)).unwrap_or(i);
        players.swap(i, j.min(i));
    }
}

impl Game {
    /// Creates a new, unstarted game with `creator` as its only player.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `creator` is blank.
    pub fn create(id: GameId, creator: &str, clock: &dyn Clock) -> Result<Self, DomainError> {
        require_name(creator)?;
        Ok(Self {
            id,
            order: vec![creator.to_owned()],
            started: false,
            round: None,
            scores: Scores::new(),
            created_at: clock.now(),
        })
    }

    /// Rebuilds the aggregate from its stored representation.
    #[must_use]
    pub fn from_record(record: GameRecord) -> Self {
        Self {
            id: record.id,
            order: record.order,
            started: record.started,
            round: record.round,
            scores: record.scores,
            created_at: record.created_at,
        }
    }

    /// Returns the stored representation of the aggregate.
    #[must_use]
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            id: self.id,
            order: self.order.clone(),
            started: self.started,
            round: self.round,
            scores: self.scores.clone(),
            created_at: self.created_at,
        }
    }

    /// Turn order for the current round.
    #[must_use]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Whether the creator has started the game.
    #[must_use]
    pub fn started(&self) -> bool {
        self.started
    }

    /// Current round, `None` before the game starts.
    #[must_use]
    pub fn round(&self) -> Option<u32> {
        self.round
    }

    /// Scores submitted so far in the current round.
    #[must_use]
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// When the game was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Appends `player` to the turn order.
    ///
    /// Joining a started game is allowed; the newcomer must then score before
    /// the current round can roll over.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `player` is blank and
    /// `DomainError::DuplicatePlayer` if the name is already taken.
    pub fn join(&mut self, player: &str) -> Result<GameUpdate, DomainError> {
        require_name(player)?;
        if self.order.iter().any(|p| p == player) {
            return Err(DomainError::DuplicatePlayer {
                player: player.to_owned(),
            });
        }

        self.order.push(player.to_owned());
        Ok(GameUpdate::default().with_order(self.order.clone()))
    }

    /// Starts the game: shuffles the turn order and opens round 1.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadyStarted` if the game is running and
    /// `DomainError::NotCreator` if `player` is not first in the order.
    pub fn start(
        &mut self,
        player: &str,
        rng: &mut dyn DeterministicRng,
    ) -> Result<GameUpdate, DomainError> {
        if self.started {
            return Err(DomainError::AlreadyStarted(self.id));
        }
        if self.order.first().map(String::as_str) != Some(player) {
            return Err(DomainError::NotCreator {
                player: player.to_owned(),
            });
        }

        shuffle(&mut self.order, rng);
        self.started = true;
        self.round = Some(1);

        Ok(GameUpdate::default()
            .with_order(self.order.clone())
            .with_started(true)
            .with_round(1))
    }

    /// Records `player`'s score for the current round, overwriting any
    /// earlier submission in the same round.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotStarted` before the game starts and
    /// `DomainError::NotInGame` if `player` is not in the turn order.
    pub fn record_score(&mut self, player: &str, score: i32) -> Result<GameUpdate, DomainError> {
        if !self.started {
            return Err(DomainError::NotStarted(self.id));
        }
        if !self.order.iter().any(|p| p == player) {
            return Err(DomainError::NotInGame {
                player: player.to_owned(),
            });
        }

        self.scores.insert(player.to_owned(), score);
        Ok(GameUpdate::default().with_score(player, score))
    }

    /// Whether every player in the order has a score this round.
    ///
    /// Compares counts, not membership.
    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        self.started && !self.order.is_empty() && self.scores.len() == self.order.len()
    }

    /// Rolls over to the next round if the current one is complete.
    ///
    /// Returns the new round number and the update to persist, or `None` if
    /// some player has yet to score.
    pub fn advance_round(&mut self) -> Option<(u32, GameUpdate)> {
        if !self.is_round_complete() {
            return None;
        }

        let next_order = calculate_next_round_order(&self.order, &self.scores);
        let next_round = self.round.map_or(1, |r| r.saturating_add(1));

        self.order = next_order;
        self.round = Some(next_round);
        self.scores.clear();

        let update = GameUpdate::default()
            .with_order(self.order.clone())
            .with_round(next_round)
            .with_scores(Scores::new());
        Some((next_round, update))
    }
}
