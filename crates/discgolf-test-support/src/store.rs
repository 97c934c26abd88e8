//! Test stores — `GameStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use discgolf_core::error::DomainError;
use discgolf_core::id::GameId;
use discgolf_core::store::{GameRecord, GameStore, GameUpdate};

/// A game store held in a `HashMap`. Each call takes the lock once, so every
/// update is applied atomically. Also records each `update` call so tests can
/// assert on what was written.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: Mutex<HashMap<GameId, GameRecord>>,
    updates: Mutex<Vec<(GameId, GameUpdate)>>,
}

impl InMemoryGameStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = GameRecord>) -> Self {
        let store = Self::new();
        {
            let mut games = store.games.lock().unwrap();
            for record in records {
                games.insert(record.id, record);
            }
        }
        store
    }

    /// Returns a snapshot of the stored record for `id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn record(&self, id: GameId) -> Option<GameRecord> {
        self.games.lock().unwrap().get(&id).cloned()
    }

    /// Returns the number of stored games.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.lock().unwrap().len()
    }

    /// Returns `true` if no game has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of all `update` calls, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn updates(&self) -> Vec<(GameId, GameUpdate)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn get(&self, id: GameId) -> Result<Option<GameRecord>, DomainError> {
        Ok(self.games.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, record: &GameRecord) -> Result<(), DomainError> {
        self.games.lock().unwrap().insert(record.id, record.clone());
        Ok(())
    }

    async fn update(&self, id: GameId, update: GameUpdate) -> Result<(), DomainError> {
        let mut games = self.games.lock().unwrap();
        let record = games.get_mut(&id).ok_or(DomainError::GameNotFound(id))?;
        self.updates.lock().unwrap().push((id, update.clone()));
        update.apply_to(record);
        Ok(())
    }
}

/// A game store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingGameStore;

#[async_trait]
impl GameStore for FailingGameStore {
    async fn get(&self, _id: GameId) -> Result<Option<GameRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn insert(&self, _record: &GameRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn update(&self, _id: GameId, _update: GameUpdate) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
