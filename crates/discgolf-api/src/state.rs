//! Shared application state.

use std::sync::{Arc, Mutex};

use discgolf_core::clock::Clock;
use discgolf_core::rng::DeterministicRng;
use discgolf_core::store::GameStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to stamp new games.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// RNG for the start-of-game shuffle.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Game persistence.
    pub game_store: Arc<dyn GameStore>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        game_store: Arc<dyn GameStore>,
    ) -> Self {
        Self {
            clock,
            rng,
            game_store,
        }
    }
}
