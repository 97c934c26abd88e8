//! Shared test doubles for the disc golf scoring service.

mod clock;
mod rng;
mod store;

pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingGameStore, InMemoryGameStore};
