//! Disc Golf — game session context.
//!
//! Responsible for the lifecycle of one game: creation, joining, the
//! creator's start (with the one-time shuffle), score submission and the
//! round rollover that re-derives the turn order from the scores.

pub mod application;
pub mod domain;
