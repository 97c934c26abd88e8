//! Domain layer: the game aggregate, its commands and the ordering rule.

pub mod aggregates;
pub mod commands;
pub mod ordering;
