//! Disc Golf Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the game
//! context, the store and the API depend on. It contains no
//! infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod id;
pub mod rng;
pub mod store;
