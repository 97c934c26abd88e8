//! Disc Golf Store — PostgreSQL persistence for game records.

pub mod pg_game_store;
