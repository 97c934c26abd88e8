//! Application layer: command and query handlers over a `GameStore`.

pub mod command_handlers;
pub mod query_handlers;
