//! Disc golf scoring API server entry point.

use std::sync::{Arc, Mutex};

use discgolf_api::config::Config;
use discgolf_api::error::AppError;
use discgolf_api::state::AppState;
use discgolf_api::telemetry;
use discgolf_core::clock::SystemClock;
use discgolf_core::rng::StdRandom;
use discgolf_store::pg_game_store::PgGameStore;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Read configuration from environment.
    let config = Config::from_env()?;

    let _telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting disc golf scoring API server");

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let rng = match config.rng_seed {
        Some(seed) => {
            tracing::warn!(seed, "shuffle RNG is seeded; game orders are reproducible");
            StdRandom::seeded(seed)
        }
        None => StdRandom::from_entropy(),
    };

    // Build application state.
    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(Mutex::new(rng)),
        Arc::new(PgGameStore::new(pool)),
    );

    let app = discgolf_api::app(app_state);

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
