//! `PostgreSQL` implementation of the `GameStore` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use discgolf_core::error::DomainError;
use discgolf_core::id::GameId;
use discgolf_core::store::{GameRecord, GameStore, GameUpdate, Scores};

const SELECT_GAME: &str = r"
SELECT id, turn_order, started, round, scores, created_at
FROM games
WHERE id = $1
";

const INSERT_GAME: &str = r"
INSERT INTO games (id, turn_order, started, round, scores, created_at)
VALUES ($1, $2, $3, $4, $5, $6)
";

// Unset fields bind as NULL and keep their current value. The single-score
// write is layered on top of any score-map replacement in the same statement.
const UPDATE_GAME: &str = r"
UPDATE games SET
    turn_order = COALESCE($2::jsonb, turn_order),
    started    = COALESCE($3::boolean, started),
    round      = COALESCE($4::int4, round),
    scores     = CASE
        WHEN $6::text IS NULL THEN COALESCE($5::jsonb, scores)
        ELSE jsonb_set(COALESCE($5::jsonb, scores), ARRAY[$6::text], to_jsonb($7::int4))
    END
WHERE id = $1
";

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::Infrastructure(format!("{context}: {e}"))
}

fn round_to_db(round: Option<u32>) -> Result<Option<i32>, DomainError> {
    round
        .map(i32::try_from)
        .transpose()
        .map_err(|e| DomainError::Infrastructure(format!("round out of range: {e}")))
}

fn record_from_row(row: &PgRow) -> Result<GameRecord, sqlx::Error> {
    let id: Uuid = row.try_get("id")?;
    let Json(order): Json<Vec<String>> = row.try_get("turn_order")?;
    let started: bool = row.try_get("started")?;
    let round: Option<i32> = row.try_get("round")?;
    let Json(scores): Json<Scores> = row.try_get("scores")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    let round = round
        .map(u32::try_from)
        .transpose()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(GameRecord {
        id: GameId::from(id),
        order,
        started,
        round,
        scores,
        created_at,
    })
}

/// PostgreSQL-backed game store.
#[derive(Debug, Clone)]
pub struct PgGameStore {
    pool: PgPool,
}

impl PgGameStore {
    /// Creates a new `PgGameStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameStore for PgGameStore {
    async fn get(&self, id: GameId) -> Result<Option<GameRecord>, DomainError> {
        let row = sqlx::query(SELECT_GAME)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("failed to load game"))?;

        row.as_ref()
            .map(record_from_row)
            .transpose()
            .map_err(db_error("failed to decode game"))
    }

    async fn insert(&self, record: &GameRecord) -> Result<(), DomainError> {
        sqlx::query(INSERT_GAME)
            .bind(record.id.as_uuid())
            .bind(Json(&record.order))
            .bind(record.started)
            .bind(round_to_db(record.round)?)
            .bind(Json(&record.scores))
            .bind(record.created_at)
            .execute(&self.pool)
            .await
            .map_err(db_error("failed to insert game"))?;

        tracing::debug!(game_id = %record.id, "game inserted");
        Ok(())
    }

    async fn update(&self, id: GameId, update: GameUpdate) -> Result<(), DomainError> {
        let (score_player, score_value) = match update.score {
            Some((player, score)) => (Some(player), Some(score)),
            None => (None, None),
        };

        let result = sqlx::query(UPDATE_GAME)
            .bind(id.as_uuid())
            .bind(update.order.map(Json))
            .bind(update.started)
            .bind(round_to_db(update.round)?)
            .bind(update.scores.map(Json))
            .bind(score_player)
            .bind(score_value)
            .execute(&self.pool)
            .await
            .map_err(db_error("failed to update game"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GameNotFound(id));
        }
        Ok(())
    }
}
