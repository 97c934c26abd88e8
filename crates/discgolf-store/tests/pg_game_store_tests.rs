//! Integration tests for `PgGameStore`.
//!
//! These need a running PostgreSQL reachable through `DATABASE_URL`.

use chrono::{TimeZone, Utc};
use discgolf_core::error::DomainError;
use discgolf_core::id::GameId;
use discgolf_core::store::{GameRecord, GameStore, GameUpdate, Scores};
use discgolf_store::pg_game_store::PgGameStore;
use sqlx::PgPool;

/// Helper to build an unstarted `GameRecord`.
fn make_record(players: &[&str]) -> GameRecord {
    GameRecord {
        id: GameId::new(),
        order: players.iter().map(|&p| p.to_owned()).collect(),
        started: false,
        round: None,
        scores: Scores::new(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    }
}

// --- get ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_get_returns_none_for_nonexistent_game(pool: PgPool) {
    let store = PgGameStore::new(pool);

    let game = store.get(GameId::new()).await.unwrap();

    assert!(game.is_none());
}

// --- insert + get round-trip ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_and_get_round_trip(pool: PgPool) {
    let store = PgGameStore::new(pool);
    let record = make_record(&["ann", "bob"]);

    store.insert(&record).await.unwrap();

    let loaded = store.get(record.id).await.unwrap().unwrap();
    assert_eq!(loaded, record);
}

// --- update ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_sets_order_started_and_round_together(pool: PgPool) {
    let store = PgGameStore::new(pool);
    let record = make_record(&["ann", "bob", "cat"]);
    store.insert(&record).await.unwrap();

    let update = GameUpdate::default()
        .with_order(vec!["cat".to_owned(), "ann".to_owned(), "bob".to_owned()])
        .with_started(true)
        .with_round(1);
    store.update(record.id, update).await.unwrap();

    let loaded = store.get(record.id).await.unwrap().unwrap();
    assert_eq!(loaded.order, vec!["cat", "ann", "bob"]);
    assert!(loaded.started);
    assert_eq!(loaded.round, Some(1));
    assert!(loaded.scores.is_empty());
    assert_eq!(loaded.created_at, record.created_at);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_single_score_keeps_other_scores(pool: PgPool) {
    let store = PgGameStore::new(pool);
    let record = make_record(&["ann", "bob"]);
    store.insert(&record).await.unwrap();

    store
        .update(record.id, GameUpdate::default().with_score("ann", 4))
        .await
        .unwrap();
    store
        .update(record.id, GameUpdate::default().with_score("bob", -1))
        .await
        .unwrap();
    store
        .update(record.id, GameUpdate::default().with_score("ann", 2))
        .await
        .unwrap();

    let loaded = store.get(record.id).await.unwrap().unwrap();
    assert_eq!(loaded.scores.len(), 2);
    assert_eq!(loaded.scores.get("ann"), Some(&2));
    assert_eq!(loaded.scores.get("bob"), Some(&-1));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_replacing_scores_clears_them(pool: PgPool) {
    let store = PgGameStore::new(pool);
    let mut record = make_record(&["ann"]);
    record.started = true;
    record.round = Some(1);
    record.scores.insert("ann".to_owned(), 3);
    store.insert(&record).await.unwrap();

    store
        .update(
            record.id,
            GameUpdate::default().with_round(2).with_scores(Scores::new()),
        )
        .await
        .unwrap();

    let loaded = store.get(record.id).await.unwrap().unwrap();
    assert_eq!(loaded.round, Some(2));
    assert!(loaded.scores.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_nonexistent_game_returns_not_found(pool: PgPool) {
    let store = PgGameStore::new(pool);
    let id = GameId::new();

    let result = store
        .update(id, GameUpdate::default().with_started(true))
        .await;

    match result.unwrap_err() {
        DomainError::GameNotFound(missing) => assert_eq!(missing, id),
        other => panic!("expected GameNotFound, got {other:?}"),
    }
}
