use super::*;
use crate::db;
use sqlx::sqlite::SqlitePoolOptions;

// Single connection so every query sees the same in-memory database.
async fn test_store() -> MessageStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    db::init_schema(&pool).await.expect("schema");
    MessageStore::new(pool)
}

// Insert with an explicit timestamp, bypassing create's now() stamp, so
// ordering tests don't depend on same-second ties.
async fn seed_at(store: &MessageStore, name: &str, text: &str, created_at: &str) {
    sqlx::query("INSERT INTO messages (name,text,created_at) VALUES (?,?,?)")
        .bind(name)
        .bind(text)
        .bind(created_at)
        .execute(&store.pool)
        .await
        .expect("seed insert");
}

#[tokio::test]
async fn create_assigns_id_and_second_precision_timestamp() {
    let store = test_store().await;

    let msg = store.create("Alice", "Hello there world").await.expect("create");

    assert!(msg.id > 0);
    assert_eq!(msg.name, "Alice");
    assert_eq!(msg.text, "Hello there world");
    assert_eq!(msg.created_at.nanosecond(), 0);
}

#[tokio::test]
async fn create_assigns_fresh_ids() {
    let store = test_store().await;

    let first = store.create("Alice", "Hello there world").await.expect("create");
    let second = store.create("Bob", "Another fine message").await.expect("create");

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn created_message_appears_in_listing() {
    let store = test_store().await;

    let created = store.create("Alice", "Hello there world").await.expect("create");
    let listed = store.list_all_by_recency().await.expect("list");

    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn listing_orders_most_recent_first() {
    let store = test_store().await;
    seed_at(&store, "middle", "written in between", "2026-08-23T10:30:00Z").await;
    seed_at(&store, "newest", "written most recently", "2026-08-23T11:00:00Z").await;
    seed_at(&store, "oldest", "written the earliest", "2026-08-23T10:00:00Z").await;

    let listed = store.list_all_by_recency().await.expect("list");

    let names: Vec<&str> = listed.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn listing_twice_without_writes_is_identical() {
    let store = test_store().await;
    seed_at(&store, "Alice", "Hello there world", "2026-08-23T10:00:00Z").await;
    seed_at(&store, "Bob", "Another fine message", "2026-08-23T11:00:00Z").await;

    let first = store.list_all_by_recency().await.expect("list");
    let second = store.list_all_by_recency().await.expect("list");

    assert_eq!(first, second);
}

#[tokio::test]
async fn find_by_name_returns_match() {
    let store = test_store().await;
    let created = store.create("Alice", "Hello there world").await.expect("create");

    let found = store.find_by_name("Alice").await.expect("find");

    assert_eq!(found, Some(created));
}

#[tokio::test]
async fn find_by_name_misses_unknown_name() {
    let store = test_store().await;
    store.create("Alice", "Hello there world").await.expect("create");

    let found = store.find_by_name("Bob").await.expect("find");

    assert_eq!(found, None);
}

#[tokio::test]
async fn message_serializes_without_id() {
    let store = test_store().await;
    seed_at(&store, "Alice", "Hello there world", "2026-08-23T10:00:00Z").await;

    let listed = store.list_all_by_recency().await.expect("list");
    let json = serde_json::to_value(&listed[0]).expect("serialize");

    assert_eq!(
        json,
        serde_json::json!({
            "name": "Alice",
            "text": "Hello there world",
            "created_at": "2026-08-23T10:00:00Z",
        })
    );
}
