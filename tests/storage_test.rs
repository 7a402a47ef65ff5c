use std::collections::HashSet;

use chrono::Utc;
use todo_store::db::{SCHEMA_VERSION, SqliteTodoStore, TodoStore, open_pool};
use todo_store::models::TodoStatus;
use todo_store::services::Filter;

async fn empty_store() -> SqliteTodoStore {
    let pool = open_pool("sqlite::memory:")
        .await
        .expect("Failed to create database");
    SqliteTodoStore::new(pool)
}

async fn migrated_store() -> SqliteTodoStore {
    let store = empty_store().await;
    store
        .migrate(SCHEMA_VERSION)
        .await
        .expect("Failed to run migrations");
    store
}

#[tokio::test]
async fn test_buy_milk_scenario() {
    let store = empty_store().await;

    store.migrate(1).await.expect("Failed to migrate");
    assert_eq!(store.schema_version().await.unwrap(), 1);
    assert!(store.list_all().await.unwrap().is_empty());

    let before = Utc::now();
    store.insert("buy milk").await.expect("Failed to insert");

    let todos = store.list_all().await.unwrap();
    assert_eq!(todos.len(), 1);
    let inserted = todos[0].clone();
    assert_eq!(inserted.text, "buy milk");
    assert_eq!(inserted.status, TodoStatus::Pending);
    let created = inserted.created_instant().expect("createdAt should parse");
    assert!((created - before).num_seconds().abs() < 5);

    store
        .update_status(&inserted.id, TodoStatus::Done)
        .await
        .expect("Failed to update status");

    let todos = store.list_all().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].status, TodoStatus::Done);
    assert_eq!(todos[0].id, inserted.id);
    assert_eq!(todos[0].text, inserted.text);
    assert_eq!(todos[0].created_at, inserted.created_at);
}

#[tokio::test]
async fn test_migrate_is_idempotent_with_seed() {
    let pool = open_pool("sqlite::memory:").await.unwrap();
    let store = SqliteTodoStore::new(pool)
        .with_seed(vec!["first".to_string(), "second".to_string()]);

    store.migrate(SCHEMA_VERSION).await.unwrap();
    let first_version = store.schema_version().await.unwrap();
    let first_rows = store.list_all().await.unwrap().len();

    store.migrate(SCHEMA_VERSION).await.unwrap();

    assert_eq!(store.schema_version().await.unwrap(), first_version);
    assert_eq!(store.list_all().await.unwrap().len(), first_rows);
    assert_eq!(first_rows, 2);
    assert!(
        store
            .list_all()
            .await
            .unwrap()
            .iter()
            .all(|t| t.status == TodoStatus::Pending)
    );
}

#[tokio::test]
async fn test_inserted_ids_are_unique() {
    let store = migrated_store().await;

    for i in 0..20 {
        store.insert(&format!("item {}", i)).await.unwrap();
    }

    let todos = store.list_all().await.unwrap();
    let ids: HashSet<&str> = todos.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(todos.len(), 20);
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn test_update_status_leaves_other_records_alone() {
    let store = migrated_store().await;
    let a = store.insert("a").await.unwrap();
    let b = store.insert("b").await.unwrap();

    store.update_status(&a.id, TodoStatus::Done).await.unwrap();

    let todos = store.list_all().await.unwrap();
    let b_after = todos.iter().find(|t| t.id == b.id).unwrap();
    assert_eq!(b_after, &b);
}

#[tokio::test]
async fn test_update_status_unknown_id() {
    let store = migrated_store().await;
    let a = store.insert("a").await.unwrap();

    store
        .update_status("00000000-0000-0000-0000-000000000000", TodoStatus::Done)
        .await
        .expect("unknown id should be a no-op");

    assert_eq!(store.list_all().await.unwrap(), vec![a]);
}

#[tokio::test]
async fn test_pending_filter_over_listed_records() {
    let store = migrated_store().await;
    let keep = store.insert("write report").await.unwrap();
    let finish = store.insert("call mom").await.unwrap();
    store.update_status(&finish.id, TodoStatus::Done).await.unwrap();

    let todos = store.list_all().await.unwrap();
    let pending = Filter::Pending.apply(&todos);

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, keep.id);
}

#[tokio::test]
async fn test_file_database_persists_across_pools() {
    let path = std::env::temp_dir().join(format!("todo-store-{}.db", uuid::Uuid::new_v4()));
    let url = format!("sqlite://{}", path.display());

    {
        let pool = open_pool(&url).await.unwrap();
        let store = SqliteTodoStore::new(pool.clone());
        store.migrate(SCHEMA_VERSION).await.unwrap();
        store.insert("survives restart").await.unwrap();
        pool.close().await;
    }

    let pool = open_pool(&url).await.unwrap();
    let store = SqliteTodoStore::new(pool.clone());
    store.migrate(SCHEMA_VERSION).await.unwrap();

    let todos = store.list_all().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "survives restart");

    pool.close().await;
    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_failed_first_migrate_does_not_duplicate_seed() {
    let pool = open_pool("sqlite::memory:").await.unwrap();

    let broken = SqliteTodoStore::new(pool.clone())
        .with_seed(vec!["a".to_string(), " ".to_string()]);
    assert!(broken.migrate(SCHEMA_VERSION).await.is_err());
    assert_eq!(broken.schema_version().await.unwrap(), 0);

    let store = SqliteTodoStore::new(pool).with_seed(vec!["a".to_string()]);
    store.migrate(SCHEMA_VERSION).await.unwrap();

    let texts: Vec<String> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert_eq!(texts, vec!["a".to_string()]);
    assert_eq!(store.schema_version().await.unwrap(), 1);
}

#[tokio::test]
async fn test_find_by_id() {
    let store = migrated_store().await;
    let a = store.insert("a").await.unwrap();
    store.insert("b").await.unwrap();

    let found = store.find_by_id(&a.id).await.unwrap();
    assert_eq!(found, Some(a));
    assert_eq!(store.find_by_id("missing").await.unwrap(), None);
}
