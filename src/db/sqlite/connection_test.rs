//! Tests for SQLite database connection and schema creation.

use crate::config::DbConfig;
use crate::db::{Database, SqliteDatabase};

async fn table_sql(db: &SqliteDatabase, table: &str) -> String {
    sqlx::query_scalar("SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?")
        .bind(table)
        .fetch_one(db.pool())
        .await
        .expect("Table should exist")
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_creates_all_tables() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("Migration should succeed");

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Query should succeed");

    assert_eq!(tables, vec!["customers", "items", "reviews"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_names_foreign_keys_by_convention() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();

    let sql = table_sql(&db, "reviews").await;
    assert!(sql.contains("CONSTRAINT fk_reviews_customer_id_customers"));
    assert!(sql.contains("CONSTRAINT fk_reviews_item_id_items"));

    let fks: Vec<(String, String)> =
        sqlx::query_as("SELECT \"table\", \"from\" FROM pragma_foreign_key_list('reviews') ORDER BY \"from\"")
            .fetch_all(db.pool())
            .await
            .expect("Query should succeed");
    assert_eq!(
        fks,
        vec![
            ("customers".to_string(), "customer_id".to_string()),
            ("items".to_string(), "item_id".to_string()),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_creates_link_indexes() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();

    let indexes: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type='index' AND tbl_name='reviews' ORDER BY name",
    )
    .fetch_all(db.pool())
    .await
    .unwrap();

    assert_eq!(indexes, vec!["ix_reviews_customer_id", "ix_reviews_item_id"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory().await.unwrap();

    db.migrate().await.expect("First migration should succeed");
    sqlx::query("INSERT INTO customers (id, name) VALUES (1, 'Ana')")
        .execute(db.pool())
        .await
        .unwrap();
    db.migrate().await.expect("Second migration should succeed");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1, "Re-running the schema must keep existing rows");
}

#[tokio::test(flavor = "multi_thread")]
async fn foreign_keys_are_enforced() {
    let db = SqliteDatabase::in_memory().await.unwrap();

    let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(enabled, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn file_database_persists_across_connections() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("shop.db");

    {
        let db = SqliteDatabase::connect(&DbConfig::file(&path)).await.unwrap();
        db.migrate().await.unwrap();
        sqlx::query("INSERT INTO items (id, name, price) VALUES (5, 'Mug', 9.99)")
            .execute(db.pool())
            .await
            .unwrap();
        db.close().await;
    }

    assert!(path.exists(), "Database file and parent dir should be created");

    let db = SqliteDatabase::open(&path).await.unwrap();
    let name: String = sqlx::query_scalar("SELECT name FROM items WHERE id = 5")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(name, "Mug");
}
