use serde_json::{Value, json};
use tempfile::TempDir;

use crate::db::{
    Customer, CustomerFull, CustomerRepository, Database, Item, ItemFull, ItemRepository, Review,
    ReviewFull, ReviewRepository, SqliteDatabase,
};
use crate::export::*;

async fn setup_test_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    db
}

async fn seed(db: &SqliteDatabase) {
    let ana = db.customers().create(&Customer::new("Ana")).await.unwrap();
    let mug = db.items().create(&Item::new("Mug", 9.99)).await.unwrap();
    db.reviews()
        .create(&Review::new("Great", Some(ana.id), Some(mug.id)))
        .await
        .unwrap();
    db.reviews()
        .create(&Review::new("Who wrote this?", None, Some(mug.id)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_export_empty_database() {
    let db = setup_test_db().await;
    let temp_dir = TempDir::new().unwrap();

    let summary = export_all(&db, temp_dir.path()).await.unwrap();

    assert_eq!(summary, ExportSummary::default());
    for file in [CUSTOMERS_FILE, ITEMS_FILE, REVIEWS_FILE] {
        assert!(
            temp_dir.path().join(file).exists(),
            "File {} should exist",
            file
        );
    }
}

#[tokio::test]
async fn test_export_counts_every_entity() {
    let db = setup_test_db().await;
    seed(&db).await;
    let temp_dir = TempDir::new().unwrap();

    let summary = export_all(&db, temp_dir.path()).await.unwrap();

    assert_eq!(summary.customers, 1);
    assert_eq!(summary.items, 1);
    assert_eq!(summary.reviews, 2);
    assert_eq!(summary.total(), 4);
}

#[tokio::test]
async fn test_export_writes_full_forms() {
    let db = setup_test_db().await;
    seed(&db).await;
    let temp_dir = TempDir::new().unwrap();

    export_all(&db, temp_dir.path()).await.unwrap();

    let customers: Vec<Value> = read_jsonl(&temp_dir.path().join(CUSTOMERS_FILE)).unwrap();
    assert_eq!(
        customers,
        vec![json!({
            "id": 1,
            "name": "Ana",
            "reviews": [{"id": 1, "comment": "Great"}],
            "items": [{"id": 1, "name": "Mug"}]
        })]
    );

    let items: Vec<ItemFull> = read_jsonl(&temp_dir.path().join(ITEMS_FILE)).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].reviews.len(), 2);
    assert_eq!(items[0].customers.len(), 1, "anonymous review is skipped");

    let reviews: Vec<ReviewFull> = read_jsonl(&temp_dir.path().join(REVIEWS_FILE)).unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews[0].customer.is_some());
    assert!(reviews[1].customer.is_none());
    assert_eq!(reviews[1].item.as_ref().and_then(|i| i.price), Some(9.99));
}

#[tokio::test]
async fn test_export_matches_loaded_graphs() {
    let db = setup_test_db().await;
    seed(&db).await;
    let temp_dir = TempDir::new().unwrap();

    export_all(&db, temp_dir.path()).await.unwrap();

    let exported: Vec<CustomerFull> = read_jsonl(&temp_dir.path().join(CUSTOMERS_FILE)).unwrap();
    let loaded = db.customers().load(1).await.unwrap().to_full();
    assert_eq!(exported, vec![loaded]);
}

#[tokio::test]
async fn test_export_creates_missing_directory() {
    let db = setup_test_db().await;
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("snapshots").join("today");

    export_all(&db, &nested).await.unwrap();

    assert!(nested.join(CUSTOMERS_FILE).exists());
}
