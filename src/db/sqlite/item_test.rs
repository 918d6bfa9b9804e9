//! Tests for SqliteItemRepository.

use crate::db::{
    Database, DbError, Item, ItemQuery, ItemRepository, PageSort, SortOrder, SqliteDatabase,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn make_item(id: i64, name: &str, price: Option<f64>) -> Item {
    Item {
        id,
        name: Some(name.to_string()),
        price,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn item_create_and_get() {
    let db = setup_db().await;
    let items = db.items();

    let created = items
        .create(&make_item(5, "Mug", Some(9.99)))
        .await
        .expect("Create should succeed");

    let retrieved = items.get(5).await.expect("Get should succeed");
    assert_eq!(retrieved, created);
    assert_eq!(retrieved.price, Some(9.99));
}

#[tokio::test(flavor = "multi_thread")]
async fn item_price_is_nullable_and_unchecked() {
    let db = setup_db().await;
    let items = db.items();

    let unpriced = items.create(&make_item(0, "Sample", None)).await.unwrap();
    let negative = items.create(&make_item(0, "Refund", Some(-3.5))).await.unwrap();

    assert_eq!(items.get(unpriced.id).await.unwrap().price, None);
    assert_eq!(items.get(negative.id).await.unwrap().price, Some(-3.5));
}

#[tokio::test(flavor = "multi_thread")]
async fn item_get_nonexistent_returns_not_found() {
    let db = setup_db().await;

    let result = db.items().get(404).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn item_update() {
    let db = setup_db().await;
    let items = db.items();

    let mut item = items.create(&make_item(5, "Mug", Some(9.99))).await.unwrap();
    item.price = Some(12.5);
    item.name = None;
    items.update(&item).await.expect("Update should succeed");

    assert_eq!(items.get(5).await.unwrap(), item);
}

#[tokio::test(flavor = "multi_thread")]
async fn item_update_nonexistent_returns_not_found() {
    let db = setup_db().await;

    let result = db.items().update(&make_item(9, "Ghost", None)).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn item_delete() {
    let db = setup_db().await;
    let items = db.items();

    items.create(&make_item(5, "Mug", Some(9.99))).await.unwrap();
    items.delete(5).await.expect("Delete should succeed");

    assert!(matches!(items.get(5).await, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn item_list_sorted_by_price() {
    let db = setup_db().await;
    let items = db.items();

    items.create(&make_item(1, "Mug", Some(9.99))).await.unwrap();
    items.create(&make_item(2, "Plate", Some(4.5))).await.unwrap();
    items.create(&make_item(3, "Teapot", Some(30.0))).await.unwrap();

    let query = ItemQuery {
        page: PageSort {
            sort_by: Some("price".to_string()),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        },
        ..Default::default()
    };
    let result = items.list(Some(&query)).await.unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(
        result.items.iter().map(|i| i.id).collect::<Vec<_>>(),
        vec![2, 1, 3]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn item_list_name_filter_counts_matches_only() {
    let db = setup_db().await;
    let items = db.items();

    items.create(&make_item(1, "Coffee Mug", None)).await.unwrap();
    items.create(&make_item(2, "Travel mug", None)).await.unwrap();
    items.create(&make_item(3, "Plate", None)).await.unwrap();

    let query = ItemQuery {
        page: PageSort {
            limit: Some(1),
            ..Default::default()
        },
        name: Some("MUG".to_string()),
    };
    let result = items.list(Some(&query)).await.unwrap();

    assert_eq!(result.total, 2);
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].id, 1);
}
