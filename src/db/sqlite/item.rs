//! SQLite ItemRepository implementation.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::helpers::{
    build_limit_offset_clause, build_order_clause, build_where_clause, customer_from_row,
    explicit_id, item_from_row, joined_customer, map_insert_error, map_sqlx_error,
    review_from_row,
};
use crate::db::{
    Customer, DbError, DbResult, Id, Item, ItemQuery, ItemRepository, ItemWithReviews, ListResult,
    Review,
};

/// SQLx-backed item repository.
pub struct SqliteItemRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> ItemRepository for SqliteItemRepository<'a> {
    #[instrument(skip(self, item), fields(id = item.id))]
    async fn create(&self, item: &Item) -> DbResult<Item> {
        let result = sqlx::query("INSERT INTO items (id, name, price) VALUES (?, ?, ?)")
            .bind(explicit_id(item.id))
            .bind(&item.name)
            .bind(item.price)
            .execute(self.pool)
            .await
            .map_err(|e| map_insert_error(e, "Item", item.id))?;

        let id = result.last_insert_rowid();
        debug!(id, "Created item");

        Ok(Item {
            id,
            name: item.name.clone(),
            price: item.price,
        })
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Id) -> DbResult<Item> {
        let row = sqlx::query("SELECT id, name, price FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref()
            .map(item_from_row)
            .ok_or_else(|| DbError::not_found("Item", id))
    }

    #[instrument(skip(self, query))]
    async fn list(&self, query: Option<&ItemQuery>) -> DbResult<ListResult<Item>> {
        let default_query = ItemQuery::default();
        let query = query.unwrap_or(&default_query);
        let allowed_fields = ["id", "name", "price"];

        let order_clause = build_order_clause(&query.page, &allowed_fields, "id");
        let limit_clause = build_limit_offset_clause(&query.page);

        let name_pattern = query
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map(|n| format!("%{}%", n));

        let mut conditions = Vec::new();
        if name_pattern.is_some() {
            conditions.push("LOWER(name) LIKE LOWER(?)");
        }
        let where_clause = build_where_clause(&conditions);

        let sql = format!(
            "SELECT id, name, price FROM items {} {} {}",
            where_clause, order_clause, limit_clause
        );
        let count_sql = format!("SELECT COUNT(*) FROM items {}", where_clause);

        let mut sql_query = sqlx::query(&sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(pattern) = &name_pattern {
            sql_query = sql_query.bind(pattern);
            count_query = count_query.bind(pattern);
        }

        let rows = sql_query
            .fetch_all(self.pool)
            .await
            .map_err(map_sqlx_error)?;
        let items: Vec<Item> = rows.iter().map(item_from_row).collect();

        let total = count_query
            .fetch_one(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(ListResult {
            items,
            total: total as usize,
            limit: query.page.limit,
            offset: query.page.offset.unwrap_or(0),
        })
    }

    #[instrument(skip(self, item), fields(id = item.id))]
    async fn update(&self, item: &Item) -> DbResult<()> {
        let result = sqlx::query("UPDATE items SET name = ?, price = ? WHERE id = ?")
            .bind(&item.name)
            .bind(item.price)
            .bind(item.id)
            .execute(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", item.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reviews(&self, item_id: Id) -> DbResult<Vec<Review>> {
        let rows = sqlx::query(
            "SELECT id, comment, customer_id, item_id FROM reviews WHERE item_id = ? ORDER BY id",
        )
        .bind(item_id)
        .fetch_all(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(review_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn customers(&self, item_id: Id) -> DbResult<Vec<Customer>> {
        // Inner join drops reviews without a customer.
        let rows = sqlx::query(
            "SELECT c.id, c.name FROM reviews r \
             INNER JOIN customers c ON c.id = r.customer_id \
             WHERE r.item_id = ? ORDER BY r.id",
        )
        .bind(item_id)
        .fetch_all(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(customer_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn load(&self, id: Id) -> DbResult<ItemWithReviews> {
        let item = self.get(id).await?;

        let rows = sqlx::query(
            "SELECT r.id, r.comment, r.customer_id, r.item_id, \
             c.id AS c_id, c.name AS c_name \
             FROM reviews r LEFT JOIN customers c ON c.id = r.customer_id \
             WHERE r.item_id = ? ORDER BY r.id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().fold(ItemWithReviews::new(item), |graph, row| {
            graph.with_review(review_from_row(row), joined_customer(row))
        }))
    }
}
