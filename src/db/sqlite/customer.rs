//! SQLite CustomerRepository implementation.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::helpers::{
    build_limit_offset_clause, build_order_clause, build_where_clause, customer_from_row,
    explicit_id, item_from_row, joined_item, map_insert_error, map_sqlx_error, review_from_row,
};
use crate::db::{
    Customer, CustomerQuery, CustomerRepository, CustomerWithReviews, DbError, DbResult, Id, Item,
    ListResult, Review,
};

/// SQLx-backed customer repository.
pub struct SqliteCustomerRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> CustomerRepository for SqliteCustomerRepository<'a> {
    #[instrument(skip(self, customer), fields(id = customer.id))]
    async fn create(&self, customer: &Customer) -> DbResult<Customer> {
        let result = sqlx::query("INSERT INTO customers (id, name) VALUES (?, ?)")
            .bind(explicit_id(customer.id))
            .bind(&customer.name)
            .execute(self.pool)
            .await
            .map_err(|e| map_insert_error(e, "Customer", customer.id))?;

        let id = result.last_insert_rowid();
        debug!(id, "Created customer");

        Ok(Customer {
            id,
            name: customer.name.clone(),
        })
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Id) -> DbResult<Customer> {
        let row = sqlx::query("SELECT id, name FROM customers WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref()
            .map(customer_from_row)
            .ok_or_else(|| DbError::not_found("Customer", id))
    }

    #[instrument(skip(self, query))]
    async fn list(&self, query: Option<&CustomerQuery>) -> DbResult<ListResult<Customer>> {
        let default_query = CustomerQuery::default();
        let query = query.unwrap_or(&default_query);
        let allowed_fields = ["id", "name"];

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
            "SELECT id, name FROM customers {} {} {}",
            where_clause, order_clause, limit_clause
        );
        let count_sql = format!("SELECT COUNT(*) FROM customers {}", where_clause);

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
        let items: Vec<Customer> = rows.iter().map(customer_from_row).collect();

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

    #[instrument(skip(self, customer), fields(id = customer.id))]
    async fn update(&self, customer: &Customer) -> DbResult<()> {
        let result = sqlx::query("UPDATE customers SET name = ? WHERE id = ?")
            .bind(&customer.name)
            .bind(customer.id)
            .execute(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", customer.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn reviews(&self, customer_id: Id) -> DbResult<Vec<Review>> {
        let rows = sqlx::query(
            "SELECT id, comment, customer_id, item_id FROM reviews WHERE customer_id = ? ORDER BY id",
        )
        .bind(customer_id)
        .fetch_all(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(review_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn items(&self, customer_id: Id) -> DbResult<Vec<Item>> {
        // Inner join drops reviews without an item.
        let rows = sqlx::query(
            "SELECT i.id, i.name, i.price FROM reviews r \
             INNER JOIN items i ON i.id = r.item_id \
             WHERE r.customer_id = ? ORDER BY r.id",
        )
        .bind(customer_id)
        .fetch_all(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.iter().map(item_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn load(&self, id: Id) -> DbResult<CustomerWithReviews> {
        let customer = self.get(id).await?;

        let rows = sqlx::query(
            "SELECT r.id, r.comment, r.customer_id, r.item_id, \
             i.id AS i_id, i.name AS i_name, i.price AS i_price \
             FROM reviews r LEFT JOIN items i ON i.id = r.item_id \
             WHERE r.customer_id = ? ORDER BY r.id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .iter()
            .fold(CustomerWithReviews::new(customer), |graph, row| {
                graph.with_review(review_from_row(row), joined_item(row))
            }))
    }
}
