//! SQLite ReviewRepository implementation.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::helpers::{
    build_limit_offset_clause, build_order_clause, build_where_clause, explicit_id,
    joined_customer, joined_item, map_insert_error, map_sqlx_error, review_from_row,
};
use crate::db::{
    DbError, DbResult, Id, ListResult, Review, ReviewQuery, ReviewRepository, ReviewWithLinks,
};

/// SQLx-backed review repository.
pub struct SqliteReviewRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> ReviewRepository for SqliteReviewRepository<'a> {
    #[instrument(skip(self, review), fields(id = review.id))]
    async fn create(&self, review: &Review) -> DbResult<Review> {
        let result = sqlx::query(
            "INSERT INTO reviews (id, comment, customer_id, item_id) VALUES (?, ?, ?, ?)",
        )
        .bind(explicit_id(review.id))
        .bind(&review.comment)
        .bind(review.customer_id)
        .bind(review.item_id)
        .execute(self.pool)
        .await
        .map_err(|e| map_insert_error(e, "Review", review.id))?;

        let id = result.last_insert_rowid();
        debug!(id, customer_id = ?review.customer_id, item_id = ?review.item_id, "Created review");

        Ok(Review {
            id,
            comment: review.comment.clone(),
            customer_id: review.customer_id,
            item_id: review.item_id,
        })
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Id) -> DbResult<Review> {
        let row = sqlx::query("SELECT id, comment, customer_id, item_id FROM reviews WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref()
            .map(review_from_row)
            .ok_or_else(|| DbError::not_found("Review", id))
    }

    #[instrument(skip(self, query))]
    async fn list(&self, query: Option<&ReviewQuery>) -> DbResult<ListResult<Review>> {
        let default_query = ReviewQuery::default();
        let query = query.unwrap_or(&default_query);
        let allowed_fields = ["id", "comment", "customer_id", "item_id"];

        let order_clause = build_order_clause(&query.page, &allowed_fields, "id");
        let limit_clause = build_limit_offset_clause(&query.page);

        let mut conditions = Vec::new();
        let mut bind_values: Vec<Id> = Vec::new();
        if let Some(customer_id) = query.customer_id {
            conditions.push("customer_id = ?");
            bind_values.push(customer_id);
        }
        if let Some(item_id) = query.item_id {
            conditions.push("item_id = ?");
            bind_values.push(item_id);
        }
        let where_clause = build_where_clause(&conditions);

        let sql = format!(
            "SELECT id, comment, customer_id, item_id FROM reviews {} {} {}",
            where_clause, order_clause, limit_clause
        );
        let count_sql = format!("SELECT COUNT(*) FROM reviews {}", where_clause);

        let mut sql_query = sqlx::query(&sql);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in &bind_values {
            sql_query = sql_query.bind(*value);
            count_query = count_query.bind(*value);
        }

        let rows = sql_query
            .fetch_all(self.pool)
            .await
            .map_err(map_sqlx_error)?;
        let items: Vec<Review> = rows.iter().map(review_from_row).collect();

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

    #[instrument(skip(self, review), fields(id = review.id))]
    async fn update(&self, review: &Review) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE reviews SET comment = ?, customer_id = ?, item_id = ? WHERE id = ?",
        )
        .bind(&review.comment)
        .bind(review.customer_id)
        .bind(review.item_id)
        .bind(review.id)
        .execute(self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Review", review.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Review", id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn load(&self, id: Id) -> DbResult<ReviewWithLinks> {
        let row = sqlx::query(
            "SELECT r.id, r.comment, r.customer_id, r.item_id, \
             c.id AS c_id, c.name AS c_name, \
             i.id AS i_id, i.name AS i_name, i.price AS i_price \
             FROM reviews r \
             LEFT JOIN customers c ON c.id = r.customer_id \
             LEFT JOIN items i ON i.id = r.item_id \
             WHERE r.id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| DbError::not_found("Review", id))?;

        Ok(ReviewWithLinks::new(
            review_from_row(&row),
            joined_customer(&row),
            joined_item(&row),
        ))
    }
}
