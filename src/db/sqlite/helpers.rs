//! Shared helper functions for SQLite repositories.

use sqlx::Row;
use sqlx::error::ErrorKind;
use sqlx::sqlite::SqliteRow;

use crate::db::{Customer, DbError, Id, Item, PageSort, Review, SortOrder};

/// Validate and map a sort field to the actual column name.
/// Returns None for invalid fields (falls back to default).
pub fn validate_sort_field(field: &str, allowed: &[&str]) -> Option<&'static str> {
    if !allowed.contains(&field) {
        return None;
    }
    // Return static str to avoid lifetime issues
    match field {
        "id" => Some("id"),
        "name" => Some("name"),
        "price" => Some("price"),
        "comment" => Some("comment"),
        "customer_id" => Some("customer_id"),
        "item_id" => Some("item_id"),
        _ => None,
    }
}

/// Build ORDER BY clause from PageSort parameters.
pub fn build_order_clause(page: &PageSort, allowed_fields: &[&str], default_field: &str) -> String {
    let sort_field = page
        .sort_by
        .as_deref()
        .and_then(|f| validate_sort_field(f, allowed_fields))
        .unwrap_or(default_field);

    let order = match page.sort_order.unwrap_or(SortOrder::Asc) {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    // Secondary key keeps pages stable when the sort column has ties.
    if sort_field == "id" {
        format!("ORDER BY id {}", order)
    } else {
        format!("ORDER BY {} {}, id ASC", sort_field, order)
    }
}

/// Build LIMIT/OFFSET clause from PageSort parameters.
/// Note: SQL requires LIMIT when using OFFSET. If offset is provided without limit,
/// we use LIMIT -1 (SQLite's "no limit" value).
pub fn build_limit_offset_clause(page: &PageSort) -> String {
    let mut clause = String::new();

    let offset = page.offset.filter(|o| *o > 0);

    if let Some(limit) = page.limit {
        clause.push_str(&format!(" LIMIT {}", limit));
    } else if offset.is_some() {
        clause.push_str(" LIMIT -1");
    }

    if let Some(offset) = offset {
        clause.push_str(&format!(" OFFSET {}", offset));
    }

    clause
}

/// Build a WHERE clause from already-rendered conditions.
pub fn build_where_clause(conditions: &[&str]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

/// Translate a sqlx error into a storage-agnostic [`DbError`].
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    if let sqlx::Error::Database(db_err) = &e {
        let is_fk = matches!(db_err.kind(), ErrorKind::ForeignKeyViolation)
            || db_err.message().contains("FOREIGN KEY constraint failed");
        if is_fk {
            return DbError::Constraint {
                message: db_err.message().to_string(),
            };
        }
    }
    DbError::Database {
        message: e.to_string(),
    }
}

/// Like [`map_sqlx_error`], but reports a primary-key collision on insert
/// as [`DbError::AlreadyExists`].
pub fn map_insert_error(e: sqlx::Error, entity_type: &str, id: Id) -> DbError {
    if let sqlx::Error::Database(db_err) = &e
        && (matches!(db_err.kind(), ErrorKind::UniqueViolation)
            || db_err.message().contains("UNIQUE constraint failed"))
    {
        return DbError::AlreadyExists {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        };
    }
    map_sqlx_error(e)
}

/// `0` means "let SQLite assign the rowid".
pub fn explicit_id(id: Id) -> Option<Id> {
    (id != 0).then_some(id)
}

pub fn customer_from_row(row: &SqliteRow) -> Customer {
    Customer {
        id: row.get("id"),
        name: row.get("name"),
    }
}

pub fn item_from_row(row: &SqliteRow) -> Item {
    Item {
        id: row.get("id"),
        name: row.get("name"),
        price: row.get("price"),
    }
}

pub fn review_from_row(row: &SqliteRow) -> Review {
    Review {
        id: row.get("id"),
        comment: row.get("comment"),
        customer_id: row.get("customer_id"),
        item_id: row.get("item_id"),
    }
}

/// Customer joined in as `c_id`, `c_name`; `None` when the join found nothing.
pub fn joined_customer(row: &SqliteRow) -> Option<Customer> {
    let id: Option<Id> = row.get("c_id");
    id.map(|id| Customer {
        id,
        name: row.get("c_name"),
    })
}

/// Item joined in as `i_id`, `i_name`, `i_price`; `None` when the join found nothing.
pub fn joined_item(row: &SqliteRow) -> Option<Item> {
    let id: Option<Id> = row.get("i_id");
    id.map(|id| Item {
        id,
        name: row.get("i_name"),
        price: row.get("i_price"),
    })
}
