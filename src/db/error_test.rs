//! Tests for database error types.

use crate::db::{DbError, DbResult};

#[test]
fn not_found_error_displays_correctly() {
    let err = DbError::NotFound {
        entity_type: "Customer".to_string(),
        id: "42".to_string(),
    };
    assert_eq!(err.to_string(), "Entity not found: Customer with id '42'");
}

#[test]
fn not_found_helper_formats_numeric_ids() {
    let err = DbError::not_found("Item", 7_i64);
    assert_eq!(err.to_string(), "Entity not found: Item with id '7'");
}

#[test]
fn already_exists_error_displays_correctly() {
    let err = DbError::AlreadyExists {
        entity_type: "Review".to_string(),
        id: "10".to_string(),
    };
    assert_eq!(err.to_string(), "Entity already exists: Review with id '10'");
}

#[test]
fn constraint_error_displays_correctly() {
    let err = DbError::Constraint {
        message: "FOREIGN KEY constraint failed".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Constraint violation: FOREIGN KEY constraint failed"
    );
}

#[test]
fn database_error_displays_correctly() {
    let err = DbError::Database {
        message: "disk I/O error".to_string(),
    };
    assert_eq!(err.to_string(), "Database error: disk I/O error");
}

#[test]
fn migration_error_displays_correctly() {
    let err = DbError::Migration {
        message: "table customers is malformed".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Migration error: table customers is malformed"
    );
}

#[test]
fn connection_error_displays_correctly() {
    let err = DbError::Connection {
        message: "unable to open database file".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Connection error: unable to open database file"
    );
}

#[test]
fn db_result_propagates_with_question_mark() {
    fn inner() -> DbResult<i64> {
        Err(DbError::not_found("Customer", 1))
    }

    fn outer() -> DbResult<i64> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(DbError::NotFound { .. })));
}
