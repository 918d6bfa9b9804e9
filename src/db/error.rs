//! Database error types.
//!
//! Storage-backend agnostic errors for repository operations, with miette
//! diagnostics for reporting and thiserror for the derives.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(reviewstore::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Entity already exists: {entity_type} with id '{id}'")]
    #[diagnostic(code(reviewstore::db::already_exists))]
    AlreadyExists { entity_type: String, id: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(
        code(reviewstore::db::constraint),
        help("A review still references this row, or references a row that does not exist.")
    )]
    Constraint { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(reviewstore::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(reviewstore::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(reviewstore::db::connection_error))]
    Connection { message: String },
}

impl DbError {
    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        DbError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
