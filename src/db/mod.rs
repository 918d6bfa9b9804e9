//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing different storage backends to be swapped without changing
//! the code that consumes customers, items and reviews.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Customer, Item, Review)
//! - `relations`: Loaded relationship graphs and derived collections
//! - `serialize`: Full and basic serialization forms
//! - `schema`: Table definitions and foreign-key naming
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed SQLite implementation

mod error;
mod models;
mod relations;
mod repository;
pub mod schema;
mod serialize;
pub mod sqlite;

#[cfg(test)]
mod error_test;

pub use error::{DbError, DbResult};
pub use models::*;
pub use relations::*;
pub use repository::*;
pub use serialize::*;
pub use sqlite::SqliteDatabase;
