//! Domain models for the review store.
//!
//! These models are storage-agnostic snapshots of rows. Relationships are
//! carried as optional foreign-key ids; loaded neighbours live in
//! [`crate::db::relations`].

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Query Types for Pagination and Sorting
// =============================================================================

/// Sort order for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Base pagination and sorting options - composed into entity-specific queries.
#[derive(Debug, Clone, Default)]
pub struct PageSort {
    /// Maximum number of items to return.
    pub limit: Option<usize>,
    /// Number of items to skip.
    pub offset: Option<usize>,
    /// Field to sort by (validated per entity type).
    pub sort_by: Option<String>,
    /// Sort order (ascending or descending).
    pub sort_order: Option<SortOrder>,
}

/// Query for Customers - pagination + name search.
#[derive(Debug, Clone, Default)]
pub struct CustomerQuery {
    pub page: PageSort,
    /// Case-insensitive substring match on name.
    pub name: Option<String>,
}

/// Query for Items - pagination + name search.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub page: PageSort,
    /// Case-insensitive substring match on name.
    pub name: Option<String>,
}

/// Query for Reviews - pagination + link filters.
#[derive(Debug, Clone, Default)]
pub struct ReviewQuery {
    pub page: PageSort,
    pub customer_id: Option<Id>,
    pub item_id: Option<Id>,
}

/// Result of a paginated list query.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total count of all matching items (before pagination).
    pub total: usize,
    /// Limit that was applied.
    pub limit: Option<usize>,
    /// Offset that was applied.
    pub offset: usize,
}

/// Integer row id. `0` on a value passed to `create` means "not yet assigned".
pub type Id = i64;

/// A person who writes reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Id,
    pub name: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: Some(name.into()),
        }
    }
}

/// A product that can be reviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Id,
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: 0,
            name: Some(name.into()),
            price: Some(price),
        }
    }
}

/// A comment linking a customer to an item. Either link may be unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Id,
    pub comment: Option<String>,
    pub customer_id: Option<Id>,
    pub item_id: Option<Id>,
}

impl Review {
    pub fn new(comment: impl Into<String>, customer_id: Option<Id>, item_id: Option<Id>) -> Self {
        Self {
            id: 0,
            comment: Some(comment.into()),
            customer_id,
            item_id,
        }
    }
}

struct OrNone<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrNone<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "None"),
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Customer {}, {}>", self.id, OrNone(&self.name))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Item {}, {}, {}>",
            self.id,
            OrNone(&self.name),
            OrNone(&self.price)
        )
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Review {}, {}>", self.id, OrNone(&self.comment))
    }
}
