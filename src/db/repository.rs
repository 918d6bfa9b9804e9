//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.

use crate::db::{
    DbResult,
    models::{Customer, CustomerQuery, Id, Item, ItemQuery, ListResult, Review, ReviewQuery},
    relations::{CustomerWithReviews, ItemWithReviews, ReviewWithLinks},
};

/// Repository for Customer operations.
pub trait CustomerRepository {
    /// Create a new customer. An id of `0` lets the store assign one.
    async fn create(&self, customer: &Customer) -> DbResult<Customer>;

    /// Get a customer by ID.
    async fn get(&self, id: Id) -> DbResult<Customer>;

    /// List customers with optional filtering, sorting, and pagination.
    async fn list(&self, query: Option<&CustomerQuery>) -> DbResult<ListResult<Customer>>;

    /// Update an existing customer's fields. The id is never rewritten.
    async fn update(&self, customer: &Customer) -> DbResult<()>;

    /// Delete a customer by ID.
    async fn delete(&self, id: Id) -> DbResult<()>;

    /// Reviews written by a customer.
    async fn reviews(&self, customer_id: Id) -> DbResult<Vec<Review>>;

    /// Items reached through a customer's reviews, skipping unlinked ones.
    async fn items(&self, customer_id: Id) -> DbResult<Vec<Item>>;

    /// Load a customer together with its reviews and their items.
    async fn load(&self, id: Id) -> DbResult<CustomerWithReviews>;
}

/// Repository for Item operations.
pub trait ItemRepository {
    /// Create a new item. An id of `0` lets the store assign one.
    async fn create(&self, item: &Item) -> DbResult<Item>;

    /// Get an item by ID.
    async fn get(&self, id: Id) -> DbResult<Item>;

    /// List items with optional filtering, sorting, and pagination.
    async fn list(&self, query: Option<&ItemQuery>) -> DbResult<ListResult<Item>>;

    /// Update an existing item's fields. The id is never rewritten.
    async fn update(&self, item: &Item) -> DbResult<()>;

    /// Delete an item by ID.
    async fn delete(&self, id: Id) -> DbResult<()>;

    /// Reviews written about an item.
    async fn reviews(&self, item_id: Id) -> DbResult<Vec<Review>>;

    /// Customers reached through an item's reviews, skipping unlinked ones.
    async fn customers(&self, item_id: Id) -> DbResult<Vec<Customer>>;

    /// Load an item together with its reviews and their customers.
    async fn load(&self, id: Id) -> DbResult<ItemWithReviews>;
}

/// Repository for Review operations.
pub trait ReviewRepository {
    /// Create a new review. An id of `0` lets the store assign one.
    async fn create(&self, review: &Review) -> DbResult<Review>;

    /// Get a review by ID.
    async fn get(&self, id: Id) -> DbResult<Review>;

    /// List reviews with optional link filters, sorting, and pagination.
    async fn list(&self, query: Option<&ReviewQuery>) -> DbResult<ListResult<Review>>;

    /// Update a review's comment and links. The id is never rewritten.
    async fn update(&self, review: &Review) -> DbResult<()>;

    /// Delete a review by ID.
    async fn delete(&self, id: Id) -> DbResult<()>;

    /// Load a review with its customer and item resolved.
    async fn load(&self, id: Id) -> DbResult<ReviewWithLinks>;
}

/// Combined database interface.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub trait Database: Send + Sync {
    type Customers<'a>: CustomerRepository
    where
        Self: 'a;
    type Items<'a>: ItemRepository
    where
        Self: 'a;
    type Reviews<'a>: ReviewRepository
    where
        Self: 'a;

    /// Create the schema if it does not exist yet.
    async fn migrate(&self) -> DbResult<()>;

    /// Get the customer repository.
    fn customers(&self) -> Self::Customers<'_>;

    /// Get the item repository.
    fn items(&self) -> Self::Items<'_>;

    /// Get the review repository.
    fn reviews(&self) -> Self::Reviews<'_>;
}
