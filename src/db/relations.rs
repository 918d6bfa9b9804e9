//! Loaded relationship graphs.
//!
//! A review belongs to at most one customer and at most one item. Loading a
//! customer pulls its reviews together with each review's item; loading an
//! item pulls its reviews together with each review's customer. The
//! many-to-many projections (`items`, `customers`) are computed from those
//! lists on demand and skip reviews whose link is unset.

use crate::db::models::{Customer, Item, Review};
use crate::db::serialize::{CustomerFull, ItemFull, ReviewFull};

/// A review paired with the entity on its far side, if linked.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedReview<T> {
    pub review: Review,
    pub linked: Option<T>,
}

impl<T> LinkedReview<T> {
    pub fn new(review: Review, linked: Option<T>) -> Self {
        Self { review, linked }
    }
}

/// A customer and its reviews, each with the reviewed item.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerWithReviews {
    pub customer: Customer,
    pub reviews: Vec<LinkedReview<Item>>,
}

impl CustomerWithReviews {
    pub fn new(customer: Customer) -> Self {
        Self {
            customer,
            reviews: Vec::new(),
        }
    }

    /// Append a review and the item it points at.
    pub fn with_review(mut self, review: Review, item: Option<Item>) -> Self {
        self.reviews.push(LinkedReview::new(review, item));
        self
    }

    pub fn reviews(&self) -> impl Iterator<Item = &Review> {
        self.reviews.iter().map(|linked| &linked.review)
    }

    /// Items reached through this customer's reviews, in review order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.reviews.iter().filter_map(|linked| linked.linked.as_ref())
    }

    pub fn to_full(&self) -> CustomerFull {
        CustomerFull {
            id: self.customer.id,
            name: self.customer.name.clone(),
            reviews: self.reviews().map(Review::to_basic).collect(),
            items: self.items().map(Item::to_summary).collect(),
        }
    }
}

/// An item and its reviews, each with the reviewing customer.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemWithReviews {
    pub item: Item,
    pub reviews: Vec<LinkedReview<Customer>>,
}

impl ItemWithReviews {
    pub fn new(item: Item) -> Self {
        Self {
            item,
            reviews: Vec::new(),
        }
    }

    /// Append a review and the customer who wrote it.
    pub fn with_review(mut self, review: Review, customer: Option<Customer>) -> Self {
        self.reviews.push(LinkedReview::new(review, customer));
        self
    }

    pub fn reviews(&self) -> impl Iterator<Item = &Review> {
        self.reviews.iter().map(|linked| &linked.review)
    }

    /// Customers reached through this item's reviews, in review order.
    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.reviews.iter().filter_map(|linked| linked.linked.as_ref())
    }

    pub fn to_full(&self) -> ItemFull {
        ItemFull {
            id: self.item.id,
            name: self.item.name.clone(),
            price: self.item.price,
            reviews: self.reviews().map(Review::to_basic).collect(),
            customers: self.customers().map(Customer::to_basic).collect(),
        }
    }
}

/// A review with both of its links resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewWithLinks {
    pub review: Review,
    pub customer: Option<Customer>,
    pub item: Option<Item>,
}

impl ReviewWithLinks {
    pub fn new(review: Review, customer: Option<Customer>, item: Option<Item>) -> Self {
        Self {
            review,
            customer,
            item,
        }
    }

    pub fn to_full(&self) -> ReviewFull {
        ReviewFull {
            id: self.review.id,
            comment: self.review.comment.clone(),
            customer: self.customer.as_ref().map(Customer::to_basic),
            item: self.item.as_ref().map(Item::to_basic),
        }
    }
}
