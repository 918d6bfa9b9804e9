//! Serialization forms for the domain models.
//!
//! Every entity has a *basic* form carrying only its own columns and a
//! *full* form that also embeds its neighbours. Full forms only ever embed
//! basic forms, so a customer nested in a review can never recurse back into
//! that review.
//!
//! All forms serialize `None` as `null`; no field is skipped.

use serde::{Deserialize, Serialize};

use crate::db::models::{Customer, Id, Item, Review};

/// `{id, name}` of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerBasic {
    pub id: Id,
    pub name: Option<String>,
}

/// Customer with its reviews and the items reached through them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerFull {
    pub id: Id,
    pub name: Option<String>,
    pub reviews: Vec<ReviewBasic>,
    pub items: Vec<ItemSummary>,
}

/// `{id, name, price}` of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBasic {
    pub id: Id,
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// `{id, name}` of an item, as listed under a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: Id,
    pub name: Option<String>,
}

/// Item with its reviews and the customers reached through them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFull {
    pub id: Id,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub reviews: Vec<ReviewBasic>,
    pub customers: Vec<CustomerBasic>,
}

/// `{id, comment}` of a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewBasic {
    pub id: Id,
    pub comment: Option<String>,
}

/// Review with its customer and item in basic form, `null` when unlinked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewFull {
    pub id: Id,
    pub comment: Option<String>,
    pub customer: Option<CustomerBasic>,
    pub item: Option<ItemBasic>,
}

impl Customer {
    pub fn to_basic(&self) -> CustomerBasic {
        CustomerBasic {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl Item {
    pub fn to_basic(&self) -> ItemBasic {
        ItemBasic {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
        }
    }

    pub fn to_summary(&self) -> ItemSummary {
        ItemSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl Review {
    pub fn to_basic(&self) -> ReviewBasic {
        ReviewBasic {
            id: self.id,
            comment: self.comment.clone(),
        }
    }
}
