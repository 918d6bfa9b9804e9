//! Export the whole store as JSONL snapshots of the full forms.

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

use super::jsonl::{JsonlError, write_jsonl};
use crate::db::{CustomerRepository, Database, DbError, ItemRepository, ReviewRepository};

pub const CUSTOMERS_FILE: &str = "customers.jsonl";
pub const ITEMS_FILE: &str = "items.jsonl";
pub const REVIEWS_FILE: &str = "reviews.jsonl";

/// Errors that can occur during export.
#[derive(Error, Diagnostic, Debug)]
pub enum ExportError {
    #[error("Database error: {0}")]
    #[diagnostic(code(reviewstore::export::database))]
    Database(#[from] DbError),

    #[error("JSONL error: {0}")]
    #[diagnostic(code(reviewstore::export::jsonl))]
    Jsonl(#[from] JsonlError),

    #[error("Failed to create export directory: {0}")]
    #[diagnostic(code(reviewstore::export::io))]
    Io(#[from] std::io::Error),
}

/// Summary of exported entities.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub customers: usize,
    pub items: usize,
    pub reviews: usize,
}

impl ExportSummary {
    pub fn total(&self) -> usize {
        self.customers + self.items + self.reviews
    }
}

/// Export every entity in its full form to JSONL files in `output_dir`.
///
/// Creates 3 files, each ordered by id:
/// - customers.jsonl
/// - items.jsonl
/// - reviews.jsonl
///
/// The directory is created if it does not exist.
#[instrument(skip(db))]
pub async fn export_all<D: Database>(
    db: &D,
    output_dir: &Path,
) -> Result<ExportSummary, ExportError> {
    std::fs::create_dir_all(output_dir)?;

    let customers = db.customers();
    let mut customer_forms = Vec::new();
    for customer in customers.list(None).await?.items {
        customer_forms.push(customers.load(customer.id).await?.to_full());
    }

    let items = db.items();
    let mut item_forms = Vec::new();
    for item in items.list(None).await?.items {
        item_forms.push(items.load(item.id).await?.to_full());
    }

    let reviews = db.reviews();
    let mut review_forms = Vec::new();
    for review in reviews.list(None).await?.items {
        review_forms.push(reviews.load(review.id).await?.to_full());
    }

    let summary = ExportSummary {
        customers: write_jsonl(&output_dir.join(CUSTOMERS_FILE), &customer_forms)?,
        items: write_jsonl(&output_dir.join(ITEMS_FILE), &item_forms)?,
        reviews: write_jsonl(&output_dir.join(REVIEWS_FILE), &review_forms)?,
    };

    info!(
        customers = summary.customers,
        items = summary.items,
        reviews = summary.reviews,
        "Export complete"
    );
    Ok(summary)
}
