//! Snapshot export of the store.
//!
//! Writes the full serialization form of every customer, item and review to
//! JSONL files, ready to hand to another system.

mod jsonl;
mod snapshot;
#[cfg(test)]
mod snapshot_test;

pub use jsonl::{JsonlError, read_jsonl, write_jsonl};
pub use snapshot::{
    CUSTOMERS_FILE, ExportError, ExportSummary, ITEMS_FILE, REVIEWS_FILE, export_all,
};
