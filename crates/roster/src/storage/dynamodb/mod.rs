//! DynamoDB document store.
//!
//! Single-table design: every catalog lives in one table, keyed by
//! `<CATALOG>#<document key>`. A `GSI1` index partitioned by catalog and
//! sorted by lowercased name serves listing and name lookup.

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoDbDocumentStore;
