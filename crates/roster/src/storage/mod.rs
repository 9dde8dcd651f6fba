//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `roster_core::storage`. The relational store is always SQLite; the
//! document store is selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local document store
//! - `dynamodb`: AWS DynamoDB document store using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive.
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p roster --no-default-features --features dynamodb
//! ```

#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one document store backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No document store backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p roster --features inmemory"
);

// Also backs the test fixtures, so it is compiled under every backend.
#[cfg_attr(not(feature = "inmemory"), allow(dead_code, unused_imports))]
pub mod inmemory;
pub mod sqlite;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg_attr(not(feature = "inmemory"), allow(unused_imports))]
pub use inmemory::InMemoryDocumentStore;
pub use sqlite::SqliteRepository;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbDocumentStore;
