//! In-memory document store.
//!
//! Stores every catalog's documents in ordered maps wrapped in
//! `Arc<RwLock<_>>`. Data is not persisted; this backend is meant for local
//! development and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster::storage::inmemory::InMemoryDocumentStore;
//!
//! let store = InMemoryDocumentStore::new();
//! ```

mod repository;

pub use repository::InMemoryDocumentStore;
