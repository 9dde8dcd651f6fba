//! SQLite storage backend implementation.
//!
//! This module provides the relational store using `rusqlite` for synchronous
//! operations and `tokio-rusqlite` for async wrapping. Each catalog has its
//! own table with an auto-incrementing integer primary key.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
