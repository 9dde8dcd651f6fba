use async_trait::async_trait;

use crate::catalog::{Catalog, Record, RecordData, RecordPatch};
use crate::identifier::DocumentKey;

use super::Result;

/// Document store: records addressed by opaque [`DocumentKey`]s, one
/// collection per catalog.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Lists every document of a catalog.
    async fn list_documents(&self, catalog: Catalog) -> Result<Vec<Record>>;

    /// Gets a document by its key.
    async fn get_document(&self, catalog: Catalog, key: &DocumentKey) -> Result<Option<Record>>;

    /// Finds the first document whose name matches case-insensitively.
    async fn find_document_by_name(&self, catalog: Catalog, name: &str)
        -> Result<Option<Record>>;

    /// Inserts a new document under a freshly generated key.
    async fn insert_document(&self, catalog: Catalog, data: &RecordData) -> Result<Record>;

    /// Applies a patch, returning the updated document or `None` if absent.
    async fn update_document(
        &self,
        catalog: Catalog,
        key: &DocumentKey,
        patch: &RecordPatch,
    ) -> Result<Option<Record>>;

    /// Deletes a document, returning it or `None` if it did not exist.
    async fn delete_document(&self, catalog: Catalog, key: &DocumentKey)
        -> Result<Option<Record>>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}

/// Relational store: rows addressed by auto-incrementing integer keys.
#[async_trait]
pub trait RelationalRepository: Send + Sync {
    /// Lists every row of a catalog table.
    async fn list_rows(&self, catalog: Catalog) -> Result<Vec<Record>>;

    /// Gets a row by primary key.
    async fn get_row(&self, catalog: Catalog, id: i64) -> Result<Option<Record>>;

    /// Finds the first row whose lowercased name equals the lowercased input.
    async fn find_row_by_name(&self, catalog: Catalog, name: &str) -> Result<Option<Record>>;

    /// Inserts a row and returns it with its assigned key.
    async fn insert_row(&self, catalog: Catalog, data: &RecordData) -> Result<Record>;

    /// Applies a patch, returning the updated row or `None` if absent.
    async fn update_row(
        &self,
        catalog: Catalog,
        id: i64,
        patch: &RecordPatch,
    ) -> Result<Option<Record>>;

    /// Deletes a row inside a transaction and returns the number of rows
    /// removed. Any failure before commit rolls the transaction back.
    async fn delete_row(&self, catalog: Catalog, id: i64) -> Result<u64>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}
