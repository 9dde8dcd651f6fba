//! Dual-store record resolution.
//!
//! A [`RecordResolver`] owns handles to both stores for one catalog. It
//! classifies identifiers, routes each operation to the store that owns the
//! record, and runs the concurrent probes used by name lookups and listings.

mod diagnostics;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use roster_core::catalog::{Catalog, CreateRecordRequest, Record, RecordPatch};
use roster_core::identifier::{classify, RecordId};
use roster_core::resolve::{pick_by_precedence, ResolveError};
use roster_core::storage::{
    DocumentRepository, RelationalRepository, RepositoryError, StoreHealth, StoreKind,
};

pub use diagnostics::{CatalogSnapshot, IdentifierProbe, StoreCheck, StoreSnapshot, StoresHealth};

type Result<T> = std::result::Result<T, ResolveError>;

/// Resolves requests for one catalog against the document and relational stores.
#[derive(Clone)]
pub struct RecordResolver {
    catalog: Catalog,
    documents: Arc<dyn DocumentRepository>,
    rows: Arc<dyn RelationalRepository>,
    lookup_timeout: Duration,
}

impl RecordResolver {
    pub fn new(
        catalog: Catalog,
        documents: Arc<dyn DocumentRepository>,
        rows: Arc<dyn RelationalRepository>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            documents,
            rows,
            lookup_timeout,
        }
    }

    /// Bounds a read against one store by the lookup timeout.
    async fn bounded<T>(
        &self,
        store: StoreKind,
        lookup: impl Future<Output = std::result::Result<T, RepositoryError>>,
    ) -> std::result::Result<T, RepositoryError> {
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    catalog = ?self.catalog,
                    store = %store,
                    timeout_ms = self.lookup_timeout.as_millis() as u64,
                    "Store lookup timed out"
                );
                Err(RepositoryError::Timeout(format!(
                    "{store} no respondió en {} ms",
                    self.lookup_timeout.as_millis()
                )))
            }
        }
    }

    /// Lists document records followed by relational records.
    ///
    /// Both stores are queried concurrently; either failing fails the listing.
    pub async fn list(&self) -> Result<Vec<Record>> {
        let (documents, rows) = tokio::join!(
            self.bounded(StoreKind::Document, self.documents.list_documents(self.catalog)),
            self.bounded(StoreKind::Relational, self.rows.list_rows(self.catalog)),
        );

        let mut records = documents?;
        let rows = rows?;
        tracing::debug!(
            catalog = ?self.catalog,
            documents = records.len(),
            rows = rows.len(),
            "Listed records"
        );
        records.extend(rows);
        Ok(records)
    }

    /// Fetches a record by identifier from the store its shape designates.
    pub async fn get(&self, raw_id: &str) -> Result<Record> {
        let id = classify(raw_id).into_record_id()?;
        tracing::debug!(catalog = ?self.catalog, id = %id, store = %id.store(), "Classified identifier");

        self.fetch(&id)
            .await?
            .ok_or_else(|| ResolveError::not_found(id.store(), &id))
    }

    async fn fetch(&self, id: &RecordId) -> Result<Option<Record>> {
        let record = match id {
            RecordId::Document(key) => {
                self.bounded(
                    StoreKind::Document,
                    self.documents.get_document(self.catalog, key),
                )
                .await?
            }
            RecordId::Relational(row_id) => {
                self.bounded(
                    StoreKind::Relational,
                    self.rows.get_row(self.catalog, *row_id),
                )
                .await?
            }
        };
        Ok(record)
    }

    /// Looks a name up in both stores concurrently.
    async fn probe_name(&self, name: &str) -> Result<(Option<Record>, Option<Record>)> {
        let (document, row) = tokio::join!(
            self.bounded(
                StoreKind::Document,
                self.documents.find_document_by_name(self.catalog, name),
            ),
            self.bounded(
                StoreKind::Relational,
                self.rows.find_row_by_name(self.catalog, name),
            ),
        );

        let (document, row) = (document?, row?);
        tracing::debug!(
            catalog = ?self.catalog,
            name,
            document_hit = document.is_some(),
            relational_hit = row.is_some(),
            "Probed both stores by name"
        );
        Ok((document, row))
    }

    /// Finds a record by case-insensitive name. A document-store match wins
    /// over a relational one.
    pub async fn find_by_name(&self, name: &str) -> Result<Record> {
        let (document, row) = self.probe_name(name).await?;
        let (store, record) =
            pick_by_precedence(document, row).ok_or_else(|| ResolveError::not_found_anywhere(name))?;

        tracing::debug!(catalog = ?self.catalog, name, store = %store, "Resolved name");
        Ok(record)
    }

    /// Validates a create body and inserts the record in the selected store.
    pub async fn create(&self, body: &Map<String, Value>) -> Result<Record> {
        let request = CreateRecordRequest::from_body(self.catalog, body)?;

        let record = match request.store {
            StoreKind::Document => {
                self.documents
                    .insert_document(self.catalog, &request.data)
                    .await?
            }
            StoreKind::Relational => self.rows.insert_row(self.catalog, &request.data).await?,
        };

        tracing::info!(
            catalog = ?self.catalog,
            store = %record.store(),
            id = %record.id,
            "Created record"
        );
        Ok(record)
    }

    /// Applies a partial update in the store that owns the identifier.
    ///
    /// The body is validated before the identifier is looked at.
    pub async fn update(&self, raw_id: &str, body: &Map<String, Value>) -> Result<Record> {
        let patch = RecordPatch::from_body(self.catalog, body)?;
        let id = classify(raw_id).into_record_id()?;

        let updated = match &id {
            RecordId::Document(key) => {
                self.documents
                    .update_document(self.catalog, key, &patch)
                    .await?
            }
            RecordId::Relational(row_id) => {
                self.rows.update_row(self.catalog, *row_id, &patch).await?
            }
        };

        let record = updated.ok_or_else(|| ResolveError::not_found(id.store(), &id))?;
        tracing::info!(
            catalog = ?self.catalog,
            store = %id.store(),
            id = %id,
            fields = patch.changes().len(),
            "Updated record"
        );
        Ok(record)
    }

    /// Deletes a record by identifier and returns what was removed.
    pub async fn delete(&self, raw_id: &str) -> Result<Record> {
        let id = classify(raw_id).into_record_id()?;
        tracing::debug!(catalog = ?self.catalog, id = %id, store = %id.store(), "Deleting by identifier");

        let record = self
            .fetch(&id)
            .await?
            .ok_or_else(|| ResolveError::not_found(id.store(), &id))?;

        self.remove(record).await
    }

    /// Deletes the record matching a name. When both stores match, only the
    /// document copy is removed.
    pub async fn delete_by_name(&self, name: &str) -> Result<Record> {
        let (document, row) = self.probe_name(name).await?;
        let (store, record) =
            pick_by_precedence(document, row).ok_or_else(|| ResolveError::not_found_anywhere(name))?;

        tracing::debug!(catalog = ?self.catalog, name, store = %store, "Deleting by name");
        self.remove(record).await
    }

    /// Removes an already located record from its owning store.
    async fn remove(&self, record: Record) -> Result<Record> {
        match &record.id {
            RecordId::Document(key) => {
                let removed = self.documents.delete_document(self.catalog, key).await?;
                if removed.is_none() {
                    return Err(ResolveError::not_found(StoreKind::Document, key));
                }
                tracing::info!(catalog = ?self.catalog, key = %key, "Deleted document");
            }
            RecordId::Relational(row_id) => {
                self.remove_row(*row_id).await?;
            }
        }
        Ok(record)
    }

    /// Transactional row delete followed by a read-back check.
    async fn remove_row(&self, id: i64) -> Result<()> {
        let removed = self.rows.delete_row(self.catalog, id).await?;
        if removed == 0 {
            return Err(ResolveError::not_found(StoreKind::Relational, id));
        }

        let still_there = self
            .bounded(StoreKind::Relational, self.rows.get_row(self.catalog, id))
            .await?;
        if still_there.is_some() {
            tracing::error!(catalog = ?self.catalog, id, "Row still visible after committed delete");
            return Err(ResolveError::DeleteNotConfirmed {
                store: StoreKind::Relational,
                key: id.to_string(),
            });
        }

        tracing::info!(catalog = ?self.catalog, id, "Deleted row");
        Ok(())
    }

    /// Pings both stores concurrently.
    pub async fn health(&self) -> StoresHealth {
        let (document, relational) = tokio::join!(
            self.bounded(StoreKind::Document, self.documents.ping()),
            self.bounded(StoreKind::Relational, self.rows.ping()),
        );

        StoresHealth {
            document: StoreHealth::from_ping(document),
            relational: StoreHealth::from_ping(relational),
        }
    }

    /// Checks a raw identifier against every store whose key shape it fits.
    pub async fn inspect(&self, raw_id: &str) -> Result<IdentifierProbe> {
        let id = classify(raw_id).into_record_id().ok();

        let document = match &id {
            Some(id @ RecordId::Document(_)) => StoreCheck::found(self.fetch(id).await?),
            _ => StoreCheck::invalid(StoreKind::Document),
        };
        let relational = match &id {
            Some(id @ RecordId::Relational(_)) => StoreCheck::found(self.fetch(id).await?),
            _ => StoreCheck::invalid(StoreKind::Relational),
        };

        Ok(IdentifierProbe {
            id: raw_id.to_string(),
            document,
            relational,
        })
    }

    /// Record counts and contents of both stores.
    pub async fn snapshot(&self) -> Result<CatalogSnapshot> {
        let health = self.health().await;
        let (documents, rows) = tokio::join!(
            self.bounded(StoreKind::Document, self.documents.list_documents(self.catalog)),
            self.bounded(StoreKind::Relational, self.rows.list_rows(self.catalog)),
        );

        Ok(CatalogSnapshot {
            document: StoreSnapshot::new(&health.document, documents?),
            relational: StoreSnapshot::new(&health.relational, rows?),
        })
    }

    /// Number of records in each store, document store first.
    pub async fn counts(&self) -> Result<(usize, usize)> {
        let (documents, rows) = tokio::join!(
            self.bounded(StoreKind::Document, self.documents.list_documents(self.catalog)),
            self.bounded(StoreKind::Relational, self.rows.list_rows(self.catalog)),
        );
        Ok((documents?.len(), rows?.len()))
    }
}
