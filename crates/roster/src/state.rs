//! Application state.
//!
//! Holds one [`RecordResolver`] per catalog. Both resolvers share the same
//! document and relational store handles, which are created once at startup.

use std::{sync::Arc, time::Duration};

use roster_core::catalog::Catalog;
use roster_core::storage::{DocumentRepository, RelationalRepository};

use crate::config::Config;
use crate::resolver::{RecordResolver, StoresHealth};
use crate::storage::SqliteRepository;

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    hunters: RecordResolver,
    caballeros: RecordResolver,
    /// Document store handle, shared with the resolvers.
    pub documents: Arc<dyn DocumentRepository>,
    /// Relational store handle, shared with the resolvers.
    pub rows: Arc<dyn RelationalRepository>,
    /// Whole-request timeout applied by the router.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState from already opened stores.
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        rows: Arc<dyn RelationalRepository>,
        config: &Config,
    ) -> Self {
        let resolver = |catalog| {
            RecordResolver::new(
                catalog,
                documents.clone(),
                rows.clone(),
                config.store_timeout(),
            )
        };

        Self {
            hunters: resolver(Catalog::Hunters),
            caballeros: resolver(Catalog::Caballeros),
            documents: documents.clone(),
            rows: rows.clone(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Opens the stores named by the configuration.
    ///
    /// The relational store is always SQLite at `config.sqlite_path`; the
    /// document store depends on the enabled feature.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let rows = SqliteRepository::new(&config.sqlite_path).await?;
        tracing::info!(path = %config.sqlite_path, "Opened SQLite relational store");

        let documents = open_document_store(config).await;

        Ok(Self::new(documents, Arc::new(rows), config))
    }

    /// The resolver serving a catalog.
    pub fn resolver(&self, catalog: Catalog) -> &RecordResolver {
        match catalog {
            Catalog::Hunters => &self.hunters,
            Catalog::Caballeros => &self.caballeros,
        }
    }

    /// Pings both stores. The stores are shared, so either resolver will do.
    pub async fn health(&self) -> StoresHealth {
        self.hunters.health().await
    }
}

#[cfg(feature = "inmemory")]
async fn open_document_store(_config: &Config) -> Arc<dyn DocumentRepository> {
    tracing::info!("Using in-memory document store");
    Arc::new(crate::storage::InMemoryDocumentStore::new())
}

#[cfg(feature = "dynamodb")]
async fn open_document_store(config: &Config) -> Arc<dyn DocumentRepository> {
    let store = crate::storage::DynamoDbDocumentStore::from_env(&config.dynamodb_table_name).await;
    tracing::info!(table = %store.table_name(), "Using DynamoDB document store");
    Arc::new(store)
}

#[cfg(test)]
impl AppState {
    /// State backed by the in-memory document store and in-memory SQLite.
    pub async fn for_tests() -> Self {
        let rows = SqliteRepository::new_in_memory()
            .await
            .expect("in-memory SQLite");
        let config = Config {
            sqlite_path: ":memory:".to_string(),
            store_timeout_ms: 1_000,
            request_timeout_secs: 10,
            seed_demo_data: false,
            log_format: crate::config::LogFormat::Plain,
            dynamodb_table_name: "roster".to_string(),
        };

        Self::new(
            Arc::new(crate::storage::InMemoryDocumentStore::new()),
            Arc::new(rows),
            &config,
        )
    }
}
