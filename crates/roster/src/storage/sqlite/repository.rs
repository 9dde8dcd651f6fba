//! SQLite repository implementation.
//!
//! Implements [`RelationalRepository`] from `roster_core::storage` using SQLite.

use async_trait::async_trait;
use rusqlite::functions::FunctionFlags;
use tokio_rusqlite::Connection;

use roster_core::catalog::{Catalog, Record, RecordData, RecordPatch};
use roster_core::identifier::RecordId;
use roster_core::storage::{RelationalRepository, RepositoryError, Result};

use super::conversions::row_to_record;
use super::error::map_tokio_rusqlite_error;
use super::schema::{self, queries};

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Registers [`schema::UNICODE_LOWER`] so name lookups fold case the same
/// way `RecordData::name_matches` does.
fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        schema::UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
    )
}

/// SQLite-based relational store.
///
/// A single connection is shared by all requests; `tokio-rusqlite` serialises
/// calls onto its background thread.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            register_functions(conn).map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl RelationalRepository for SqliteRepository {
    async fn list_rows(&self, catalog: Catalog) -> Result<Vec<Record>> {
        let q = queries(catalog);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(q.select_all).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_record).map_err(wrap_err)?;

                let mut records = Vec::new();
                for row_result in rows {
                    records.push(row_result.map_err(wrap_err)?);
                }
                Ok(records)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, catalog.entity_type(), "unknown"))
    }

    async fn get_row(&self, catalog: Catalog, id: i64) -> Result<Option<Record>> {
        let q = queries(catalog);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(q.select_by_id).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_record) {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, catalog.entity_type(), id.to_string()))
    }

    async fn find_row_by_name(&self, catalog: Catalog, name: &str) -> Result<Option<Record>> {
        let q = queries(catalog);
        let name = name.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(q.select_by_name).map_err(wrap_err)?;
                match stmt.query_row([&name], row_to_record) {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, catalog.entity_type(), "unknown"))
    }

    async fn insert_row(&self, catalog: Catalog, data: &RecordData) -> Result<Record> {
        let q = queries(catalog);
        let data = data.clone();

        let record = self
            .conn
            .call(move |conn| {
                conn.execute(
                    q.insert,
                    rusqlite::params![
                        data.name,
                        data.age,
                        data.height,
                        data.weight,
                        data.image,
                        data.technique,
                        data.training,
                        data.constellation
                    ],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                Ok(Record::new(RecordId::Relational(id), data))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, catalog.entity_type(), "unknown"))?;

        tracing::debug!(catalog = ?catalog, id = %record.id, "Inserted relational row");
        Ok(record)
    }

    async fn update_row(
        &self,
        catalog: Catalog,
        id: i64,
        patch: &RecordPatch,
    ) -> Result<Option<Record>> {
        let q = queries(catalog);
        let patch = patch.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                let mut data = match tx.query_row(q.select_by_id, [id], row_to_record) {
                    Ok(record) => record.data,
                    Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                    Err(e) => return Err(wrap_err(e)),
                };
                patch.apply_to(&mut data);

                tx.execute(
                    q.update,
                    rusqlite::params![
                        id,
                        data.name,
                        data.age,
                        data.height,
                        data.weight,
                        data.image,
                        data.technique,
                        data.training,
                        data.constellation
                    ],
                )
                .map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;

                Ok(Some(Record::new(RecordId::Relational(id), data)))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, catalog.entity_type(), id.to_string()))
    }

    async fn delete_row(&self, catalog: Catalog, id: i64) -> Result<u64> {
        let q = queries(catalog);

        tracing::debug!(catalog = ?catalog, id, "Starting relational delete transaction");

        let deleted = self
            .conn
            .call(move |conn| {
                // Dropping `tx` without commit rolls back.
                let tx = conn.transaction().map_err(wrap_err)?;
                let rows = tx.execute(q.delete, [id]).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(rows as u64)
            })
            .await
            .map_err(|e| {
                tracing::warn!(catalog = ?catalog, id, error = %e, "Relational delete rolled back");
                map_tokio_rusqlite_error(e, catalog.entity_type(), id.to_string())
            })?;

        tracing::debug!(catalog = ?catalog, id, rows = deleted, "Relational delete committed");
        Ok(deleted)
    }

    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }
}
