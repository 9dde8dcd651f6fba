//! In-memory document store implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use roster_core::catalog::{Catalog, Record, RecordData, RecordPatch};
use roster_core::identifier::{DocumentKey, RecordId};
use roster_core::storage::{DocumentRepository, RepositoryError, Result};

type Collection = BTreeMap<DocumentKey, RecordData>;

/// Process-local document store.
///
/// Keys are generated ObjectId-style, so iterating a collection's `BTreeMap`
/// yields documents in creation order until the process has generated 2^24
/// keys and the key counter wraps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<Catalog, Collection>>>,
}

impl InMemoryDocumentStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_record(key: &DocumentKey, data: &RecordData) -> Record {
    Record::new(RecordId::Document(key.clone()), data.clone())
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentStore {
    async fn list_documents(&self, catalog: Catalog) -> Result<Vec<Record>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&catalog)
            .map(|docs| docs.iter().map(|(k, d)| to_record(k, d)).collect())
            .unwrap_or_default())
    }

    async fn get_document(&self, catalog: Catalog, key: &DocumentKey) -> Result<Option<Record>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&catalog)
            .and_then(|docs| docs.get(key))
            .map(|data| to_record(key, data)))
    }

    async fn find_document_by_name(
        &self,
        catalog: Catalog,
        name: &str,
    ) -> Result<Option<Record>> {
        let collections = self.collections.read().await;
        Ok(collections.get(&catalog).and_then(|docs| {
            docs.iter()
                .find(|(_, data)| data.name_matches(name))
                .map(|(k, d)| to_record(k, d))
        }))
    }

    async fn insert_document(&self, catalog: Catalog, data: &RecordData) -> Result<Record> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(catalog).or_default();

        let key = DocumentKey::generate();
        if docs.contains_key(&key) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: catalog.entity_type(),
                id: key.to_string(),
            });
        }
        docs.insert(key.clone(), data.clone());

        tracing::debug!(catalog = ?catalog, key = %key, "Inserted document");
        Ok(to_record(&key, data))
    }

    async fn update_document(
        &self,
        catalog: Catalog,
        key: &DocumentKey,
        patch: &RecordPatch,
    ) -> Result<Option<Record>> {
        let mut collections = self.collections.write().await;
        let Some(data) = collections.get_mut(&catalog).and_then(|docs| docs.get_mut(key)) else {
            return Ok(None);
        };
        patch.apply_to(data);
        Ok(Some(to_record(key, data)))
    }

    async fn delete_document(
        &self,
        catalog: Catalog,
        key: &DocumentKey,
    ) -> Result<Option<Record>> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(&catalog)
            .and_then(|docs| docs.remove(key))
            .map(|data| Record::new(RecordId::Document(key.clone()), data)))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::catalog::Field;

    fn gon() -> RecordData {
        RecordData::new("Gon Freecss", "12", "154 cm", "49 kg", "https://img/gon.png")
    }

    fn key_of(record: &Record) -> DocumentKey {
        match &record.id {
            RecordId::Document(key) => key.clone(),
            other => panic!("Expected document key, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryDocumentStore::new();

        let inserted = store.insert_document(Catalog::Hunters, &gon()).await.unwrap();
        let key = key_of(&inserted);
        let fetched = store.get_document(Catalog::Hunters, &key).await.unwrap();

        assert_eq!(fetched, Some(inserted));
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        let inserted = store.insert_document(Catalog::Hunters, &gon()).await.unwrap();

        let other = store
            .get_document(Catalog::Caballeros, &key_of(&inserted))
            .await
            .unwrap();

        assert!(other.is_none());
        assert!(store.list_documents(Catalog::Caballeros).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryDocumentStore::new();
        for name in ["Gon", "Killua", "Kurapika"] {
            let data = RecordData::new(name, "1", "1", "1", "x");
            store.insert_document(Catalog::Hunters, &data).await.unwrap();
        }

        let names: Vec<String> = store
            .list_documents(Catalog::Hunters)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.data.name)
            .collect();

        assert_eq!(names, vec!["Gon", "Killua", "Kurapika"]);
    }

    #[tokio::test]
    async fn test_find_by_name_ignores_case() {
        let store = InMemoryDocumentStore::new();
        store.insert_document(Catalog::Hunters, &gon()).await.unwrap();

        let found = store
            .find_document_by_name(Catalog::Hunters, "gon FREECSS")
            .await
            .unwrap();
        let partial = store
            .find_document_by_name(Catalog::Hunters, "gon")
            .await
            .unwrap();

        assert!(found.is_some());
        assert!(partial.is_none());
    }

    #[tokio::test]
    async fn test_find_by_name_folds_accented_letters() {
        let store = InMemoryDocumentStore::new();
        let shun = RecordData::new("Shun de Andrómeda", "13", "165 cm", "51 kg", "x");
        store.insert_document(Catalog::Caballeros, &shun).await.unwrap();

        let found = store
            .find_document_by_name(Catalog::Caballeros, "SHUN DE ANDRÓMEDA")
            .await
            .unwrap();

        assert_eq!(found.unwrap().data.name, "Shun de Andrómeda");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = InMemoryDocumentStore::new();
        let key = key_of(&store.insert_document(Catalog::Hunters, &gon()).await.unwrap());
        let patch = RecordPatch::new().with(Field::Height, "160 cm");

        let updated = store
            .update_document(Catalog::Hunters, &key, &patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.data.height, "160 cm");

        let deleted = store.delete_document(Catalog::Hunters, &key).await.unwrap();
        assert_eq!(deleted.map(|r| r.data.height), Some("160 cm".to_string()));
        assert!(store.get_document(Catalog::Hunters, &key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_document_operations_return_none() {
        let store = InMemoryDocumentStore::new();
        let key = DocumentKey::generate();
        let patch = RecordPatch::new().with(Field::Age, "13");

        assert!(store
            .update_document(Catalog::Hunters, &key, &patch)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .delete_document(Catalog::Hunters, &key)
            .await
            .unwrap()
            .is_none());
    }
}
