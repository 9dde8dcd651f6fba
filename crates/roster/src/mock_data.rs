use roster_core::catalog::{generate_seed_records, Catalog};
use roster_core::storage::{DocumentRepository, RelationalRepository, Result, StoreKind};

/// Seeds demo characters into catalogs whose stores are both empty.
///
/// Returns the number of records inserted.
pub async fn seed_demo_data(
    documents: &dyn DocumentRepository,
    rows: &dyn RelationalRepository,
) -> Result<usize> {
    let mut inserted = 0;

    for catalog in Catalog::ALL {
        let existing =
            documents.list_documents(catalog).await?.len() + rows.list_rows(catalog).await?.len();
        if existing > 0 {
            tracing::debug!(catalog = ?catalog, existing, "Catalog not empty, skipping seed");
            continue;
        }

        for (store, data) in generate_seed_records(catalog) {
            match store {
                StoreKind::Document => {
                    documents.insert_document(catalog, &data).await?;
                }
                StoreKind::Relational => {
                    rows.insert_row(catalog, &data).await?;
                }
            }
            inserted += 1;
        }
        tracing::info!(catalog = ?catalog, "Seeded demo data");
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryDocumentStore, SqliteRepository};

    #[tokio::test]
    async fn test_seeds_both_catalogs_across_both_stores() {
        let documents = InMemoryDocumentStore::new();
        let rows = SqliteRepository::new_in_memory().await.unwrap();

        let inserted = seed_demo_data(&documents, &rows).await.unwrap();

        let expected: usize = Catalog::ALL
            .iter()
            .map(|c| generate_seed_records(*c).len())
            .sum();
        assert_eq!(inserted, expected);
        for catalog in Catalog::ALL {
            assert!(!documents.list_documents(catalog).await.unwrap().is_empty());
            assert!(!rows.list_rows(catalog).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_seeding_is_skipped_when_data_exists() {
        let documents = InMemoryDocumentStore::new();
        let rows = SqliteRepository::new_in_memory().await.unwrap();
        seed_demo_data(&documents, &rows).await.unwrap();

        let inserted = seed_demo_data(&documents, &rows).await.unwrap();

        assert_eq!(inserted, 0);
    }
}
