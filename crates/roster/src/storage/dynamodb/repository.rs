//! DynamoDB repository implementation.
//!
//! Implements [`DocumentRepository`] from `roster_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use roster_core::catalog::{Catalog, Record, RecordData, RecordPatch};
use roster_core::identifier::DocumentKey;
use roster_core::storage::{DocumentRepository, RepositoryError, Result};

use super::conversions::{item_to_record, record_to_item};
use super::error::{
    map_delete_item_error, map_describe_table_error, map_get_item_error, map_put_item_error,
    map_query_error,
};
use super::keys;

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-based document store.
pub struct DynamoDbDocumentStore {
    client: Client,
    table_name: String,
}

impl DynamoDbDocumentStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new store using the AWS SDK default credential chain.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Queries GSI1 for a catalog, following pagination to the end.
    async fn query_catalog(&self, catalog: Catalog, name_prefix: Option<String>) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let mut query = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(keys::GSI1)
                .expression_attribute_values(
                    ":pk",
                    AttributeValue::S(keys::catalog_gsi1_pk(catalog)),
                )
                .set_exclusive_start_key(start_key.take());

            query = match &name_prefix {
                Some(prefix) => query
                    .key_condition_expression("GSI1PK = :pk AND begins_with(GSI1SK, :prefix)")
                    .expression_attribute_values(":prefix", AttributeValue::S(prefix.clone())),
                None => query.key_condition_expression("GSI1PK = :pk"),
            };

            let output = query.send().await.map_err(map_query_error)?;
            items.extend(output.items.unwrap_or_default());

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }
}

/// Orders records by key, which follows creation time.
fn sorted_records(items: &[Item]) -> Result<Vec<Record>> {
    let mut records = items.iter().map(item_to_record).collect::<Result<Vec<_>>>()?;
    records.sort_by(|a, b| a.id.to_string().cmp(&b.id.to_string()));
    Ok(records)
}

#[async_trait]
impl DocumentRepository for DynamoDbDocumentStore {
    async fn list_documents(&self, catalog: Catalog) -> Result<Vec<Record>> {
        let items = self.query_catalog(catalog, None).await?;
        sorted_records(&items)
    }

    async fn get_document(&self, catalog: Catalog, key: &DocumentKey) -> Result<Option<Record>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::record_pk(catalog, key)))
            .key("SK", AttributeValue::S(keys::record_sk(catalog, key)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn find_document_by_name(
        &self,
        catalog: Catalog,
        name: &str,
    ) -> Result<Option<Record>> {
        let items = self
            .query_catalog(catalog, Some(keys::name_gsi1_sk_prefix(name)))
            .await?;

        Ok(sorted_records(&items)?
            .into_iter()
            .find(|record| record.data.name_matches(name)))
    }

    async fn insert_document(&self, catalog: Catalog, data: &RecordData) -> Result<Record> {
        let key = DocumentKey::generate();
        let item = record_to_item(catalog, &key, data);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item.clone()))
            .condition_expression("attribute_not_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, catalog.entity_type(), key.to_string(), false))?;

        tracing::debug!(catalog = ?catalog, key = %key, "Inserted document");
        item_to_record(&item)
    }

    async fn update_document(
        &self,
        catalog: Catalog,
        key: &DocumentKey,
        patch: &RecordPatch,
    ) -> Result<Option<Record>> {
        let Some(mut record) = self.get_document(catalog, key).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut record.data);

        // Full replacement keeps GSI1SK in step with a renamed record.
        let item = record_to_item(catalog, key, &record.data);
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(PK)")
            .send()
            .await
            .map_err(|e| map_put_item_error(e, catalog.entity_type(), key.to_string(), true));

        match result {
            Ok(_) => Ok(Some(record)),
            Err(RepositoryError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete_document(
        &self,
        catalog: Catalog,
        key: &DocumentKey,
    ) -> Result<Option<Record>> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::record_pk(catalog, key)))
            .key("SK", AttributeValue::S(keys::record_sk(catalog, key)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        match result.attributes {
            Some(item) if !item.is_empty() => Ok(Some(item_to_record(&item)?)),
            _ => Ok(None),
        }
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(map_describe_table_error)?;
        Ok(())
    }
}
