//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and records.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use roster_core::catalog::{Catalog, Field, Record, RecordData};
use roster_core::identifier::{DocumentKey, RecordId};
use roster_core::storage::RepositoryError;

use super::keys;

pub const KEY_ATTRIBUTE: &str = "_id";
pub const CATALOG_ATTRIBUTE: &str = "catalog";

/// Convert a record to a DynamoDB item, including its table and index keys.
pub fn record_to_item(
    catalog: Catalog,
    key: &DocumentKey,
    data: &RecordData,
) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert("PK".to_string(), AttributeValue::S(keys::record_pk(catalog, key)));
    item.insert("SK".to_string(), AttributeValue::S(keys::record_sk(catalog, key)));
    item.insert(
        "GSI1PK".to_string(),
        AttributeValue::S(keys::catalog_gsi1_pk(catalog)),
    );
    item.insert(
        "GSI1SK".to_string(),
        AttributeValue::S(keys::record_gsi1_sk(&data.name, key)),
    );

    item.insert(
        CATALOG_ATTRIBUTE.to_string(),
        AttributeValue::S(catalog.plural().to_string()),
    );
    item.insert(KEY_ATTRIBUTE.to_string(), AttributeValue::S(key.to_string()));

    // Data
    for field in catalog.fields() {
        if let Some(value) = data.get(*field) {
            item.insert(
                field.json_name().to_string(),
                AttributeValue::S(value.to_string()),
            );
        }
    }

    item
}

/// Convert a DynamoDB item to a record.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<Record, RepositoryError> {
    let raw_key = get_string(item, KEY_ATTRIBUTE)?;
    let key = DocumentKey::parse(&raw_key).ok_or_else(|| {
        RepositoryError::InvalidData(format!("Invalid document key: {raw_key}"))
    })?;

    let mut data = RecordData::new(
        get_string(item, Field::Name.json_name())?,
        get_string(item, Field::Age.json_name())?,
        get_string(item, Field::Height.json_name())?,
        get_string(item, Field::Weight.json_name())?,
        get_string(item, Field::Image.json_name())?,
    );
    for field in [Field::Technique, Field::Training, Field::Constellation] {
        if let Some(value) = get_optional_string(item, field.json_name()) {
            data.set(field, value);
        }
    }

    Ok(Record::new(RecordId::Document(key), data))
}

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}
