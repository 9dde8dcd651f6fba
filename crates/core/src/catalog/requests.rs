//! Request validation for create and update.
//!
//! Bodies arrive as raw JSON objects so validation can report exactly which
//! fields are missing instead of failing on the first one.

use serde_json::{Map, Value};

use super::types::{Catalog, Field, RecordData};
use crate::resolve::ResolveError;
use crate::storage::StoreKind;

/// Key of the store selector in create bodies.
pub const DATABASE_KEY: &str = "database";

/// A validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecordRequest {
    pub store: StoreKind,
    pub data: RecordData,
}

impl CreateRecordRequest {
    /// Validates a create body for the given catalog.
    ///
    /// Required fields are checked before the store selector. The error lists
    /// every missing field in schema order.
    pub fn from_body(catalog: Catalog, body: &Map<String, Value>) -> Result<Self, ResolveError> {
        let missing: Vec<&'static str> = catalog
            .required_fields()
            .iter()
            .filter(|field| required_text(body.get(field.json_name())).is_none())
            .map(|field| field.json_name())
            .collect();

        if !missing.is_empty() {
            return Err(ResolveError::MissingFields(missing));
        }

        let store = body
            .get(DATABASE_KEY)
            .and_then(Value::as_str)
            .and_then(StoreKind::from_selector)
            .ok_or(ResolveError::InvalidDatabase)?;

        let mut data = RecordData::default();
        for field in catalog.fields() {
            if let Some(value) = required_text(body.get(field.json_name())) {
                data.set(*field, value);
            }
        }

        Ok(Self { store, data })
    }
}

/// A filtered partial update.
///
/// Holds only allow-listed fields, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    changes: Vec<(Field, String)>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a patch from an update body, keeping only the catalog's
    /// mutable fields. Fails with `NothingToUpdate` when nothing survives.
    pub fn from_body(catalog: Catalog, body: &Map<String, Value>) -> Result<Self, ResolveError> {
        let changes: Vec<(Field, String)> = catalog
            .fields()
            .iter()
            .filter_map(|field| {
                body.get(field.json_name())
                    .and_then(patch_text)
                    .map(|value| (*field, value))
            })
            .collect();

        if changes.is_empty() {
            return Err(ResolveError::NothingToUpdate);
        }

        Ok(Self { changes })
    }

    /// Sets a field, replacing any earlier change to it.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.changes.retain(|(f, _)| *f != field);
        self.changes.push((field, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[(Field, String)] {
        &self.changes
    }

    pub fn apply_to(&self, data: &mut RecordData) {
        for (field, value) in &self.changes {
            data.set(*field, value.clone());
        }
    }
}

/// Text of a required field: non-empty strings and numbers count.
fn required_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Text of an update value: any string, or a number.
fn patch_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
