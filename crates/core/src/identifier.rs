//! Identifier classification.
//!
//! Record identifiers arrive as untyped path segments. A document-store key is
//! a 24 character hexadecimal token; a relational key is a signed integer.
//! [`classify`] is the single place that decides which store an identifier
//! addresses.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use serde::{Serialize, Serializer};

use crate::resolve::ResolveError;
use crate::storage::StoreKind;

/// Length of a hex-encoded document key.
pub const DOCUMENT_KEY_LEN: usize = 24;

static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(rand::random);
static KEY_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Opaque document-store key, always stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Parses a raw string as a document key.
    ///
    /// Accepts exactly 24 ASCII hex digits in either case.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == DOCUMENT_KEY_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(Self(raw.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Generates a fresh key: 4 bytes of seconds since the epoch, 5 bytes
    /// unique to this process and a 3 byte wrapping counter.
    ///
    /// Keys generated by one thread sort in creation order until the counter
    /// wraps, which takes 2^24 keys.
    pub fn generate() -> Self {
        let seconds = chrono::Utc::now().timestamp() as u32;
        let counter = KEY_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::from_parts(seconds, *PROCESS_UNIQUE, counter)
    }

    /// Builds a key from its components. Only the low 24 bits of `counter` are used.
    pub fn from_parts(seconds: u32, process: [u8; 5], counter: u32) -> Self {
        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);

        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentKey {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ResolveError::InvalidIdentifier(s.to_string()))
    }
}

impl Serialize for DocumentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// The key of a stored record, tagged with the store that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Document(DocumentKey),
    Relational(i64),
}

impl RecordId {
    /// The store this key belongs to.
    pub fn store(&self) -> StoreKind {
        match self {
            RecordId::Document(_) => StoreKind::Document,
            RecordId::Relational(_) => StoreKind::Relational,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Document(key) => write!(f, "{key}"),
            RecordId::Relational(id) => write!(f, "{id}"),
        }
    }
}

/// Document keys serialize as strings and relational keys as numbers.
impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordId::Document(key) => key.serialize(serializer),
            RecordId::Relational(id) => serializer.serialize_i64(*id),
        }
    }
}

/// Result of classifying a raw identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Document(DocumentKey),
    Relational(i64),
    Invalid(String),
}

impl Identifier {
    /// Converts into a [`RecordId`], failing with `InvalidIdentifier` for
    /// identifiers that match neither store.
    pub fn into_record_id(self) -> Result<RecordId, ResolveError> {
        match self {
            Identifier::Document(key) => Ok(RecordId::Document(key)),
            Identifier::Relational(id) => Ok(RecordId::Relational(id)),
            Identifier::Invalid(raw) => Err(ResolveError::InvalidIdentifier(raw)),
        }
    }
}

/// Classifies a raw identifier by its syntactic shape.
///
/// Document-key shape is checked first, so a 24 digit decimal string is a
/// document key. Anything else must parse as an `i64` to be relational.
pub fn classify(raw: &str) -> Identifier {
    if let Some(key) = DocumentKey::parse(raw) {
        return Identifier::Document(key);
    }

    match raw.parse::<i64>() {
        Ok(id) => Identifier::Relational(id),
        Err(_) => Identifier::Invalid(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_token_is_document_key() {
        let id = classify("64b7f0c2a1d3e4f5a6b7c8d9");
        assert_eq!(
            id,
            Identifier::Document(DocumentKey("64b7f0c2a1d3e4f5a6b7c8d9".to_string()))
        );
    }

    #[test]
    fn test_uppercase_hex_is_normalised() {
        let id = classify("64B7F0C2A1D3E4F5A6B7C8D9");
        match id {
            Identifier::Document(key) => assert_eq!(key.as_str(), "64b7f0c2a1d3e4f5a6b7c8d9"),
            other => panic!("Expected document key, got {other:?}"),
        }
    }

    #[test]
    fn test_integer_is_relational() {
        assert_eq!(classify("42"), Identifier::Relational(42));
        assert_eq!(classify("-7"), Identifier::Relational(-7));
    }

    #[test]
    fn test_24_digit_number_is_document_key() {
        assert!(matches!(
            classify("123456789012345678901234"),
            Identifier::Document(_)
        ));
    }

    #[test]
    fn test_wrong_length_hex_is_not_document() {
        // 23 and 25 characters
        assert!(matches!(
            classify("64b7f0c2a1d3e4f5a6b7c8d"),
            Identifier::Invalid(_)
        ));
        assert!(matches!(
            classify("64b7f0c2a1d3e4f5a6b7c8d9a"),
            Identifier::Invalid(_)
        ));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(classify("gon"), Identifier::Invalid("gon".to_string()));
        assert_eq!(classify("12abc"), Identifier::Invalid("12abc".to_string()));
        assert_eq!(classify(""), Identifier::Invalid(String::new()));
    }

    #[test]
    fn test_integer_overflow_is_invalid() {
        assert!(matches!(
            classify("99999999999999999999"),
            Identifier::Invalid(_)
        ));
    }

    #[test]
    fn test_classified_ids_never_cross_stores() {
        for raw in ["1", "17", "9000", "-1"] {
            let id = classify(raw).into_record_id().unwrap();
            assert_eq!(id.store(), StoreKind::Relational, "{raw}");
        }

        for _ in 0..16 {
            let key = DocumentKey::generate();
            let id = classify(key.as_str()).into_record_id().unwrap();
            assert_eq!(id.store(), StoreKind::Document);
        }
    }

    #[test]
    fn test_invalid_into_record_id_fails() {
        let err = classify("abc").into_record_id().unwrap_err();
        assert_eq!(err, ResolveError::InvalidIdentifier("abc".to_string()));
    }

    #[test]
    fn test_from_parts_layout() {
        let key = DocumentKey::from_parts(0x01020304, [0xaa, 0xbb, 0xcc, 0xdd, 0xee], 0xff112233);
        assert_eq!(key.as_str(), "01020304aabbccddee112233");
    }

    #[test]
    fn test_generated_keys_are_unique_and_valid() {
        let a = DocumentKey::generate();
        let b = DocumentKey::generate();
        assert_ne!(a, b);
        assert!(DocumentKey::parse(a.as_str()).is_some());
        assert_eq!(a.as_str().len(), DOCUMENT_KEY_LEN);
    }

    #[test]
    fn test_generated_keys_sort_in_creation_order() {
        let keys: Vec<DocumentKey> = (0..256).map(|_| DocumentKey::generate()).collect();

        let mut sorted = keys.clone();
        sorted.sort();

        assert_eq!(sorted, keys);
    }

    #[test]
    fn test_record_id_serializes_by_store() {
        let key = DocumentKey::parse("64b7f0c2a1d3e4f5a6b7c8d9").unwrap();

        assert_eq!(
            serde_json::to_value(RecordId::Relational(5)).unwrap(),
            serde_json::json!(5)
        );
        assert_eq!(
            serde_json::to_value(RecordId::Document(key)).unwrap(),
            serde_json::json!("64b7f0c2a1d3e4f5a6b7c8d9")
        );
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::Relational(5).to_string(), "5");
        let key = DocumentKey::parse("64b7f0c2a1d3e4f5a6b7c8d9").unwrap();
        assert_eq!(
            RecordId::Document(key).to_string(),
            "64b7f0c2a1d3e4f5a6b7c8d9"
        );
    }
}
