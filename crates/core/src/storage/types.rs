use std::fmt;

use serde::Serialize;

/// The two backing stores a record can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Document,
    Relational,
}

impl StoreKind {
    /// Parses the `database` selector of a create body (`"mongo"` or `"sql"`).
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector {
            "mongo" => Some(StoreKind::Document),
            "sql" => Some(StoreKind::Relational),
            _ => None,
        }
    }

    /// Label used in the `database` field of responses.
    pub fn label(&self) -> &'static str {
        match self {
            StoreKind::Document => "mongodb",
            StoreKind::Relational => "sql",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Document => f.write_str("MongoDB"),
            StoreKind::Relational => f.write_str("SQL"),
        }
    }
}

impl Serialize for StoreKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Connection state of a store, as reported by diagnostics and readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHealth {
    pub is_connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoreHealth {
    pub fn from_ping<E: fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                is_connected: true,
                error: None,
            },
            Err(e) => Self {
                is_connected: false,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_parsing() {
        assert_eq!(StoreKind::from_selector("mongo"), Some(StoreKind::Document));
        assert_eq!(StoreKind::from_selector("sql"), Some(StoreKind::Relational));
        assert_eq!(StoreKind::from_selector("SQL"), None);
        assert_eq!(StoreKind::from_selector("mysql"), None);
    }

    #[test]
    fn test_labels_and_display() {
        assert_eq!(StoreKind::Document.label(), "mongodb");
        assert_eq!(StoreKind::Relational.to_string(), "SQL");
        assert_eq!(
            serde_json::to_value(StoreKind::Document).unwrap(),
            serde_json::json!("mongodb")
        );
    }

    #[test]
    fn test_health_from_ping() {
        let ok = StoreHealth::from_ping::<String>(Ok(()));
        assert!(ok.is_connected);

        let down = StoreHealth::from_ping(Err("refused"));
        assert!(!down.is_connected);
        assert_eq!(down.error.as_deref(), Some("refused"));
        assert_eq!(
            serde_json::to_value(&down).unwrap(),
            serde_json::json!({ "isConnected": false, "error": "refused" })
        );
    }
}
