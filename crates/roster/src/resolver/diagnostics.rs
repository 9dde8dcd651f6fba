//! Read-only views of both stores used by the debug and readiness endpoints.

use serde::Serialize;

use roster_core::catalog::Record;
use roster_core::storage::{StoreHealth, StoreKind};

/// Connection state of both stores.
#[derive(Debug, Clone, Serialize)]
pub struct StoresHealth {
    #[serde(rename = "mongodb")]
    pub document: StoreHealth,
    #[serde(rename = "sql")]
    pub relational: StoreHealth,
}

impl StoresHealth {
    pub fn is_ready(&self) -> bool {
        self.document.is_connected && self.relational.is_connected
    }
}

/// Result of checking one store for a raw identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCheck {
    pub is_valid: bool,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StoreCheck {
    pub fn found(data: Option<Record>) -> Self {
        Self {
            is_valid: true,
            found: data.is_some(),
            data,
            reason: None,
        }
    }

    /// The identifier does not have this store's key shape.
    pub fn invalid(store: StoreKind) -> Self {
        Self {
            is_valid: false,
            found: false,
            data: None,
            reason: Some(format!("ID no válido para {store}")),
        }
    }
}

/// An identifier checked against both stores.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierProbe {
    pub id: String,
    #[serde(rename = "mongoCheck")]
    pub document: StoreCheck,
    #[serde(rename = "sqlCheck")]
    pub relational: StoreCheck,
}

/// Connection state, count and contents of one store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub connection: &'static str,
    pub record_count: usize,
    pub records: Vec<Record>,
}

impl StoreSnapshot {
    pub fn new(health: &StoreHealth, records: Vec<Record>) -> Self {
        Self {
            connection: if health.is_connected {
                "conectado"
            } else {
                "desconectado"
            },
            record_count: records.len(),
            records,
        }
    }
}

/// Both stores' snapshots for one catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    #[serde(rename = "mongodb")]
    pub document: StoreSnapshot,
    #[serde(rename = "sql")]
    pub relational: StoreSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::catalog::RecordData;
    use roster_core::identifier::RecordId;
    use serde_json::json;

    #[test]
    fn test_invalid_check_serializes_reason() {
        let check = StoreCheck::invalid(StoreKind::Relational);

        assert_eq!(
            serde_json::to_value(&check).unwrap(),
            json!({ "isValid": false, "found": false, "reason": "ID no válido para SQL" })
        );
    }

    #[test]
    fn test_snapshot_counts_records() {
        let health = StoreHealth::from_ping::<String>(Ok(()));
        let record = Record::new(
            RecordId::Relational(1),
            RecordData::new("Gon", "12", "154 cm", "49 kg", "x"),
        );

        let snapshot = StoreSnapshot::new(&health, vec![record]);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["connection"], "conectado");
        assert_eq!(json["recordCount"], 1);
        assert_eq!(json["records"][0]["id"], 1);
    }

    #[test]
    fn test_health_uses_wire_labels() {
        let health = StoresHealth {
            document: StoreHealth::from_ping::<String>(Ok(())),
            relational: StoreHealth::from_ping(Err("locked")),
        };

        let json = serde_json::to_value(&health).unwrap();

        assert_eq!(json["mongodb"]["isConnected"], true);
        assert_eq!(json["sql"]["error"], "locked");
        assert!(!health.is_ready());
    }
}
