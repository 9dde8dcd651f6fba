//! DynamoDB key generation functions.
//!
//! Pure functions for generating partition and sort keys following the single-table design.

use roster_core::catalog::Catalog;
use roster_core::identifier::DocumentKey;

pub const HUNTER_PREFIX: &str = "HUNTER#";
pub const CABALLERO_PREFIX: &str = "CABALLERO#";
pub const CATALOG_PREFIX: &str = "CATALOG#";
pub const NAME_PREFIX: &str = "NAME#";

/// Name of the catalog index.
pub const GSI1: &str = "GSI1";

fn record_prefix(catalog: Catalog) -> &'static str {
    match catalog {
        Catalog::Hunters => HUNTER_PREFIX,
        Catalog::Caballeros => CABALLERO_PREFIX,
    }
}

/// Generate primary key for a record.
///
/// Pattern: `HUNTER#<key>` or `CABALLERO#<key>`
pub fn record_pk(catalog: Catalog, key: &DocumentKey) -> String {
    format!("{}{key}", record_prefix(catalog))
}

/// Generate sort key for a record.
///
/// Same as PK for single-item lookups.
pub fn record_sk(catalog: Catalog, key: &DocumentKey) -> String {
    record_pk(catalog, key)
}

/// Generate GSI1 partition key shared by every record of a catalog.
///
/// Pattern: `CATALOG#<plural>`
pub fn catalog_gsi1_pk(catalog: Catalog) -> String {
    format!("{CATALOG_PREFIX}{}", catalog.plural())
}

/// Generate GSI1 sort key for a record.
///
/// Pattern: `NAME#<lowercase name>#<key>`
pub fn record_gsi1_sk(name: &str, key: &DocumentKey) -> String {
    format!("{}{key}", name_gsi1_sk_prefix(name))
}

/// Generate the GSI1SK prefix matching every record with the given name.
///
/// Pattern: `NAME#<lowercase name>#`
///
/// Names containing `#` can produce false prefix hits, so callers still
/// compare names after the query.
pub fn name_gsi1_sk_prefix(name: &str) -> String {
    format!("{NAME_PREFIX}{}#", name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> DocumentKey {
        DocumentKey::parse("64b7f0c2a1d3e4f5a6b7c8d9").unwrap()
    }

    #[test]
    fn test_record_keys() {
        assert_eq!(
            record_pk(Catalog::Hunters, &key()),
            "HUNTER#64b7f0c2a1d3e4f5a6b7c8d9"
        );
        assert_eq!(
            record_sk(Catalog::Caballeros, &key()),
            "CABALLERO#64b7f0c2a1d3e4f5a6b7c8d9"
        );
    }

    #[test]
    fn test_catalog_gsi1_pk() {
        assert_eq!(catalog_gsi1_pk(Catalog::Hunters), "CATALOG#hunters");
        assert_eq!(catalog_gsi1_pk(Catalog::Caballeros), "CATALOG#caballeros");
    }

    #[test]
    fn test_gsi1_sk_lowercases_name() {
        assert_eq!(
            record_gsi1_sk("Killua Zoldyck", &key()),
            "NAME#killua zoldyck#64b7f0c2a1d3e4f5a6b7c8d9"
        );
    }

    #[test]
    fn test_name_prefix_folds_accented_letters() {
        let sk = record_gsi1_sk("Ikki de Fénix", &key());
        assert!(sk.starts_with(&name_gsi1_sk_prefix("IKKI DE FÉNIX")));
    }

    #[test]
    fn test_name_prefix_matches_sort_key() {
        let sk = record_gsi1_sk("Shun", &key());
        assert!(sk.starts_with(&name_gsi1_sk_prefix("SHUN")));
        assert!(!sk.starts_with(&name_gsi1_sk_prefix("Shu")));
    }
}
