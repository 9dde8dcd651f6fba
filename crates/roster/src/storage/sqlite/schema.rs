//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

use roster_core::catalog::Catalog;

/// SQL statement to create all tables.
///
/// Both catalog tables share one column layout; the caballero-only columns
/// stay NULL for hunters.
pub const CREATE_TABLES: &str = r#"
-- Hunter x Hunter characters
CREATE TABLE IF NOT EXISTS characters_rel (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    edad TEXT NOT NULL,
    altura TEXT NOT NULL,
    peso TEXT NOT NULL,
    imagen TEXT NOT NULL,
    tecnica TEXT,
    entrenamiento TEXT,
    constelacion TEXT
);

-- Caballeros del Zodiaco characters
CREATE TABLE IF NOT EXISTS caballeros_rel (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    edad TEXT NOT NULL,
    altura TEXT NOT NULL,
    peso TEXT NOT NULL,
    imagen TEXT NOT NULL,
    tecnica TEXT,
    entrenamiento TEXT,
    constelacion TEXT
);

-- Case-insensitive name lookups (superseded ASCII-only LOWER() indexes)
DROP INDEX IF EXISTS idx_characters_rel_nombre;
DROP INDEX IF EXISTS idx_caballeros_rel_nombre;
CREATE INDEX IF NOT EXISTS idx_characters_rel_nombre_folded ON characters_rel(unicode_lower(nombre));
CREATE INDEX IF NOT EXISTS idx_caballeros_rel_nombre_folded ON caballeros_rel(unicode_lower(nombre));
"#;

/// Unicode-aware `LOWER()`, registered on the connection before
/// [`CREATE_TABLES`] runs. SQLite's built-in `LOWER()` folds ASCII only.
///
/// Writers must register it too, since the name indexes are built on it.
pub const UNICODE_LOWER: &str = "unicode_lower";

/// Connectivity probe.
pub const PING: &str = "SELECT 1";

/// Statements for one catalog table.
#[derive(Debug)]
pub struct TableQueries {
    pub insert: &'static str,
    pub select_all: &'static str,
    pub select_by_id: &'static str,
    pub select_by_name: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

static HUNTER_QUERIES: TableQueries = TableQueries {
    insert: r#"
INSERT INTO characters_rel (nombre, edad, altura, peso, imagen, tecnica, entrenamiento, constelacion)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#,
    select_all: r#"
SELECT id, nombre, edad, altura, peso, imagen, tecnica, entrenamiento, constelacion
FROM characters_rel
ORDER BY id ASC
"#,
    select_by_id: r#"
SELECT id, nombre, edad, altura, peso, imagen, tecnica, entrenamiento, constelacion
FROM characters_rel
WHERE id = ?1
"#,
    select_by_name: r#"
SELECT id, nombre, edad, altura, peso, imagen, tecnica, entrenamiento, constelacion
FROM characters_rel
WHERE unicode_lower(nombre) = unicode_lower(?1)
ORDER BY id ASC
LIMIT 1
"#,
    update: r#"
UPDATE characters_rel
SET nombre = ?2, edad = ?3, altura = ?4, peso = ?5, imagen = ?6, tecnica = ?7, entrenamiento = ?8, constelacion = ?9
WHERE id = ?1
"#,
    delete: r#"
DELETE FROM characters_rel
WHERE id = ?1
"#,
};

static CABALLERO_QUERIES: TableQueries = TableQueries {
    insert: r#"
INSERT INTO caballeros_rel (nombre, edad, altura, peso, imagen, tecnica, entrenamiento, constelacion)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#,
    select_all: r#"
SELECT id, nombre, edad, altura, peso, imagen, tecnica, entrenamiento, constelacion
FROM caballeros_rel
ORDER BY id ASC
"#,
    select_by_id: r#"
SELECT id, nombre, edad, altura, peso, imagen, tecnica, entrenamiento, constelacion
FROM caballeros_rel
WHERE id = ?1
"#,
    select_by_name: r#"
SELECT id, nombre, edad, altura, peso, imagen, tecnica, entrenamiento, constelacion
FROM caballeros_rel
WHERE unicode_lower(nombre) = unicode_lower(?1)
ORDER BY id ASC
LIMIT 1
"#,
    update: r#"
UPDATE caballeros_rel
SET nombre = ?2, edad = ?3, altura = ?4, peso = ?5, imagen = ?6, tecnica = ?7, entrenamiento = ?8, constelacion = ?9
WHERE id = ?1
"#,
    delete: r#"
DELETE FROM caballeros_rel
WHERE id = ?1
"#,
};

/// Returns the statements for a catalog's table.
pub fn queries(catalog: Catalog) -> &'static TableQueries {
    match catalog {
        Catalog::Hunters => &HUNTER_QUERIES,
        Catalog::Caballeros => &CABALLERO_QUERIES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS characters_rel"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS caballeros_rel"));
        assert!(CREATE_TABLES.contains("AUTOINCREMENT"));
    }

    #[test]
    fn test_name_indexes_use_folding_function() {
        assert!(!CREATE_TABLES.contains("(LOWER(nombre))"));
        assert_eq!(
            CREATE_TABLES
                .matches(&format!("{UNICODE_LOWER}(nombre)"))
                .count(),
            2
        );
    }

    #[test]
    fn test_queries_target_catalog_table() {
        for catalog in Catalog::ALL {
            let q = queries(catalog);
            for sql in [
                q.insert,
                q.select_all,
                q.select_by_id,
                q.select_by_name,
                q.update,
                q.delete,
            ] {
                assert!(sql.contains(catalog.table()), "{catalog:?}: {sql}");
            }
        }
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        for catalog in Catalog::ALL {
            assert!(queries(catalog)
                .select_by_name
                .contains("unicode_lower(nombre) = unicode_lower(?1)"));
        }
    }
}
