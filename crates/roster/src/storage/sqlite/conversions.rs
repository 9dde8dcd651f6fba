//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use roster_core::catalog::{Record, RecordData};
use roster_core::identifier::RecordId;
use rusqlite::Row;

/// Convert a SQLite row to a Record.
///
/// Expected columns: id, nombre, edad, altura, peso, imagen, tecnica, entrenamiento, constelacion
pub fn row_to_record(row: &Row) -> rusqlite::Result<Record> {
    let id: i64 = row.get(0)?;

    let data = RecordData {
        name: row.get(1)?,
        age: row.get(2)?,
        height: row.get(3)?,
        weight: row.get(4)?,
        image: row.get(5)?,
        technique: row.get(6)?,
        training: row.get(7)?,
        constellation: row.get(8)?,
    };

    Ok(Record::new(RecordId::Relational(id), data))
}
