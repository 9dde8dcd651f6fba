//! Demo records for seeding.
//!
//! Pure functions with no side effects. Records alternate between the two
//! stores so a freshly seeded service exercises both lookup paths.

use super::types::{Catalog, RecordData};
use crate::storage::StoreKind;

/// Generate demo records for a catalog, each tagged with the store it
/// should be inserted into.
///
/// # Example
///
/// ```
/// use roster_core::catalog::{generate_seed_records, Catalog};
///
/// let records = generate_seed_records(Catalog::Hunters);
/// assert!(!records.is_empty());
/// ```
pub fn generate_seed_records(catalog: Catalog) -> Vec<(StoreKind, RecordData)> {
    let records = match catalog {
        Catalog::Hunters => vec![
            RecordData::new(
                "Gon Freecss",
                "12",
                "154 cm",
                "49 kg",
                "https://static.wikia.nocookie.net/hunterxhunter/images/gon.png",
            ),
            RecordData::new(
                "Killua Zoldyck",
                "12",
                "158 cm",
                "45 kg",
                "https://static.wikia.nocookie.net/hunterxhunter/images/killua.png",
            ),
            RecordData::new(
                "Kurapika",
                "17",
                "171 cm",
                "59 kg",
                "https://static.wikia.nocookie.net/hunterxhunter/images/kurapika.png",
            ),
            RecordData::new(
                "Leorio Paradinight",
                "19",
                "193 cm",
                "85 kg",
                "https://static.wikia.nocookie.net/hunterxhunter/images/leorio.png",
            ),
        ],
        Catalog::Caballeros => vec![
            RecordData::new(
                "Seiya",
                "13",
                "165 cm",
                "53 kg",
                "https://static.wikia.nocookie.net/saintseiya/images/seiya.png",
            )
            .with_constellation("Pegaso")
            .with_technique("Meteoros de Pegaso")
            .with_training("Grecia"),
            RecordData::new(
                "Shiryu",
                "14",
                "172 cm",
                "53 kg",
                "https://static.wikia.nocookie.net/saintseiya/images/shiryu.png",
            )
            .with_constellation("Dragón")
            .with_technique("Cólera del Dragón")
            .with_training("Cinco Picos de Rozan"),
            RecordData::new(
                "Hyoga",
                "14",
                "173 cm",
                "60 kg",
                "https://static.wikia.nocookie.net/saintseiya/images/hyoga.png",
            )
            .with_constellation("Cisne")
            .with_technique("Polvo de Diamantes")
            .with_training("Siberia Oriental"),
            RecordData::new(
                "Shun",
                "13",
                "165 cm",
                "51 kg",
                "https://static.wikia.nocookie.net/saintseiya/images/shun.png",
            )
            .with_constellation("Andrómeda")
            .with_technique("Cadena Nebular")
            .with_training("Isla de Andrómeda"),
        ],
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, data)| {
            let store = if i % 2 == 0 {
                StoreKind::Document
            } else {
                StoreKind::Relational
            };
            (store, data)
        })
        .collect()
}
