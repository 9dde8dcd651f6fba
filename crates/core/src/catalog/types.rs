use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use crate::identifier::RecordId;
use crate::storage::StoreKind;

/// One of the character datasets served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    Hunters,
    Caballeros,
}

/// How the single-resource `GET /{singular}/{key}` route interprets its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathLookup {
    ById,
    ByName,
}

const HUNTER_FIELDS: &[Field] = &[
    Field::Name,
    Field::Age,
    Field::Height,
    Field::Weight,
    Field::Image,
];

const CABALLERO_FIELDS: &[Field] = &[
    Field::Name,
    Field::Age,
    Field::Height,
    Field::Weight,
    Field::Image,
    Field::Technique,
    Field::Training,
    Field::Constellation,
];

const REQUIRED_FIELDS: &[Field] = &[
    Field::Name,
    Field::Age,
    Field::Height,
    Field::Weight,
    Field::Image,
];

impl Catalog {
    pub const ALL: [Catalog; 2] = [Catalog::Hunters, Catalog::Caballeros];

    /// Collection path segment, e.g. `/hunters`.
    pub fn plural(&self) -> &'static str {
        match self {
            Catalog::Hunters => "hunters",
            Catalog::Caballeros => "caballeros",
        }
    }

    /// Single resource path segment, e.g. `/hunter/{id}`.
    pub fn singular(&self) -> &'static str {
        match self {
            Catalog::Hunters => "hunter",
            Catalog::Caballeros => "caballero",
        }
    }

    /// Entity name used in logs and error messages.
    pub fn entity_type(&self) -> &'static str {
        match self {
            Catalog::Hunters => "Hunter",
            Catalog::Caballeros => "Caballero",
        }
    }

    /// Document-store collection name.
    pub fn collection(&self) -> &'static str {
        match self {
            Catalog::Hunters => "personajes",
            Catalog::Caballeros => "caballeros",
        }
    }

    /// Relational table name.
    pub fn table(&self) -> &'static str {
        match self {
            Catalog::Hunters => "characters_rel",
            Catalog::Caballeros => "caballeros_rel",
        }
    }

    /// Response key holding the deleted record.
    pub fn deleted_key(&self) -> &'static str {
        match self {
            Catalog::Hunters => "deletedHunter",
            Catalog::Caballeros => "deletedCaballero",
        }
    }

    /// Schema fields in declaration order. Doubles as the update allow-list.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Catalog::Hunters => HUNTER_FIELDS,
            Catalog::Caballeros => CABALLERO_FIELDS,
        }
    }

    /// Fields that must be present on create.
    pub fn required_fields(&self) -> &'static [Field] {
        REQUIRED_FIELDS
    }

    pub fn path_lookup(&self) -> PathLookup {
        match self {
            Catalog::Hunters => PathLookup::ById,
            Catalog::Caballeros => PathLookup::ByName,
        }
    }

    pub fn from_singular(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.singular() == segment)
    }
}

/// A logical record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Age,
    Height,
    Weight,
    Image,
    Technique,
    Training,
    Constellation,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Age,
        Field::Height,
        Field::Weight,
        Field::Image,
        Field::Technique,
        Field::Training,
        Field::Constellation,
    ];

    /// Wire name of the field in request and response bodies.
    pub fn json_name(&self) -> &'static str {
        match self {
            Field::Name => "nombre",
            Field::Age => "edad",
            Field::Height => "altura",
            Field::Weight => "peso",
            Field::Image => "imagen",
            Field::Technique => "tecnica",
            Field::Training => "entrenamiento",
            Field::Constellation => "constelacion",
        }
    }

    pub fn from_json_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.json_name() == name)
    }
}

/// The store-independent content of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordData {
    pub name: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub image: String,
    pub technique: Option<String>,
    pub training: Option<String>,
    pub constellation: Option<String>,
}

impl RecordData {
    /// Creates record data with the required fields set.
    pub fn new(
        name: impl Into<String>,
        age: impl Into<String>,
        height: impl Into<String>,
        weight: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            height: height.into(),
            weight: weight.into(),
            image: image.into(),
            ..Self::default()
        }
    }

    pub fn with_technique(mut self, technique: impl Into<String>) -> Self {
        self.technique = Some(technique.into());
        self
    }

    pub fn with_training(mut self, training: impl Into<String>) -> Self {
        self.training = Some(training.into());
        self
    }

    pub fn with_constellation(mut self, constellation: impl Into<String>) -> Self {
        self.constellation = Some(constellation.into());
        self
    }

    /// Returns the value of a field, `None` for unset optional fields.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Age => Some(&self.age),
            Field::Height => Some(&self.height),
            Field::Weight => Some(&self.weight),
            Field::Image => Some(&self.image),
            Field::Technique => self.technique.as_deref(),
            Field::Training => self.training.as_deref(),
            Field::Constellation => self.constellation.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Age => self.age = value,
            Field::Height => self.height = value,
            Field::Weight => self.weight = value,
            Field::Image => self.image = value,
            Field::Technique => self.technique = Some(value),
            Field::Training => self.training = Some(value),
            Field::Constellation => self.constellation = Some(value),
        }
    }

    /// Case-insensitive exact comparison against the record name.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// A record as stored in one of the backends.
///
/// Serializes with `_id` for document-store records and `id` for relational
/// ones, followed by the populated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub data: RecordData,
}

impl Record {
    pub fn new(id: RecordId, data: RecordData) -> Self {
        Self { id, data }
    }

    pub fn store(&self) -> StoreKind {
        self.id.store()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.id {
            RecordId::Document(key) => map.serialize_entry("_id", key)?,
            RecordId::Relational(id) => map.serialize_entry("id", id)?,
        }
        for field in Field::ALL {
            if let Some(value) = self.data.get(field) {
                map.serialize_entry(field.json_name(), value)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::DocumentKey;

    fn gon() -> RecordData {
        RecordData::new("Gon Freecss", "12", "154 cm", "49 kg", "https://img/gon.png")
    }

    #[test]
    fn test_catalog_names() {
        assert_eq!(Catalog::Hunters.plural(), "hunters");
        assert_eq!(Catalog::Caballeros.singular(), "caballero");
        assert_eq!(Catalog::Hunters.table(), "characters_rel");
        assert_eq!(Catalog::Hunters.collection(), "personajes");
        assert_eq!(Catalog::from_singular("caballero"), Some(Catalog::Caballeros));
        assert_eq!(Catalog::from_singular("personaje"), None);
    }

    #[test]
    fn test_only_caballeros_have_domain_fields() {
        assert!(!Catalog::Hunters.fields().contains(&Field::Technique));
        assert!(Catalog::Caballeros.fields().contains(&Field::Constellation));
        assert_eq!(
            Catalog::Hunters.required_fields(),
            Catalog::Caballeros.required_fields()
        );
    }

    #[test]
    fn test_field_json_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_json_name(field.json_name()), Some(field));
        }
        assert_eq!(Field::from_json_name("database"), None);
    }

    #[test]
    fn test_name_matches_ignores_case() {
        let data = gon();
        assert!(data.name_matches("gon freecss"));
        assert!(data.name_matches("GON FREECSS"));
        assert!(!data.name_matches("gon"));
    }

    #[test]
    fn test_relational_record_serializes_numeric_id() {
        let record = Record::new(RecordId::Relational(3), gon());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["nombre"], "Gon Freecss");
        assert_eq!(json["imagen"], "https://img/gon.png");
        assert!(json.get("_id").is_none());
        assert!(json.get("tecnica").is_none());
    }

    #[test]
    fn test_document_record_serializes_underscore_id() {
        let key = DocumentKey::parse("64b7f0c2a1d3e4f5a6b7c8d9").unwrap();
        let data = RecordData::new("Seiya", "13", "165 cm", "53 kg", "https://img/seiya.png")
            .with_constellation("Pegaso")
            .with_technique("Meteoros de Pegaso");
        let record = Record::new(RecordId::Document(key), data);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["_id"], "64b7f0c2a1d3e4f5a6b7c8d9");
        assert_eq!(json["constelacion"], "Pegaso");
        assert_eq!(json["tecnica"], "Meteoros de Pegaso");
        assert!(json.get("entrenamiento").is_none());
    }
}
