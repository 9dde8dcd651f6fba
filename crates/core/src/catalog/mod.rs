mod mock_data;
mod requests;
mod types;

pub use mock_data::generate_seed_records;
pub use requests::{CreateRecordRequest, RecordPatch, DATABASE_KEY};
pub use types::{Catalog, Field, PathLookup, Record, RecordData};
