//! Pure pieces of the dual-store resolution workflow.

mod error;
mod http_mapping;
mod precedence;

pub use error::ResolveError;
pub use http_mapping::resolve_error_to_status_code;
pub use precedence::pick_by_precedence;
