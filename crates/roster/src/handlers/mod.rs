pub mod debug;
pub mod error;
pub mod health;
pub mod records;
pub mod root;

pub use error::AppError;
