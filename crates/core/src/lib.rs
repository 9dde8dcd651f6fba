//! Functional core of the roster service.
//!
//! Everything in this crate is pure data and pure functions: catalog and
//! record types, identifier classification, request validation, the
//! dual-store precedence rule, error types and their HTTP status mappings,
//! plus the repository traits the binary implements. No I/O happens here.

pub mod catalog;
pub mod identifier;
pub mod resolve;
pub mod storage;
