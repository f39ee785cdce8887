//! Label-index core types.
//!
//! Validated identifiers, the label model, configuration, and the redb-backed
//! field catalog the search engine records declared fields in.

pub mod catalog;
pub mod types;
