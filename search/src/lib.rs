//! Label-index search facade.
//!
//! Forwards document indexing, removal and query iteration to a search engine
//! (tantivy by default), keeping only the bookkeeping the engine can't do for
//! the caller.
//!
//! # Design
//!
//! - [`FieldRegistry`] remembers which fields were declared to the engine, so
//!   each field costs one field-creation call per index handle. Every field is
//!   declared full-text, numeric and tag up front.
//! - [`LabelIndex::index_document`] turns a list of labels into one engine
//!   document. Any label without an encoding (geo) rejects the whole document.
//! - [`QueryResults`] is bound to the index that opened it; there is no
//!   process-wide "current index".
//!
//! # Queries
//!
//! Query strings go to the engine untouched. With [`TantivyEngine`], a field
//! `f` is addressed as `text.f` (full-text), `tag.f` (exact tag) or `num.f`
//! (number).

pub mod engine;
pub mod index;
mod registry;

pub use engine::error::EngineError;
pub use engine::{Engine, EngineDocument, TantivyEngine, TextKind};
pub use index::error::IndexError;
pub use index::{LabelIndex, QueryResults};
pub use registry::{FIELD_BATCH, FieldRegistry};

#[cfg(test)]
mod testing;
