//! Call contract of the underlying search engine.
//!
//! The facade only ever talks to an engine through [`Engine`] and
//! [`EngineDocument`]. [`TantivyEngine`] is the production implementation.

mod tantivy_engine;

use error::EngineError;
use labelidx_core::types::{Config, DocId, FieldCapabilities, FieldName, IndexName};

pub use tantivy_engine::{PendingDocument, TantivyEngine, TantivyResults};

pub mod error {
    use labelidx_core::catalog::error::CatalogError;
    use labelidx_core::types::{FieldName, FieldType};
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum EngineError {
        #[error("Tantivy error: {0}")]
        Tantivy(#[from] tantivy::TantivyError),

        #[error("Directory error: {0}")]
        Directory(#[from] tantivy::directory::error::OpenDirectoryError),

        #[error("Catalog error: {0}")]
        Catalog(#[from] CatalogError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        /// Query failed to parse or plan; carries the engine's message.
        #[error("{0}")]
        Query(String),

        #[error("Field {field} is not declared for {field_type} values")]
        UndeclaredField {
            field: FieldName,
            field_type: FieldType,
        },

        #[error("Document encoding error: {0}")]
        Document(String),

        #[error("Stored document has no valid id")]
        MissingId,
    }
}

/// String value flavours a document accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    FullText,
    Tag,
}

/// Engine-native document under construction.
pub trait EngineDocument {
    fn add_number(&mut self, field: &FieldName, value: f64);

    fn add_text(&mut self, field: &FieldName, value: &str, kind: TextKind);
}

/// One engine index.
pub trait Engine: Sized {
    type Document: EngineDocument;

    /// Forward-only sequence of matching document ids.
    type Results: Iterator<Item = Result<DocId, EngineError>>;

    /// Creates the index, or opens it if it already exists.
    fn create_index(name: &IndexName, config: &Config) -> Result<Self, EngineError>;

    fn create_field(
        &mut self,
        name: &FieldName,
        capabilities: FieldCapabilities,
    ) -> Result<(), EngineError>;

    fn create_document(&self, id: &DocId) -> Self::Document;

    /// Commits a document, replacing any document with the same id.
    fn add_document(&mut self, document: Self::Document) -> Result<(), EngineError>;

    /// Returns `false` if no document had this id.
    fn delete_document(&mut self, id: &DocId) -> Result<bool, EngineError>;

    fn iterate_query(&self, query: &str) -> Result<Self::Results, EngineError>;
}
