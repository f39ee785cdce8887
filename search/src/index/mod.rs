//! Index facade: the entry points callers use.
//!
//! Every operation is a pass-through to the [`Engine`] with a little
//! bookkeeping around it: fields are registered before values are attached,
//! and a document is only committed once every label has been accepted.

mod results;

use crate::engine::error::EngineError;
use crate::engine::{Engine, EngineDocument, TantivyEngine, TextKind};
use crate::registry::FieldRegistry;
use error::IndexError;
use labelidx_core::types::{Config, DocId, FieldName, IndexName, Label, LabelValue};
use tracing::{debug, warn};

pub use results::QueryResults;

pub mod error {
    use crate::engine::error::EngineError;
    use labelidx_core::types::{DocId, FieldName, FieldType};
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum IndexError {
        #[error("Engine error: {0}")]
        Engine(#[from] EngineError),

        /// Query rejected by the engine, with the engine's message.
        #[error("Query error: {0}")]
        Query(String),

        #[error("Field {field} has unsupported type {field_type}")]
        UnsupportedFieldType {
            field: FieldName,
            field_type: FieldType,
        },

        #[error("Document not found: {0}")]
        DocumentNotFound(DocId),
    }
}

/// One named index and the fields registered on it.
///
/// Mutating operations take `&mut self`, so a handle has one writer at a time.
pub struct LabelIndex<E: Engine = TantivyEngine> {
    name: IndexName,
    engine: E,
    registry: FieldRegistry,
}

/// Create operations.
impl<E: Engine> LabelIndex<E> {
    /// Creates the index in the engine, or opens it if it exists.
    ///
    /// The field registry always starts empty.
    pub fn create(name: IndexName, config: &Config) -> Result<Self, IndexError> {
        let engine = E::create_index(&name, config)?;
        Ok(Self::from_engine(name, engine))
    }

    pub fn from_engine(name: IndexName, engine: E) -> Self {
        Self {
            name,
            engine,
            registry: FieldRegistry::new(),
        }
    }
}

/// Read operations.
impl<E: Engine> LabelIndex<E> {
    pub fn name(&self) -> &IndexName {
        &self.name
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Registered fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldName> + '_ {
        self.registry.iter()
    }
}

/// Mutation operations.
impl<E: Engine> LabelIndex<E> {
    /// Indexes one document built from `labels`, replacing any document with the same id.
    ///
    /// Labels are applied in order. A label whose type has no encoding (geo)
    /// fails the whole call and nothing is committed; fields registered by
    /// earlier labels stay registered.
    pub fn index_document(&mut self, id: &DocId, labels: &[Label]) -> Result<(), IndexError> {
        let mut document = self.engine.create_document(id);

        for label in labels {
            let field = label.field();
            self.registry.ensure(&mut self.engine, field)?;

            match label.value() {
                LabelValue::Numeric(value) => document.add_number(field, *value),
                LabelValue::FullText(value) => document.add_text(field, value, TextKind::FullText),
                LabelValue::Tag(value) => document.add_text(field, value, TextKind::Tag),
                LabelValue::Geo(_) => {
                    warn!(index = %self.name, id = %id, field = %field, "Rejected geo label");
                    return Err(IndexError::UnsupportedFieldType {
                        field: field.clone(),
                        field_type: label.field_type(),
                    });
                }
            }
        }

        self.engine.add_document(document)?;
        debug!(index = %self.name, id = %id, labels = labels.len(), "Indexed document");
        Ok(())
    }

    /// Fails with [`IndexError::DocumentNotFound`] if no document has this id.
    pub fn remove_document(&mut self, id: &DocId) -> Result<(), IndexError> {
        if !self.engine.delete_document(id)? {
            return Err(IndexError::DocumentNotFound(id.clone()));
        }
        debug!(index = %self.name, id = %id, "Removed document");
        Ok(())
    }
}

/// Query operations.
impl<E: Engine> LabelIndex<E> {
    /// Compiles `query` and returns the matching document ids.
    ///
    /// The results stay bound to this index.
    pub fn open_query(&self, query: &str) -> Result<QueryResults<E::Results>, IndexError> {
        let inner = self.engine.iterate_query(query).map_err(|e| match e {
            EngineError::Query(message) => IndexError::Query(message),
            other => IndexError::Engine(other),
        })?;
        Ok(QueryResults::new(self.name.clone(), inner))
    }
}

#[cfg(test)]
mod tests;
