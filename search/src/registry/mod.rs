//! Per-index record of fields already declared to the engine.
//!
//! Exists only to keep field-creation calls off the engine for names it has
//! already seen. Entries are never removed.

use crate::engine::Engine;
use crate::engine::error::EngineError;
use labelidx_core::types::{FieldCapabilities, FieldName};
use std::collections::HashSet;
use tracing::debug;

/// Registration storage grows by this many entries at a time.
pub const FIELD_BATCH: usize = 64;

#[derive(Debug, Default)]
pub struct FieldRegistry {
    /// Registration order.
    names: Vec<FieldName>,
    known: HashSet<FieldName>,
    batches: usize,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &FieldName) -> bool {
        self.known.contains(name)
    }

    /// Declares `name` to the engine on first sight.
    ///
    /// Every field is declared full-text, numeric and tag at once. Returns
    /// `true` if the field was new; known names never reach the engine.
    pub fn ensure<E: Engine>(
        &mut self,
        engine: &mut E,
        name: &FieldName,
    ) -> Result<bool, EngineError> {
        if self.contains(name) {
            return Ok(false);
        }

        engine.create_field(name, FieldCapabilities::POLY)?;

        self.grow_if_full();
        self.names.push(name.clone());
        self.known.insert(name.clone());

        debug!(field = %name, count = self.names.len(), "Registered field");
        Ok(true)
    }

    /// Reserves one more batch when the count sits on a batch boundary.
    fn grow_if_full(&mut self) {
        if self.names.len() % FIELD_BATCH == 0 {
            self.names.reserve_exact(FIELD_BATCH);
            self.batches += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of storage batches allocated so far.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn capacity(&self) -> usize {
        self.names.capacity()
    }

    /// Registered names in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldName> + '_ {
        self.names.iter()
    }
}
