//! Field catalog backed by redb.
//!
//! Records every field declared on an engine index together with the
//! capabilities it was declared with (FieldName → capability bits). On-disk
//! indexes keep the catalog next to their segments; in-memory indexes use
//! redb's in-memory backend.

use crate::catalog::error::CatalogError;
use crate::types::{FieldCapabilities, FieldName};
use redb::backends::InMemoryBackend;
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum CatalogError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }
}

/// Fields table: FieldName → capability bits
const FIELDS_TABLE: TableDefinition<FieldName, u8> = TableDefinition::new("fields");

pub struct FieldCatalog {
    db: redb::Database,
}

impl FieldCatalog {
    /// Creates or opens a catalog file, creating parent directories as needed.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = redb::Database::create(path)?;
        Self::init(db)
    }

    pub fn in_memory() -> Result<Self, CatalogError> {
        let db = redb::Database::builder().create_with_backend(InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: redb::Database) -> Result<Self, CatalogError> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(FIELDS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

/// Write operations.
impl FieldCatalog {
    /// Declares a field, merging capabilities into any existing declaration.
    ///
    /// Returns `true` if the field was not declared before.
    pub fn declare(
        &mut self,
        name: &FieldName,
        capabilities: FieldCapabilities,
    ) -> Result<bool, CatalogError> {
        let write_txn = self.db.begin_write()?;

        let is_new;
        {
            let mut table = write_txn.open_table(FIELDS_TABLE)?;

            let existing = table
                .get(name)?
                .map(|guard| FieldCapabilities::from_bits_truncate(guard.value()));
            is_new = existing.is_none();

            let merged = existing.unwrap_or_default().union(capabilities);
            if existing != Some(merged) {
                table.insert(name, merged.bits())?;
            }
        }

        write_txn.commit()?;
        Ok(is_new)
    }
}

/// Read operations.
impl FieldCatalog {
    pub fn capabilities(
        &self,
        name: &FieldName,
    ) -> Result<Option<FieldCapabilities>, CatalogError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(FIELDS_TABLE)?;

        Ok(table
            .get(name)?
            .map(|guard| FieldCapabilities::from_bits_truncate(guard.value())))
    }

    pub fn contains(&self, name: &FieldName) -> Result<bool, CatalogError> {
        Ok(self.capabilities(name)?.is_some())
    }

    /// Returns all declared fields in name order.
    pub fn fields(&self) -> Result<Vec<(FieldName, FieldCapabilities)>, CatalogError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(FIELDS_TABLE)?;
        let mut fields = Vec::new();

        for entry in table.iter()? {
            let (name, bits) = entry?;
            fields.push((
                name.value(),
                FieldCapabilities::from_bits_truncate(bits.value()),
            ));
        }

        Ok(fields)
    }
}
