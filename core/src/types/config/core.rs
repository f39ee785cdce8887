use crate::types::name::IndexName;
use std::path::PathBuf;

pub const DEFAULT_WRITER_HEAP_BYTES: usize = 50_000_000;
pub const MIN_WRITER_HEAP_BYTES: usize = 15_000_000;
pub const DEFAULT_WRITER_THREADS: usize = 1;

/// Runtime configuration for opening indexes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one subdirectory per index. `None` keeps indexes in memory.
    pub base_path: Option<PathBuf>,
    /// Total indexing heap shared by the writer threads.
    pub writer_heap_bytes: usize,
    pub writer_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Config {
    pub fn in_memory() -> Self {
        Self {
            base_path: None,
            writer_heap_bytes: DEFAULT_WRITER_HEAP_BYTES,
            writer_threads: DEFAULT_WRITER_THREADS,
        }
    }

    pub fn on_disk(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
            ..Self::in_memory()
        }
    }

    pub fn index_dir(&self, name: &IndexName) -> Option<PathBuf> {
        self.base_path.as_ref().map(|base| base.join(name.as_str()))
    }

    pub fn tantivy_path(&self, name: &IndexName) -> Option<PathBuf> {
        self.index_dir(name).map(|dir| dir.join("tantivy"))
    }

    pub fn catalog_path(&self, name: &IndexName) -> Option<PathBuf> {
        self.index_dir(name).map(|dir| dir.join("catalog.redb"))
    }
}
