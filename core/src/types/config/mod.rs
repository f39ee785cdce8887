mod core;
mod settings;

pub use self::core::{
    Config, DEFAULT_WRITER_HEAP_BYTES, DEFAULT_WRITER_THREADS, MIN_WRITER_HEAP_BYTES,
};
pub use settings::{ConfigError, IndexSettings, StorageSettings, WriterSettings};
