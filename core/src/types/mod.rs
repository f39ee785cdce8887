pub(crate) mod config;
pub use config::{
    Config, ConfigError, DEFAULT_WRITER_HEAP_BYTES, DEFAULT_WRITER_THREADS, IndexSettings,
    MIN_WRITER_HEAP_BYTES, StorageSettings, WriterSettings,
};

pub(crate) mod name;
pub use name::{
    DocId, DocIdError, FieldName, FieldNameError, IndexName, IndexNameError, MAX_DOC_ID_LENGTH,
    MAX_FIELD_NAME_LENGTH, MAX_INDEX_NAME_LENGTH,
};

pub(crate) mod field;
pub use field::{FieldCapabilities, FieldType};

pub mod label;
pub use label::error::LabelError;
pub use label::{ExternalLabel, ExternalStrings, Label, LabelValue};
