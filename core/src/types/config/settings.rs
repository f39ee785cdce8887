use super::core::{Config, DEFAULT_WRITER_HEAP_BYTES, DEFAULT_WRITER_THREADS, MIN_WRITER_HEAP_BYTES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// User-facing index settings, persisted as labelidx.toml.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub writer: WriterSettings,
}

impl IndexSettings {
    /// Returns the settings file path within the given data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("labelidx.toml")
    }

    /// Loads settings from a TOML file. Returns defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings = toml::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the list of validation errors, empty if the settings are valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.writer.threads == 0 {
            errors.push("writer.threads must be at least 1".to_string());
        }

        if self.writer.heap_bytes < MIN_WRITER_HEAP_BYTES * self.writer.threads.max(1) {
            errors.push(format!(
                "writer.heap_bytes must be at least {MIN_WRITER_HEAP_BYTES} per writer thread"
            ));
        }

        if matches!(&self.storage.base_path, Some(path) if path.as_os_str().is_empty()) {
            errors.push("storage.base_path must not be empty".to_string());
        }

        errors
    }

    /// Returns settings with invalid values replaced by defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        let threads = if self.writer.threads == 0 {
            defaults.writer.threads
        } else {
            self.writer.threads
        };
        let heap_bytes = if self.writer.heap_bytes < MIN_WRITER_HEAP_BYTES * threads {
            (MIN_WRITER_HEAP_BYTES * threads).max(defaults.writer.heap_bytes)
        } else {
            self.writer.heap_bytes
        };
        let base_path = self
            .storage
            .base_path
            .clone()
            .filter(|path| !path.as_os_str().is_empty());

        Self {
            storage: StorageSettings { base_path },
            writer: WriterSettings {
                heap_bytes,
                threads,
            },
        }
    }
}

impl From<&IndexSettings> for Config {
    fn from(settings: &IndexSettings) -> Self {
        Self {
            base_path: settings.storage.base_path.clone(),
            writer_heap_bytes: settings.writer.heap_bytes,
            writer_threads: settings.writer.threads,
        }
    }
}

/// Where indexes live.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Absent means in-memory indexes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<PathBuf>,
}

/// Engine writer resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterSettings {
    #[serde(default = "default_heap_bytes")]
    pub heap_bytes: usize,
    #[serde(default = "default_threads")]
    pub threads: usize,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            heap_bytes: default_heap_bytes(),
            threads: default_threads(),
        }
    }
}

fn default_heap_bytes() -> usize {
    DEFAULT_WRITER_HEAP_BYTES
}

fn default_threads() -> usize {
    DEFAULT_WRITER_THREADS
}

/// Errors that can occur when loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
