//! Error types for settings validation and loading.
//!
//! This module defines all errors that can occur while turning a settings
//! source (file, bucket object, in-memory mapping) into a `VertexConfig`.

use crate::storage::StorageError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// A required field is absent.
    Missing,

    /// The field is present but holds a value of another type.
    WrongType {
        expected: &'static str,
        found: String,
    },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Missing => write!(f, "field required"),
            FieldIssue::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
        }
    }
}

/// A validation failure attached to a field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub issue: FieldIssue,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.issue)
    }
}

/// Every field that failed validation, in schema order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} invalid configuration field(s): {}", .errors.len(), render(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Names of the offending fields.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.iter().map(|e| e.field)
    }

    /// Returns the error recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

fn render(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a settings file from disk.
    #[error("Failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse YAML settings.
    #[error("Failed to parse YAML config at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Failed to parse JSON settings.
    #[error("Failed to parse JSON config at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to parse TOML settings.
    #[error("Failed to parse TOML config at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported config format for {path}: expected .yaml, .yml, .json or .toml")]
    UnsupportedFormat { path: PathBuf },

    /// The document root is not a key/value mapping.
    #[error("Config root must be a mapping, found {found}")]
    NotAMapping { found: String },

    /// One or more fields failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The settings object could not be fetched from storage.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
