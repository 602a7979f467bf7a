//! Settings loader for files and bucket objects.
//!
//! Settings documents can be written in any of:
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//! - TOML (`.toml`)
//!
//! Whatever the source format, the document is first parsed into an untyped
//! value and then run through [`validate::from_value`](crate::config::validate::from_value),
//! so every format gets the same batch validation.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::validate;
use crate::storage::{read_from_bucket, StorageConfig};
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;
use vk_protocol::config_models::VertexConfig;

/// Source formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Some(ConfigFormat::Yaml),
            Some("json") => Some(ConfigFormat::Json),
            Some("toml") => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Loads and validates settings from a file.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The extension is not a supported format
/// - The file cannot be read
/// - The file has invalid syntax
/// - Any field fails schema validation (all failures are reported)
///
/// # Example
///
/// ```rust,no_run
/// use vk_core::config::load_config;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config/pipeline.yaml"))?;
/// println!("Training in {} with {}", config.region, config.train_compute);
/// # Ok(())
/// # }
/// ```
pub fn load_config(path: &Path) -> ConfigResult<VertexConfig> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), ?format, "loading config file");
    let document = parse_document(&content, format, path)?;
    validate::from_value(&document)
}

/// Validates settings held in memory.
pub fn load_config_str(content: &str, format: ConfigFormat) -> ConfigResult<VertexConfig> {
    let document = parse_document(content, format, Path::new("<inline>"))?;
    validate::from_value(&document)
}

/// Loads and validates a YAML settings object stored at `(bucket, path)`.
///
/// Fetch failures are returned as `ConfigError::Storage`, including
/// `StorageError::NotFound` when the object is absent.
pub async fn load_config_from_bucket(
    storage: &StorageConfig,
    bucket: &str,
    path: &str,
) -> ConfigResult<VertexConfig> {
    // Deserializing reads always come back as YAML.
    let document = read_from_bucket(storage, bucket, path, true)
        .await?
        .into_yaml()
        .unwrap_or_default();
    validate::from_value(&document)
}

fn parse_document(content: &str, format: ConfigFormat, path: &Path) -> ConfigResult<Value> {
    match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|source| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source,
        }),
        ConfigFormat::Json => serde_json::from_str(content).map_err(|source| ConfigError::JsonParse {
            path: path.to_path_buf(),
            source,
        }),
        ConfigFormat::Toml => toml::from_str(content).map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        }),
    }
}
