//! Pipeline settings validation and loading.
//!
//! This module turns untyped settings into a validated
//! [`VertexConfig`](vk_protocol::VertexConfig):
//! - [`validate`]: batch schema validation of a key/value mapping
//! - [`loader`]: reading settings from files or from a bucket

pub mod error;
pub mod loader;
pub mod validate;

pub use error::{ConfigError, ConfigResult, FieldError, FieldIssue, ValidationError};
pub use loader::{load_config, load_config_from_bucket, load_config_str, ConfigFormat};
pub use validate::{from_mapping, from_value};
