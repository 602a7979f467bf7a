//! Error types for object storage operations.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while reading or writing blobs.
///
/// Failures reported by the underlying store are carried as the error source
/// without translation or retry.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested object does not exist.
    #[error("Object gs://{bucket}/{path} not found")]
    NotFound { bucket: String, path: String },

    /// The object exists but its content is not valid YAML.
    #[error("Failed to parse YAML from gs://{bucket}/{path}: {source}")]
    Parse {
        bucket: String,
        path: String,
        source: serde_yaml::Error,
    },

    /// The store rejected or failed the request (permissions, quota, network).
    #[error("Storage request for gs://{bucket}/{path} failed: {source}")]
    Request {
        bucket: String,
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The upload buffer could not be rewound or read.
    #[error("Failed to read upload content for gs://{bucket}/{path}: {source}")]
    Content {
        bucket: String,
        path: String,
        source: std::io::Error,
    },

    /// The object path is not a valid store location.
    #[error("Invalid object path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The bucket name cannot be mapped onto the backend.
    #[error("Invalid bucket name {bucket:?}")]
    InvalidBucket { bucket: String },

    /// A client for the bucket could not be constructed.
    #[error("Failed to create storage client for bucket {bucket}: {source}")]
    Client {
        bucket: String,
        source: object_store::Error,
    },

    /// A `gs://` URI could not be parsed.
    #[error("Invalid blob URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },
}

impl StorageError {
    /// Returns `true` if this error means the object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
