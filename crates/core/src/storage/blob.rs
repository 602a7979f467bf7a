//! Blob read and write operations.
//!
//! These are thin request/response wrappers over a [`StorageBackend`]: no
//! retries, no caching, no chunking. Failures come back to the caller as
//! reported by the backend.

use crate::storage::backend::{StorageBackend, StorageConfig};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::uri::BlobUri;
use bytes::Bytes;
use serde_yaml::Value;
use std::fmt;
use std::io::{Read, Seek};
use std::sync::Arc;
use tracing::debug;

/// Lazy reference to an object at `(project, bucket, path)`.
///
/// Creating a handle performs no I/O, so a handle may point at an object that
/// does not exist yet.
#[derive(Clone)]
pub struct BlobHandle {
    project_id: Option<String>,
    bucket: String,
    path: String,
    backend: Arc<dyn StorageBackend>,
}

impl BlobHandle {
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn uri(&self) -> BlobUri {
        BlobUri::new(&self.bucket, &self.path)
    }

    /// Check whether the object currently exists.
    pub async fn exists(&self) -> StorageResult<bool> {
        debug!(
            backend = self.backend.name(),
            project = ?self.project_id,
            bucket = %self.bucket,
            path = %self.path,
            "checking blob existence"
        );
        self.backend.exists(&self.bucket, &self.path).await
    }

    /// Download the full object content.
    pub async fn download_as_bytes(&self) -> StorageResult<Bytes> {
        debug!(
            backend = self.backend.name(),
            project = ?self.project_id,
            bucket = %self.bucket,
            path = %self.path,
            "downloading blob"
        );
        self.backend.get(&self.bucket, &self.path).await
    }

    /// Upload everything readable from `content`, replacing the object.
    ///
    /// With `rewind` set the cursor is moved to the start first, so bytes
    /// consumed before the call are uploaded too.
    pub async fn upload_from_stream<R>(&self, content: &mut R, rewind: bool) -> StorageResult<()>
    where
        R: Read + Seek + ?Sized,
    {
        let data = self.drain(content, rewind)?;
        debug!(
            backend = self.backend.name(),
            project = ?self.project_id,
            bucket = %self.bucket,
            path = %self.path,
            size = data.len(),
            "uploading blob"
        );
        self.backend.put(&self.bucket, &self.path, data).await
    }

    fn drain<R>(&self, content: &mut R, rewind: bool) -> StorageResult<Bytes>
    where
        R: Read + Seek + ?Sized,
    {
        let content_error = |source| StorageError::Content {
            bucket: self.bucket.clone(),
            path: self.path.clone(),
            source,
        };

        if rewind {
            content.rewind().map_err(content_error)?;
        }
        let mut buf = Vec::new();
        content.read_to_end(&mut buf).map_err(content_error)?;
        Ok(Bytes::from(buf))
    }
}

impl fmt::Debug for BlobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobHandle")
            .field("project_id", &self.project_id)
            .field("bucket", &self.bucket)
            .field("path", &self.path)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Content returned by [`read_from_bucket`].
#[derive(Debug, Clone, PartialEq)]
pub enum BlobContent {
    /// Bytes exactly as stored.
    Raw(Bytes),
    /// Parsed YAML document.
    Yaml(Value),
}

impl BlobContent {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BlobContent::Raw(bytes) => Some(&bytes[..]),
            BlobContent::Yaml(_) => None,
        }
    }

    pub fn as_yaml(&self) -> Option<&Value> {
        match self {
            BlobContent::Yaml(value) => Some(value),
            BlobContent::Raw(_) => None,
        }
    }

    pub fn into_yaml(self) -> Option<Value> {
        match self {
            BlobContent::Yaml(value) => Some(value),
            BlobContent::Raw(_) => None,
        }
    }
}

/// Bind a handle to `(bucket, path)` under the configured project.
///
/// No request is made; use the handle to download, upload or check existence.
pub fn read(config: &StorageConfig, bucket: &str, path: &str) -> BlobHandle {
    BlobHandle {
        project_id: config.project_id().map(str::to_string),
        bucket: bucket.to_string(),
        path: path.to_string(),
        backend: Arc::clone(config.backend()),
    }
}

/// Upload `content` to `(bucket, path)`, replacing any existing object.
///
/// The buffer is rewound before reading, so a partially consumed buffer is
/// still uploaded in full.
///
/// # Errors
///
/// Returns `StorageError::Request` when the store rejects the upload and
/// `StorageError::Content` when the buffer cannot be rewound or read.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// use vk_core::storage::{read_from_bucket, write, StorageConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = StorageConfig::in_memory().with_project("fraud-project");
/// let mut buffer = Cursor::new(b"threshold: 0.5\n".to_vec());
/// write(&storage, "artifacts", "eval/metrics.yaml", &mut buffer).await?;
///
/// let content = read_from_bucket(&storage, "artifacts", "eval/metrics.yaml", true).await?;
/// assert!(content.as_yaml().is_some());
/// # Ok(())
/// # }
/// ```
pub async fn write<R>(
    config: &StorageConfig,
    bucket: &str,
    path: &str,
    content: &mut R,
) -> StorageResult<()>
where
    R: Read + Seek + ?Sized,
{
    read(config, bucket, path)
        .upload_from_stream(content, true)
        .await
}

/// Download `(bucket, path)` and optionally parse it as YAML.
///
/// Parsing uses `serde_yaml`, which never runs constructors for custom tags;
/// tagged nodes come back as `Value::Tagged`. Empty content parses to
/// `Value::Null`.
///
/// # Errors
///
/// - `StorageError::NotFound` if the object does not exist
/// - `StorageError::Parse` if `deserialize` is set and the content is not YAML
/// - `StorageError::Request` for any other store failure
pub async fn read_from_bucket(
    config: &StorageConfig,
    bucket: &str,
    path: &str,
    deserialize: bool,
) -> StorageResult<BlobContent> {
    let bytes = read(config, bucket, path).download_as_bytes().await?;
    if !deserialize {
        return Ok(BlobContent::Raw(bytes));
    }

    parse_yaml(bucket, path, &bytes).map(BlobContent::Yaml)
}

fn parse_yaml(bucket: &str, path: &str, bytes: &[u8]) -> StorageResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_yaml::from_slice(bytes).map_err(|source| StorageError::Parse {
        bucket: bucket.to_string(),
        path: path.to_string(),
        source,
    })
}
