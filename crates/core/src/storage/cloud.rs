//! Object store backends built on the `object_store` crate.
//!
//! A client is constructed for every request; nothing is cached or shared
//! between calls.

use crate::storage::backend::StorageBackend;
use crate::storage::error::{StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload, RetryConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Backends reached through `object_store`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectStoreBackend {
    /// Google Cloud Storage.
    ///
    /// Credentials are resolved from the environment
    /// (`GOOGLE_APPLICATION_CREDENTIALS`, metadata server) unless an explicit
    /// service account key file is given.
    Gcs { service_account_path: Option<String> },

    /// Directory tree where bucket `b` lives at `root/b`.
    Local { root: PathBuf },
}

impl ObjectStoreBackend {
    fn connect(&self, bucket: &str) -> StorageResult<Box<dyn ObjectStore>> {
        match self {
            ObjectStoreBackend::Gcs {
                service_account_path,
            } => {
                let store = gcs_builder(bucket, service_account_path.as_deref())
                    .build()
                    .map_err(|source| StorageError::Client {
                        bucket: bucket.to_string(),
                        source,
                    })?;
                Ok(Box::new(store))
            }
            ObjectStoreBackend::Local { .. } => {
                let dir = self.bucket_dir(bucket)?;
                std::fs::create_dir_all(&dir).map_err(|e| StorageError::Client {
                    bucket: bucket.to_string(),
                    source: object_store::Error::Generic {
                        store: "LocalFileSystem",
                        source: Box::new(e),
                    },
                })?;
                let store =
                    LocalFileSystem::new_with_prefix(&dir).map_err(|source| StorageError::Client {
                        bucket: bucket.to_string(),
                        source,
                    })?;
                Ok(Box::new(store))
            }
        }
    }

    /// Directory backing `bucket` for the local backend.
    fn bucket_dir(&self, bucket: &str) -> StorageResult<PathBuf> {
        let ObjectStoreBackend::Local { root } = self else {
            return Err(StorageError::InvalidBucket {
                bucket: bucket.to_string(),
            });
        };
        if bucket.is_empty() || bucket == "." || bucket == ".." || bucket.contains(['/', '\\']) {
            return Err(StorageError::InvalidBucket {
                bucket: bucket.to_string(),
            });
        }
        Ok(root.join(bucket))
    }

    /// Returns `false` when the local bucket directory is absent, so reads can
    /// report `NotFound` without creating it.
    fn bucket_present(&self, bucket: &str) -> StorageResult<bool> {
        match self {
            ObjectStoreBackend::Gcs { .. } => Ok(true),
            ObjectStoreBackend::Local { .. } => Ok(self.bucket_dir(bucket)?.is_dir()),
        }
    }
}

/// Requests are sent once; failures go straight back to the caller.
fn no_retry() -> RetryConfig {
    RetryConfig {
        max_retries: 0,
        retry_timeout: Duration::ZERO,
        ..Default::default()
    }
}

fn gcs_builder(bucket: &str, service_account_path: Option<&str>) -> GoogleCloudStorageBuilder {
    let builder = GoogleCloudStorageBuilder::from_env()
        .with_bucket_name(bucket)
        .with_retry(no_retry());
    match service_account_path {
        Some(path) => builder.with_service_account_path(path),
        None => builder,
    }
}

/// Object paths are used verbatim. A name the store would normalize
/// (leading, trailing or doubled `/`) is rejected instead of being mapped
/// onto a different object.
fn location(path: &str) -> StorageResult<ObjectPath> {
    let parsed = ObjectPath::parse(path).map_err(|source| StorageError::InvalidPath {
        path: path.to_string(),
        reason: source.to_string(),
    })?;
    if parsed.as_ref() != path {
        return Err(StorageError::InvalidPath {
            path: path.to_string(),
            reason: format!("would be stored as {:?}", parsed.as_ref()),
        });
    }
    Ok(parsed)
}

/// Uploads never report `NotFound`: a missing bucket is a rejected request.
fn upload_error(bucket: &str, path: &str, err: object_store::Error) -> StorageError {
    StorageError::Request {
        bucket: bucket.to_string(),
        path: path.to_string(),
        source: Box::new(err),
    }
}

fn request_error(bucket: &str, path: &str, err: object_store::Error) -> StorageError {
    match err {
        object_store::Error::NotFound { .. } => StorageError::NotFound {
            bucket: bucket.to_string(),
            path: path.to_string(),
        },
        other => StorageError::Request {
            bucket: bucket.to_string(),
            path: path.to_string(),
            source: Box::new(other),
        },
    }
}

#[async_trait]
impl StorageBackend for ObjectStoreBackend {
    fn name(&self) -> &'static str {
        match self {
            ObjectStoreBackend::Gcs { .. } => "gcs",
            ObjectStoreBackend::Local { .. } => "local",
        }
    }

    async fn get(&self, bucket: &str, path: &str) -> StorageResult<Bytes> {
        let location = location(path)?;
        if !self.bucket_present(bucket)? {
            return Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                path: path.to_string(),
            });
        }

        let store = self.connect(bucket)?;
        let result = store
            .get(&location)
            .await
            .map_err(|e| request_error(bucket, path, e))?;
        result
            .bytes()
            .await
            .map_err(|e| request_error(bucket, path, e))
    }

    async fn put(&self, bucket: &str, path: &str, data: Bytes) -> StorageResult<()> {
        let location = location(path)?;
        let store = self.connect(bucket)?;
        store
            .put(&location, PutPayload::from(data))
            .await
            .map_err(|e| upload_error(bucket, path, e))?;
        Ok(())
    }

    async fn exists(&self, bucket: &str, path: &str) -> StorageResult<bool> {
        let location = location(path)?;
        if !self.bucket_present(bucket)? {
            return Ok(false);
        }

        let store = self.connect(bucket)?;
        match store.head(&location).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(request_error(bucket, path, e)),
        }
    }
}
