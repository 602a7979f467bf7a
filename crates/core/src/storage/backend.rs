//! Storage backend trait and the explicit configuration passed to every
//! blob operation.

use crate::storage::cloud::ObjectStoreBackend;
use crate::storage::error::StorageResult;
use crate::storage::memory::InMemoryBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;
use vk_protocol::storage_models::{BackendSettings, StorageSettings};

/// An object store addressed by `(bucket, path)`.
///
/// Implementations perform exactly one request per call. They must report a
/// missing object as `StorageError::NotFound` and pass every other failure
/// through as `StorageError::Request`.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Short backend name used in log events.
    fn name(&self) -> &'static str;

    /// Download the full content of an object.
    async fn get(&self, bucket: &str, path: &str) -> StorageResult<Bytes>;

    /// Create or replace an object.
    async fn put(&self, bucket: &str, path: &str, data: Bytes) -> StorageResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, bucket: &str, path: &str) -> StorageResult<bool>;
}

/// Explicit storage context for blob operations.
///
/// Carries the project used as billing context and the backend requests are
/// sent to. Cloning is cheap; clones share the backend.
///
/// # Example
///
/// ```rust
/// use vk_core::storage::StorageConfig;
///
/// let storage = StorageConfig::in_memory().with_project("fraud-project");
/// assert_eq!(storage.project_id(), Some("fraud-project"));
/// ```
#[derive(Clone)]
pub struct StorageConfig {
    project_id: Option<String>,
    backend: Arc<dyn StorageBackend>,
}

impl StorageConfig {
    /// Create a config that sends requests to `backend` without a project.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            project_id: None,
            backend,
        }
    }

    /// Create a config backed by a fresh [`InMemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBackend::new()))
    }

    /// Build a config from serializable settings.
    ///
    /// No client is created here; cloud backends build one per request.
    pub fn from_settings(settings: &StorageSettings) -> Self {
        let backend: Arc<dyn StorageBackend> = match &settings.backend {
            BackendSettings::Gcs {
                service_account_path,
            } => Arc::new(ObjectStoreBackend::Gcs {
                service_account_path: service_account_path.clone(),
            }),
            BackendSettings::Local { root } => Arc::new(ObjectStoreBackend::Local {
                root: root.into(),
            }),
            BackendSettings::Memory => Arc::new(InMemoryBackend::new()),
        };

        Self {
            project_id: settings.project_id.clone(),
            backend,
        }
    }

    /// Set the project used as billing context.
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("project_id", &self.project_id)
            .field("backend", &self.backend.name())
            .finish()
    }
}
