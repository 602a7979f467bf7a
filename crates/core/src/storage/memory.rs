//! In-memory storage backend.

use crate::storage::backend::StorageBackend;
use crate::storage::error::{StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

/// HashMap-based object store for tests and dry runs.
///
/// Buckets are implicit: writing to any bucket name creates it. A rejecting
/// store fails every write with `StorageError::Request`, which lets callers
/// exercise upload failures without a real service.
pub struct InMemoryBackend {
    objects: RwLock<HashMap<(String, String), Bytes>>,
    reject_writes: Option<String>,
}

impl InMemoryBackend {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            reject_writes: None,
        }
    }

    /// Create a store that fails every write with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            reject_writes: Some(reason.into()),
        }
    }

    /// Number of objects across all buckets.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Sorted object paths stored in `bucket`.
    pub async fn list(&self, bucket: &str) -> Vec<String> {
        let objects = self.objects.read().await;
        let mut paths: Vec<String> = objects
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, p)| p.clone())
            .collect();
        paths.sort();
        paths
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, bucket: &str, path: &str) -> StorageResult<Bytes> {
        let objects = self.objects.read().await;
        objects
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                bucket: bucket.to_string(),
                path: path.to_string(),
            })
    }

    async fn put(&self, bucket: &str, path: &str, data: Bytes) -> StorageResult<()> {
        if let Some(reason) = &self.reject_writes {
            return Err(StorageError::Request {
                bucket: bucket.to_string(),
                path: path.to_string(),
                source: reason.clone().into(),
            });
        }

        let mut objects = self.objects.write().await;
        objects.insert((bucket.to_string(), path.to_string()), data);
        Ok(())
    }

    async fn exists(&self, bucket: &str, path: &str) -> StorageResult<bool> {
        let objects = self.objects.read().await;
        Ok(objects.contains_key(&(bucket.to_string(), path.to_string())))
    }
}

impl fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("reject_writes", &self.reject_writes)
            .finish_non_exhaustive()
    }
}
