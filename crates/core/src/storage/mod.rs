//! Object storage helpers.
//!
//! This module provides the blob operations used by pipeline code to fetch
//! and persist artifacts:
//! - [`read`]: bind a lazy handle to `(project, bucket, path)`
//! - [`write`]: upload an in-memory buffer, rewinding it first
//! - [`read_from_bucket`]: download an object, optionally parsing it as YAML
//!
//! Every operation takes an explicit [`StorageConfig`] naming the project and
//! the backend to talk to; nothing is resolved from process-wide state.

pub mod backend;
pub mod blob;
pub mod cloud;
pub mod error;
pub mod memory;
pub mod uri;

// Re-export commonly used types for convenience
pub use backend::{StorageBackend, StorageConfig};
pub use blob::{read, read_from_bucket, write, BlobContent, BlobHandle};
pub use cloud::ObjectStoreBackend;
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryBackend;
pub use uri::BlobUri;
