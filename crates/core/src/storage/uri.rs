//! `gs://bucket/path` URI parsing.

use crate::storage::error::{StorageError, StorageResult};
use std::fmt;
use std::str::FromStr;

const SCHEME: &str = "gs://";

/// A `(bucket, path)` pair written as `gs://bucket/path`.
///
/// Settings such as `DATA_URI` and `METRICS_URI` use this form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobUri {
    pub bucket: String,
    pub path: String,
}

impl BlobUri {
    pub fn new(bucket: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            path: path.into(),
        }
    }

    /// Parse a `gs://` URI. Both the bucket and the object path must be
    /// non-empty.
    pub fn parse(uri: &str) -> StorageResult<Self> {
        let invalid = |reason: &str| StorageError::InvalidUri {
            uri: uri.to_string(),
            reason: reason.to_string(),
        };

        let rest = uri
            .strip_prefix(SCHEME)
            .ok_or_else(|| invalid("expected a gs:// URI"))?;
        let (bucket, path) = rest
            .split_once('/')
            .ok_or_else(|| invalid("missing object path"))?;

        if bucket.is_empty() {
            return Err(invalid("missing bucket name"));
        }
        if path.is_empty() {
            return Err(invalid("missing object path"));
        }

        Ok(Self::new(bucket, path))
    }
}

impl FromStr for BlobUri {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BlobUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}/{}", self.bucket, self.path)
    }
}
