//! Object storage settings.
//!
//! Describes which object store the blob helpers talk to and under which
//! project. The settings are plain data; `vk_core::storage` turns them into a
//! live backend.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Selects the object store backend.
///
/// # Example
///
/// ```yaml
/// kind: gcs
/// service-account-path: /secrets/pipeline-sa.json
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BackendSettings {
    /// Google Cloud Storage.
    ///
    /// Credentials come from the environment unless a service account key
    /// file is given.
    #[serde(rename_all = "kebab-case")]
    Gcs {
        #[serde(default)]
        service_account_path: Option<String>,
    },

    /// Local directory tree where each bucket is a sub-directory of `root`.
    Local { root: String },

    /// Process-local store; contents vanish when the process exits.
    Memory,
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings::Gcs {
            service_account_path: None,
        }
    }
}

/// Storage settings passed explicitly to every blob operation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct StorageSettings {
    /// Project used as the billing context for requests.
    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default)]
    pub backend: BackendSettings,
}
