//! Pipeline settings model.
//!
//! This module defines the flat settings record consumed by the pipeline
//! definition code: project and network identity, feature-store identifiers,
//! BigQuery table URIs, image references and decision thresholds.
//!
//! Values of this type are only produced by `vk_core::config`, which validates
//! an untyped mapping against the schema. The type itself deliberately does not
//! implement `Deserialize` so that every instance has gone through validation.

use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

/// Declared defaults for the optional-with-default settings.
pub mod defaults {
    pub const CUSTOMER_ENTITY_ID: &str = "customer";
    pub const CUSTOMER_ENTITY_ID_FIELD: &str = "customer_id";
    pub const TERMINAL_ENTITY_ID: &str = "terminal";
    pub const TERMINALS_ENTITY_ID_FIELD: &str = "terminal_id";
    pub const MODEL_REGISTRY: &str = "ff_model";
    pub const FEATURE_TIME: &str = "feature_ts";
    pub const ONLINE_STORAGE_NODES: i64 = 1;
    pub const TARGET_COLUMN: &str = "tx_fraud";
    pub const MODEL_NAME: &str = "ff_model";
    pub const EXPERIMENT_NAME: &str = "ff-experiment-8wc8m";
    pub const MODEL_SERVING_IMAGE_URI: &str =
        "us-docker.pkg.dev/vertex-ai/prediction/xgboost-cpu.1-7:latest";
    pub const IMAGE_NAME: &str = "dask-xgb-classificator";
    pub const IMAGE_TAG: &str = "latest";
    pub const TRAIN_COMPUTE: &str = "e2-standard-4";
    pub const DEPLOY_COMPUTE: &str = "n1-standard-4";
    pub const BASE_IMAGE: &str = "python:3.11";
    pub const BQ_DATASET: &str = "tx";
    pub const AVG_PR_CONDITION: &str = "avg_pr_condition";
    pub const REPLICA_COUNT: i64 = 1;
}

/// Validated settings for one pipeline invocation.
///
/// Serialized keys use the upper-case names found in the settings files
/// (`PROJECT_ID`, `FEAT_COLUMNS`, ...), so a dumped config can be fed back
/// through validation unchanged.
///
/// # Example
///
/// ```yaml
/// PROJECT_ID: my-project
/// REGION: europe-west4
/// BUCKET_NAME: my-project-artifacts
/// FEAT_COLUMNS: [tx_amount, customer_id_avg_amount_1day_window]
/// DATA_SCHEMA:
///   tx_amount: FLOAT64
/// AVG_PR_THRESHOLD: 0.8
/// MODEL_THRESHOLD: 0.5
/// # ...remaining required keys
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct VertexConfig {
    // Identity and location
    /// Google Cloud project that owns every resource below.
    pub project_id: String,
    pub bucket_name: String,
    /// Bucket used by the training SDK for staging packages.
    pub staging_bucket: String,
    pub region: String,
    /// Short suffix appended to generated resource names.
    pub id: String,
    pub featurestore_id: String,
    pub featureview_id: String,
    /// VPC network peered with the training and serving infrastructure.
    pub network: String,
    pub subnet: String,

    // Feature definitions
    pub customer_entity_id: String,
    pub customer_entity_id_field: String,
    pub terminal_entity_id: String,
    pub terminals_entity_id_field: String,
    pub model_registry: String,
    pub raw_bq_transaction_table_uri: String,
    pub raw_bq_labels_table_uri: String,
    pub features_bq_table_uri: String,
    /// Column holding the feature timestamp.
    pub feature_time: String,
    pub online_storage_nodes: i64,
    pub subscription_name: String,
    pub subscription_path: String,
    /// Columns removed from the raw data before training.
    pub drop_columns: Vec<String>,
    pub target_column: String,
    pub feat_columns: Vec<String>,
    /// Column name to BigQuery type of the raw data.
    pub data_schema: BTreeMap<String, String>,

    // Pipeline artifacts
    pub model_name: String,
    pub experiment_name: String,
    pub data_uri: String,
    pub train_data_uri: String,
    pub read_instances_table: String,
    pub read_instances_uri: String,
    pub dataset_name: String,
    pub job_name: String,
    pub endpoint_name: String,

    // Training and serving
    /// Prebuilt container used to serve the registered model.
    pub model_serving_image_uri: String,
    pub image_repository: String,
    pub image_name: String,
    pub image_tag: String,
    /// Fully qualified training image reference.
    pub image_uri: String,
    pub train_compute: String,
    pub deploy_compute: String,
    pub base_image: String,
    pub pipeline_name: String,
    /// `gs://` prefix under which the pipeline run stores its artifacts.
    pub pipeline_root: String,
    pub bq_dataset: String,
    pub metrics_uri: String,

    // Decision thresholds
    /// Minimum average precision-recall score for the evaluation gate.
    pub avg_pr_threshold: f64,
    /// Score above which a prediction is labelled fraudulent.
    pub model_threshold: f64,
    pub avg_pr_condition: String,
    /// Reserved compute to train on, when one exists.
    pub persistent_resource_id: Option<String>,
    pub replica_count: i64,
    pub service_account: String,
}
