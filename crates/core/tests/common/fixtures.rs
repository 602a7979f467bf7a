//! Test fixtures for building settings mappings.

use serde_yaml::{Mapping, Value};

/// Every required field with a valid value and no defaulted field.
pub const REQUIRED_FIELDS_YAML: &str = r#"
PROJECT_ID: fraud-project
BUCKET_NAME: fraud-project-bucket
STAGING_BUCKET: gs://fraud-project-staging
REGION: europe-west4
ID: abc12
FEATURESTORE_ID: fraud_fs
FEATUREVIEW_ID: fraud_fv
NETWORK: projects/123/global/networks/default
SUBNET: default
RAW_BQ_TRANSACTION_TABLE_URI: bq://fraud-project.tx.tx
RAW_BQ_LABELS_TABLE_URI: bq://fraud-project.tx.txlabels
FEATURES_BQ_TABLE_URI: bq://fraud-project.tx.features
SUBSCRIPTION_NAME: ff-tx-sub
SUBSCRIPTION_PATH: projects/fraud-project/subscriptions/ff-tx-sub
DROP_COLUMNS:
  - timestamp
  - entity_type_customer
  - entity_type_terminal
FEAT_COLUMNS:
  - tx_amount
  - customer_id_nb_tx_1day_window
  - terminal_id_risk_1day_window
DATA_SCHEMA:
  tx_amount: FLOAT64
  tx_fraud: INT64
  customer_id: STRING
DATA_URI: gs://fraud-project-bucket/data
TRAIN_DATA_URI: gs://fraud-project-bucket/data/train
READ_INSTANCES_TABLE: bq://fraud-project.tx.ground_truth
READ_INSTANCES_URI: gs://fraud-project-bucket/read_instances.csv
DATASET_NAME: ff_dataset
JOB_NAME: ff-train
ENDPOINT_NAME: ff-endpoint
IMAGE_REPOSITORY: europe-west4-docker.pkg.dev/fraud-project/ff
IMAGE_URI: europe-west4-docker.pkg.dev/fraud-project/ff/dask-xgb-classificator:latest
PIPELINE_NAME: ff-pipeline
PIPELINE_ROOT: gs://fraud-project-bucket/pipelines
METRICS_URI: gs://fraud-project-bucket/metrics.json
AVG_PR_THRESHOLD: 0.8
MODEL_THRESHOLD: 0.5
SERVICE_ACCOUNT: pipeline@fraud-project.iam.gserviceaccount.com
"#;

/// Names of every field without a declared default, in schema order.
pub const REQUIRED_FIELDS: &[&str] = &[
    "PROJECT_ID",
    "BUCKET_NAME",
    "STAGING_BUCKET",
    "REGION",
    "ID",
    "FEATURESTORE_ID",
    "FEATUREVIEW_ID",
    "NETWORK",
    "SUBNET",
    "RAW_BQ_TRANSACTION_TABLE_URI",
    "RAW_BQ_LABELS_TABLE_URI",
    "FEATURES_BQ_TABLE_URI",
    "SUBSCRIPTION_NAME",
    "SUBSCRIPTION_PATH",
    "DROP_COLUMNS",
    "FEAT_COLUMNS",
    "DATA_SCHEMA",
    "DATA_URI",
    "TRAIN_DATA_URI",
    "READ_INSTANCES_TABLE",
    "READ_INSTANCES_URI",
    "DATASET_NAME",
    "JOB_NAME",
    "ENDPOINT_NAME",
    "IMAGE_REPOSITORY",
    "IMAGE_URI",
    "PIPELINE_NAME",
    "PIPELINE_ROOT",
    "METRICS_URI",
    "AVG_PR_THRESHOLD",
    "MODEL_THRESHOLD",
    "SERVICE_ACCOUNT",
];

/// Parse [`REQUIRED_FIELDS_YAML`] into a mapping.
pub fn required_mapping() -> Mapping {
    serde_yaml::from_str(REQUIRED_FIELDS_YAML).expect("Fixture YAML should parse")
}

/// Return `mapping` with `key` set to the YAML value parsed from `value`.
pub fn with_field(mut mapping: Mapping, key: &str, value: &str) -> Mapping {
    let value: Value = serde_yaml::from_str(value).expect("Override YAML should parse");
    mapping.insert(Value::from(key), value);
    mapping
}

/// Return `mapping` without `key`.
pub fn without_field(mut mapping: Mapping, key: &str) -> Mapping {
    mapping.remove(key);
    mapping
}
