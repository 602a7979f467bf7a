//! Schema validation for pipeline settings.
//!
//! Turns an untyped mapping (usually parsed YAML) into a [`VertexConfig`].
//! Validation does not stop at the first problem: every missing or mistyped
//! field is collected and reported together in a [`ValidationError`].
//!
//! Type rules:
//! - strings must be YAML strings; numbers and booleans are not stringified
//! - integers must be integral numbers; floats, booleans and numeric strings
//!   are rejected
//! - floats accept any number, so `1` is read as `1.0`
//! - sequences and mappings must hold strings only
//! - `null` is only accepted by `PERSISTENT_RESOURCE_ID`
//!
//! Keys outside the schema are ignored.

use crate::config::error::{ConfigError, ConfigResult, FieldError, FieldIssue, ValidationError};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use tracing::debug;
use vk_protocol::config_models::{defaults, VertexConfig};

/// Validate a mapping and build the settings record.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming every field that is missing or has
/// the wrong type.
///
/// # Example
///
/// ```rust
/// use vk_core::config::validate::from_mapping;
///
/// let mapping = serde_yaml::Mapping::new();
/// let err = from_mapping(&mapping).unwrap_err();
/// assert!(err.fields().any(|f| f == "PROJECT_ID"));
/// ```
pub fn from_mapping(mapping: &Mapping) -> Result<VertexConfig, ValidationError> {
    let mut r = FieldReader::new(mapping);

    let config = VertexConfig {
        project_id: r.required("PROJECT_ID", STRING, as_string),
        bucket_name: r.required("BUCKET_NAME", STRING, as_string),
        staging_bucket: r.required("STAGING_BUCKET", STRING, as_string),
        region: r.required("REGION", STRING, as_string),
        id: r.required("ID", STRING, as_string),
        featurestore_id: r.required("FEATURESTORE_ID", STRING, as_string),
        featureview_id: r.required("FEATUREVIEW_ID", STRING, as_string),
        network: r.required("NETWORK", STRING, as_string),
        subnet: r.required("SUBNET", STRING, as_string),
        customer_entity_id: r.text_or("CUSTOMER_ENTITY_ID", defaults::CUSTOMER_ENTITY_ID),
        customer_entity_id_field: r
            .text_or("CUSTOMER_ENTITY_ID_FIELD", defaults::CUSTOMER_ENTITY_ID_FIELD),
        terminal_entity_id: r.text_or("TERMINAL_ENTITY_ID", defaults::TERMINAL_ENTITY_ID),
        terminals_entity_id_field: r
            .text_or("TERMINALS_ENTITY_ID_FIELD", defaults::TERMINALS_ENTITY_ID_FIELD),
        model_registry: r.text_or("MODEL_REGISTRY", defaults::MODEL_REGISTRY),
        raw_bq_transaction_table_uri: r.required("RAW_BQ_TRANSACTION_TABLE_URI", STRING, as_string),
        raw_bq_labels_table_uri: r.required("RAW_BQ_LABELS_TABLE_URI", STRING, as_string),
        features_bq_table_uri: r.required("FEATURES_BQ_TABLE_URI", STRING, as_string),
        feature_time: r.text_or("FEATURE_TIME", defaults::FEATURE_TIME),
        online_storage_nodes: r.with_default(
            "ONLINE_STORAGE_NODES",
            INTEGER,
            as_integer,
            defaults::ONLINE_STORAGE_NODES,
        ),
        subscription_name: r.required("SUBSCRIPTION_NAME", STRING, as_string),
        subscription_path: r.required("SUBSCRIPTION_PATH", STRING, as_string),
        drop_columns: r.required("DROP_COLUMNS", STRING_LIST, as_string_list),
        target_column: r.text_or("TARGET_COLUMN", defaults::TARGET_COLUMN),
        feat_columns: r.required("FEAT_COLUMNS", STRING_LIST, as_string_list),
        data_schema: r.required("DATA_SCHEMA", STRING_MAP, as_string_map),
        model_name: r.text_or("MODEL_NAME", defaults::MODEL_NAME),
        experiment_name: r.text_or("EXPERIMENT_NAME", defaults::EXPERIMENT_NAME),
        data_uri: r.required("DATA_URI", STRING, as_string),
        train_data_uri: r.required("TRAIN_DATA_URI", STRING, as_string),
        read_instances_table: r.required("READ_INSTANCES_TABLE", STRING, as_string),
        read_instances_uri: r.required("READ_INSTANCES_URI", STRING, as_string),
        dataset_name: r.required("DATASET_NAME", STRING, as_string),
        job_name: r.required("JOB_NAME", STRING, as_string),
        endpoint_name: r.required("ENDPOINT_NAME", STRING, as_string),
        model_serving_image_uri: r
            .text_or("MODEL_SERVING_IMAGE_URI", defaults::MODEL_SERVING_IMAGE_URI),
        image_repository: r.required("IMAGE_REPOSITORY", STRING, as_string),
        image_name: r.text_or("IMAGE_NAME", defaults::IMAGE_NAME),
        image_tag: r.text_or("IMAGE_TAG", defaults::IMAGE_TAG),
        image_uri: r.required("IMAGE_URI", STRING, as_string),
        train_compute: r.text_or("TRAIN_COMPUTE", defaults::TRAIN_COMPUTE),
        deploy_compute: r.text_or("DEPLOY_COMPUTE", defaults::DEPLOY_COMPUTE),
        base_image: r.text_or("BASE_IMAGE", defaults::BASE_IMAGE),
        pipeline_name: r.required("PIPELINE_NAME", STRING, as_string),
        pipeline_root: r.required("PIPELINE_ROOT", STRING, as_string),
        bq_dataset: r.text_or("BQ_DATASET", defaults::BQ_DATASET),
        metrics_uri: r.required("METRICS_URI", STRING, as_string),
        avg_pr_threshold: r.required("AVG_PR_THRESHOLD", FLOAT, as_float),
        model_threshold: r.required("MODEL_THRESHOLD", FLOAT, as_float),
        avg_pr_condition: r.text_or("AVG_PR_CONDITION", defaults::AVG_PR_CONDITION),
        persistent_resource_id: r.with_default(
            "PERSISTENT_RESOURCE_ID",
            OPTIONAL_STRING,
            as_optional_string,
            None,
        ),
        replica_count: r.with_default(
            "REPLICA_COUNT",
            INTEGER,
            as_integer,
            defaults::REPLICA_COUNT,
        ),
        service_account: r.required("SERVICE_ACCOUNT", STRING, as_string),
    };

    r.finish()?;
    Ok(config)
}

/// Validate an arbitrary document whose root must be a mapping.
pub fn from_value(value: &Value) -> ConfigResult<VertexConfig> {
    match value {
        Value::Mapping(mapping) => Ok(from_mapping(mapping)?),
        other => Err(ConfigError::NotAMapping {
            found: describe(other).to_string(),
        }),
    }
}

/// Every field with a declared default, mapped to that default.
pub fn defaults_mapping() -> Mapping {
    let mut m = Mapping::new();
    let mut text = |key: &str, value: &str| {
        m.insert(Value::from(key), Value::from(value));
    };
    text("CUSTOMER_ENTITY_ID", defaults::CUSTOMER_ENTITY_ID);
    text("CUSTOMER_ENTITY_ID_FIELD", defaults::CUSTOMER_ENTITY_ID_FIELD);
    text("TERMINAL_ENTITY_ID", defaults::TERMINAL_ENTITY_ID);
    text("TERMINALS_ENTITY_ID_FIELD", defaults::TERMINALS_ENTITY_ID_FIELD);
    text("MODEL_REGISTRY", defaults::MODEL_REGISTRY);
    text("FEATURE_TIME", defaults::FEATURE_TIME);
    text("TARGET_COLUMN", defaults::TARGET_COLUMN);
    text("MODEL_NAME", defaults::MODEL_NAME);
    text("EXPERIMENT_NAME", defaults::EXPERIMENT_NAME);
    text("MODEL_SERVING_IMAGE_URI", defaults::MODEL_SERVING_IMAGE_URI);
    text("IMAGE_NAME", defaults::IMAGE_NAME);
    text("IMAGE_TAG", defaults::IMAGE_TAG);
    text("TRAIN_COMPUTE", defaults::TRAIN_COMPUTE);
    text("DEPLOY_COMPUTE", defaults::DEPLOY_COMPUTE);
    text("BASE_IMAGE", defaults::BASE_IMAGE);
    text("BQ_DATASET", defaults::BQ_DATASET);
    text("AVG_PR_CONDITION", defaults::AVG_PR_CONDITION);

    m.insert(
        Value::from("ONLINE_STORAGE_NODES"),
        Value::from(defaults::ONLINE_STORAGE_NODES),
    );
    m.insert(Value::from("PERSISTENT_RESOURCE_ID"), Value::Null);
    m.insert(
        Value::from("REPLICA_COUNT"),
        Value::from(defaults::REPLICA_COUNT),
    );
    m
}

const STRING: &str = "string";
const INTEGER: &str = "integer";
const FLOAT: &str = "number";
const OPTIONAL_STRING: &str = "string or null";
const STRING_LIST: &str = "sequence of strings";
const STRING_MAP: &str = "mapping of strings to strings";

/// Collects field errors while the record is being assembled.
struct FieldReader<'a> {
    mapping: &'a Mapping,
    seen: Vec<&'static str>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    fn new(mapping: &'a Mapping) -> Self {
        Self {
            mapping,
            seen: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn lookup(&mut self, field: &'static str) -> Option<&'a Value> {
        self.seen.push(field);
        self.mapping.get(field)
    }

    fn required<T: Default>(
        &mut self,
        field: &'static str,
        expected: &'static str,
        convert: fn(&Value) -> Result<T, String>,
    ) -> T {
        match self.lookup(field) {
            Some(value) => self.convert(field, expected, value, convert),
            None => {
                self.errors.push(FieldError {
                    field,
                    issue: FieldIssue::Missing,
                });
                T::default()
            }
        }
    }

    fn with_default<T: Default>(
        &mut self,
        field: &'static str,
        expected: &'static str,
        convert: fn(&Value) -> Result<T, String>,
        default: T,
    ) -> T {
        match self.lookup(field) {
            Some(value) => self.convert(field, expected, value, convert),
            None => default,
        }
    }

    fn text_or(&mut self, field: &'static str, default: &str) -> String {
        self.with_default(field, STRING, as_string, default.to_string())
    }

    fn convert<T: Default>(
        &mut self,
        field: &'static str,
        expected: &'static str,
        value: &Value,
        convert: fn(&Value) -> Result<T, String>,
    ) -> T {
        convert(value).unwrap_or_else(|found| {
            self.errors.push(FieldError {
                field,
                issue: FieldIssue::WrongType { expected, found },
            });
            T::default()
        })
    }

    fn finish(self) -> Result<(), ValidationError> {
        for key in self.mapping.keys() {
            let known = key
                .as_str()
                .is_some_and(|k| self.seen.iter().any(|seen| *seen == k));
            if !known {
                debug!(key = ?key, "ignoring unknown configuration key");
            }
        }

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn as_string(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(describe(other).to_string()),
    }
}

fn as_integer(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) if n.is_f64() => Err("float".to_string()),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| "integer out of range".to_string()),
        other => Err(describe(other).to_string()),
    }
}

fn as_float(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| "number out of range".to_string()),
        other => Err(describe(other).to_string()),
    }
}

fn as_optional_string(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        other => as_string(other).map(Some),
    }
}

fn as_string_list(value: &Value) -> Result<Vec<String>, String> {
    let Value::Sequence(items) = value else {
        return Err(describe(value).to_string());
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(format!("{} at index {i}", describe(other))),
        })
        .collect()
}

fn as_string_map(value: &Value) -> Result<BTreeMap<String, String>, String> {
    let Value::Mapping(entries) = value else {
        return Err(describe(value).to_string());
    };

    entries
        .iter()
        .map(|(k, v)| match (k, v) {
            (Value::String(k), Value::String(v)) => Ok((k.clone(), v.clone())),
            (Value::String(k), other) => Err(format!("{} for key {k:?}", describe(other))),
            (other, _) => Err(format!("{} key", describe(other))),
        })
        .collect()
}
