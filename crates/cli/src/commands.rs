//! Subcommand handlers.

use crate::Command;
use color_eyre::eyre::{bail, Result, WrapErr};
use colored::Colorize;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;
use vk_core::config::validate::defaults_mapping;
use vk_core::config::{load_config, load_config_from_bucket, ConfigError, ValidationError};
use vk_core::storage::{read_from_bucket, write, BlobContent, BlobUri, StorageConfig};
use vk_protocol::config_models::VertexConfig;
use vk_protocol::storage_models::StorageSettings;

pub(crate) async fn run(command: Command, settings: &StorageSettings) -> Result<ExitCode> {
    debug!(?settings, "using storage settings");
    let storage = StorageConfig::from_settings(settings);

    match command {
        Command::Validate { file, uri, json } => validate(&storage, file.as_deref(), uri, json).await,
        Command::Cat { uri, raw } => cat(&storage, &uri, raw).await,
        Command::Put { uri, source } => put(&storage, &uri, &source).await,
        Command::Defaults => {
            let rendered = serde_yaml::to_string(&defaults_mapping())?;
            print!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn validate(
    storage: &StorageConfig,
    file: Option<&Path>,
    uri: Option<String>,
    json: bool,
) -> Result<ExitCode> {
    let result = match (file, uri) {
        (Some(path), _) => load_config(path),
        (None, Some(uri)) => {
            let uri = BlobUri::parse(&uri)?;
            load_config_from_bucket(storage, &uri.bucket, &uri.path).await
        }
        // clap's required_unless_present rules this out.
        (None, None) => bail!("either a settings file or --uri is required"),
    };

    match result {
        Ok(config) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print_summary(&config);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(ConfigError::Validation(err)) => {
            print_validation_errors(&err);
            Ok(ExitCode::FAILURE)
        }
        Err(other) => Err(other.into()),
    }
}

fn print_summary(config: &VertexConfig) {
    println!("{} settings are valid", "✓".green().bold());
    println!("  project:  {} ({})", config.project_id, config.region);
    println!("  pipeline: {} -> {}", config.pipeline_name, config.pipeline_root);
    println!("  image:    {}", config.image_uri);
    println!(
        "  features: {} columns, target {}",
        config.feat_columns.len(),
        config.target_column
    );
}

fn print_validation_errors(err: &ValidationError) {
    eprintln!(
        "{} {} invalid field(s)",
        "✗".red().bold(),
        err.errors.len()
    );
    for field_error in &err.errors {
        eprintln!("  {}: {}", field_error.field.bold(), field_error.issue);
    }
}

async fn cat(storage: &StorageConfig, uri: &str, raw: bool) -> Result<ExitCode> {
    let uri = BlobUri::parse(uri)?;
    let content = read_from_bucket(storage, &uri.bucket, &uri.path, !raw)
        .await
        .wrap_err_with(|| format!("Failed to read {uri}"))?;

    match content {
        BlobContent::Raw(bytes) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
        BlobContent::Yaml(value) => print!("{}", serde_yaml::to_string(&value)?),
    }
    Ok(ExitCode::SUCCESS)
}

async fn put(storage: &StorageConfig, uri: &str, source: &Path) -> Result<ExitCode> {
    let uri = BlobUri::parse(uri)?;

    let mut data = Vec::new();
    if source == Path::new("-") {
        std::io::stdin().read_to_end(&mut data)?;
    } else {
        data = std::fs::read(source)
            .wrap_err_with(|| format!("Failed to read {}", source.display()))?;
    }

    let size = data.len();
    write(storage, &uri.bucket, &uri.path, &mut Cursor::new(data))
        .await
        .wrap_err_with(|| format!("Failed to upload {uri}"))?;

    println!("{} uploaded {size} bytes to {uri}", "✓".green().bold());
    Ok(ExitCode::SUCCESS)
}
