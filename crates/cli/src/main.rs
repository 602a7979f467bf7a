mod commands;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vk_protocol::storage_models::{BackendSettings, StorageSettings};

/// Validate pipeline settings and move artifacts in and out of buckets.
#[derive(Parser, Debug)]
#[command(name = "vertex-kit", version, about)]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct StorageArgs {
    /// Project used as billing context for storage requests.
    #[arg(long, global = true)]
    project: Option<String>,

    /// Object store to talk to.
    #[arg(long, value_enum, default_value_t = BackendArg::Gcs, global = true)]
    backend: BackendArg,

    /// Root directory holding one sub-directory per bucket (local backend).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Service account key file (gcs backend); environment credentials otherwise.
    #[arg(long, global = true)]
    service_account: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BackendArg {
    Gcs,
    Local,
    Memory,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a settings file or a settings object in a bucket.
    Validate {
        /// Settings file (.yaml, .yml, .json or .toml).
        #[arg(required_unless_present = "uri", conflicts_with = "uri")]
        file: Option<PathBuf>,

        /// Settings object as gs://bucket/path.
        #[arg(long)]
        uri: Option<String>,

        /// Print the validated settings as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print an object, re-rendered as YAML unless --raw is given.
    Cat {
        /// Object as gs://bucket/path.
        uri: String,

        #[arg(long)]
        raw: bool,
    },

    /// Upload a file (or stdin with "-") to an object.
    Put {
        /// Destination as gs://bucket/path.
        uri: String,

        source: PathBuf,
    },

    /// Print every defaulted setting with its default value.
    Defaults,
}

impl StorageArgs {
    fn to_settings(&self) -> Result<StorageSettings> {
        let backend = match self.backend {
            BackendArg::Gcs => BackendSettings::Gcs {
                service_account_path: self.service_account.clone(),
            },
            BackendArg::Local => {
                let Some(root) = &self.root else {
                    bail!("--root is required with --backend local");
                };
                BackendSettings::Local {
                    root: root.display().to_string(),
                }
            }
            BackendArg::Memory => BackendSettings::Memory,
        };

        Ok(StorageSettings {
            project_id: self.project.clone(),
            backend,
        })
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = cli.storage.to_settings()?;
    commands::run(cli.command, &settings).await
}
