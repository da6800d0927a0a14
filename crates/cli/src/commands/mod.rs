//! CLI definition and execution
//!
//! Resolves the command line into transfer options and a client
//! configuration, builds the S3 client and hands off to the sync command.

use clap::{CommandFactory, Parser};
use s3sync_core::{ClientConfig, ConfigManager, TransferOptions};
use s3sync_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

pub mod sync;

/// s3sync - Synchronize a local directory with an S3 bucket prefix
///
/// Exactly one of SOURCE and DESTINATION must be an s3://bucket[/key] URI;
/// the other is a local path. Files are uploaded when the destination is
/// remote and downloaded when the source is remote.
#[derive(Parser, Debug)]
#[command(name = "s3sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source path (local path or s3://bucket/key)
    pub source: String,

    /// Destination path (local path or s3://bucket/key)
    pub destination: String,

    /// Credential profile to use
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Only show what would be transferred
    #[arg(long)]
    pub dry_run: bool,

    /// Region of the bucket
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long)]
    pub force_path_style: bool,

    /// Output format: human-readable or JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Client settings given on the command line or through the environment
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new().with_force_path_style(self.force_path_style);
        if let Some(profile) = &self.profile {
            config = config.with_profile(profile);
        }
        if let Some(region) = &self.region {
            config = config.with_region(region);
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config = config.with_endpoint_url(endpoint_url);
        }
        config
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            json: self.json,
            no_color: self.no_color,
            quiet: self.quiet,
        }
    }
}

/// Execute the CLI and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(cli.output_config());

    let options = match TransferOptions::resolve(&cli.source, &cli.destination, cli.dry_run) {
        Ok(options) => options,
        Err(e) => {
            formatter.error(&e.to_string());
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::Failure;
        }
    };
    tracing::debug!(?options, "resolved transfer options");

    let config = match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::Failure;
        }
    };

    let client_config = cli.client_config().or_defaults(&config.defaults);
    let client = match S3Client::new(client_config).await {
        Ok(client) => client,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::Failure;
        }
    };

    sync::execute(&client, &options, &formatter).await
}
