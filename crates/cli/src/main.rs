//! s3sync - Synchronize a local directory with an S3 bucket prefix
//!
//! Uploads a local tree to a bucket prefix, or downloads a bucket prefix
//! into a local tree, depending on which argument carries `s3://`.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod exit_code;
mod output;

use commands::Cli;
use exit_code::ExitCode;

const DEBUG_FILTER: &str = "s3sync=debug,s3sync_core=debug,s3sync_s3=debug";

#[tokio::main]
async fn main() {
    // clap reports usage errors with status 2; this tool uses 1 for every failure
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::Failure
            } else {
                ExitCode::Success
            };
            std::process::exit(code.as_i32());
        }
    };

    // Logs go to stderr so stdout carries only transfer lines
    let filter = if cli.debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
