//! sync command - run one upload or download
//!
//! Prints every planned transfer as it happens, then a one-line summary.

use s3sync_core::sync::{self as engine, SyncSummary, Transfer};
use s3sync_core::{Direction, ObjectStore, TransferOptions};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// One transfer as printed on stdout
#[derive(Debug, Serialize)]
pub struct TransferRecord {
    pub action: &'static str,
    pub source: String,
    pub target: String,
    pub dry_run: bool,
    #[serde(skip)]
    line: String,
}

impl TransferRecord {
    pub fn new(transfer: &Transfer, dry_run: bool) -> Self {
        let (action, source, target) = match transfer {
            Transfer::Upload { local, key } => ("upload", local.display().to_string(), key.clone()),
            Transfer::Download { key, local } => {
                ("download", key.clone(), local.display().to_string())
            }
        };
        Self {
            action,
            source,
            target,
            dry_run,
            line: transfer.to_string(),
        }
    }
}

impl std::fmt::Display for TransferRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.line)
    }
}

/// Closing summary of a run
#[derive(Debug, Serialize)]
pub struct SummaryRecord {
    pub status: &'static str,
    pub direction: String,
    pub files: u64,
    pub size_bytes: u64,
    pub size_human: String,
    pub dry_run: bool,
}

impl SummaryRecord {
    pub fn new(direction: Direction, summary: SyncSummary, dry_run: bool) -> Self {
        Self {
            status: "success",
            direction: direction.to_string(),
            files: summary.files,
            size_bytes: summary.bytes,
            size_human: humansize::format_size(summary.bytes, humansize::BINARY),
            dry_run,
        }
    }
}

impl std::fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.dry_run {
            write!(f, "Would {} {} file(s).", self.direction, self.files)
        } else {
            let verb = match self.direction.as_str() {
                "upload" => "Uploaded",
                _ => "Downloaded",
            };
            write!(f, "{verb} {} file(s) ({}).", self.files, self.size_human)
        }
    }
}

/// Execute a sync against `store`
pub async fn execute(
    store: &dyn ObjectStore,
    options: &TransferOptions,
    formatter: &Formatter,
) -> ExitCode {
    let mut report = |transfer: &Transfer| {
        formatter.record(&TransferRecord::new(transfer, options.dry_run));
    };

    let summary = match engine::run(store, options, &mut report).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::debug!(error = ?e, "sync failed");
            formatter.error(&format!("{} failed: {e}", options.direction));
            return ExitCode::Failure;
        }
    };

    if summary.files == 0 {
        let message = match options.direction {
            Direction::Upload => "No files found to upload.",
            Direction::Download => "No objects found to download.",
        };
        formatter.warning(message);
    }

    let record = SummaryRecord::new(options.direction, summary, options.dry_run);
    if formatter.is_json() {
        if !formatter.is_quiet() {
            formatter.json_line(&record);
        }
    } else {
        formatter.success(&record.to_string());
    }

    ExitCode::Success
}
