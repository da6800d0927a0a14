//! Output formatting utilities
//!
//! Transfer lines and the closing summary go to stdout, in human-readable or
//! JSON form. Errors and warnings go to stderr.

mod formatter;

pub use formatter::Formatter;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
