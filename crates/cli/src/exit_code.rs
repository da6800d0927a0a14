//! Exit code definitions for the s3sync CLI
//!
//! Scripts only need to tell success from failure: every usage problem and
//! every transfer failure exits with the same non-zero status.

/// Exit codes for the s3sync application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every planned transfer completed
    Success = 0,

    /// Invalid arguments, or a run that stopped on its first error
    Failure = 1,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            Self::Success => "Sync completed successfully",
            Self::Failure => "Sync failed",
        };
        write!(f, "{description} ({})", self.as_i32())
    }
}
