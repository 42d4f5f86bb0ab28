//! Process exit codes.
//!
//! Only two outcomes reach the shell:
//! - 0: Success (run completed, or help was shown)
//! - -1: Failure (usage error, missing root folder, or fatal scan error)
//!
//! Per-directory enumeration problems, comparison errors and failed link
//! transactions are logged where they happen and do not change the exit code.

/// Exit codes for the dupelink application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The run completed (duplicates or not), or help was displayed.
    Success = 0,
    /// Usage error or fatal scan error.
    Failure = -1,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
