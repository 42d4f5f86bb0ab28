//! Run configuration.
//!
//! Everything a run needs to know is captured once, right after argument
//! parsing, in a [`RunConfig`]. The scan filters and comparison rules live in
//! the immutable [`ScanPolicy`] snapshot that is handed to the scanner and the
//! verifier; nothing is kept in process-wide state.

use std::path::PathBuf;

use log::LevelFilter;

use crate::cli::Cli;

/// Files below this size are skipped unless small files are included.
pub const MIN_FILE_SIZE: u64 = 1024;

/// Filter and comparison policy for a run.
///
/// All options default to `false`: only non-hidden, non-system files of at
/// least [`MIN_FILE_SIZE`] bytes in the root directories themselves are
/// considered, and content alone decides equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanPolicy {
    /// File attributes must match before content is compared.
    pub match_attributes: bool,
    /// Last-write timestamps must match before content is compared.
    pub match_timestamps: bool,
    /// Include hidden files.
    pub include_hidden: bool,
    /// Include system-flagged files.
    pub include_system: bool,
    /// Include files smaller than [`MIN_FILE_SIZE`].
    pub include_small: bool,
    /// Descend into junctions (symbolic links to directories).
    pub follow_junctions: bool,
    /// Descend into subdirectories.
    pub recurse: bool,
}

impl ScanPolicy {
    /// Require matching attributes.
    #[must_use]
    pub fn with_match_attributes(mut self, enabled: bool) -> Self {
        self.match_attributes = enabled;
        self
    }

    /// Require matching last-write timestamps.
    #[must_use]
    pub fn with_match_timestamps(mut self, enabled: bool) -> Self {
        self.match_timestamps = enabled;
        self
    }

    /// Include hidden files.
    #[must_use]
    pub fn with_include_hidden(mut self, enabled: bool) -> Self {
        self.include_hidden = enabled;
        self
    }

    /// Include system-flagged files.
    #[must_use]
    pub fn with_include_system(mut self, enabled: bool) -> Self {
        self.include_system = enabled;
        self
    }

    /// Include files below the minimum size.
    #[must_use]
    pub fn with_include_small(mut self, enabled: bool) -> Self {
        self.include_small = enabled;
        self
    }

    /// Follow junctions.
    #[must_use]
    pub fn with_follow_junctions(mut self, enabled: bool) -> Self {
        self.follow_junctions = enabled;
        self
    }

    /// Recurse into subdirectories.
    #[must_use]
    pub fn with_recurse(mut self, enabled: bool) -> Self {
        self.recurse = enabled;
        self
    }
}

/// Console verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Progress and results.
    #[default]
    Normal,
    /// Per-folder and per-comparison detail.
    Verbose,
    /// Everything, including every directory entry seen.
    Debug,
}

impl Verbosity {
    /// Log level filter for this verbosity.
    #[must_use]
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Error,
            Self::Normal => LevelFilter::Info,
            Self::Verbose => LevelFilter::Debug,
            Self::Debug => LevelFilter::Trace,
        }
    }
}

/// Complete configuration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Root directories to scan, in the order given.
    pub roots: Vec<PathBuf>,
    /// Filter and comparison policy.
    pub policy: ScanPolicy,
    /// Console verbosity.
    pub verbosity: Verbosity,
    /// Replace duplicates with hard links (otherwise report only).
    pub link: bool,
    /// Print the duplicate list to standard output.
    pub list: bool,
}

impl RunConfig {
    /// Build the run configuration from parsed arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let policy = ScanPolicy::default()
            .with_match_attributes(cli.match_attributes)
            .with_match_timestamps(cli.match_timestamps)
            .with_include_hidden(cli.hidden)
            .with_include_system(cli.system)
            .with_include_small(cli.small)
            .with_follow_junctions(cli.junctions)
            .with_recurse(cli.recursive);

        // At most one of the three survives parsing: the last one given
        let verbosity = if cli.quiet {
            Verbosity::Quiet
        } else if cli.debug {
            Verbosity::Debug
        } else if cli.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            roots: cli.paths.clone(),
            policy,
            verbosity,
            link: cli.link,
            list: cli.list,
        }
    }
}
