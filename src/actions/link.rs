//! Hard link replacement of duplicate files.
//!
//! # Overview
//!
//! Replacing the second file of a [`DuplicatePair`] with a hard link to the
//! first is a three step transaction:
//!
//! 1. Rename `second` to `second` + backup suffix
//! 2. Create a hard link named `second` pointing at `first`'s data
//! 3. Remove the backup, clearing the read-only flag once if needed
//!
//! If step 1 fails nothing has changed. If step 2 fails the backup is
//! renamed back so the original name is restored. A backup that cannot be
//! removed in step 3 is logged and left behind; the link itself is done.
//!
//! # Safety
//!
//! An existing entry at the backup path is never overwritten. Pairs are
//! independent: a failure on one pair does not stop the batch.
//!
//! # Example
//!
//! ```no_run
//! use dupelink::actions::link::Linker;
//! use dupelink::duplicates::DuplicatePair;
//! use std::path::PathBuf;
//!
//! let pair = DuplicatePair::new(
//!     PathBuf::from("/data/a.bin"),
//!     PathBuf::from("/data/b.bin"),
//!     2048,
//! );
//!
//! match Linker::new().link(&pair) {
//!     Ok(()) => println!("Linked {}", pair.second.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use thiserror::Error;

use crate::duplicates::{DuplicatePair, DuplicateSet};

/// Suffix appended to the second file's name while it is being replaced.
pub const BACKUP_SUFFIX: &str = "_backup";

/// Error type for link operations.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Something already occupies the backup path.
    #[error("backup path already exists: {0}")]
    BackupExists(PathBuf),

    /// Renaming the file to its backup name failed.
    #[error("unable to rename {path} to {backup}: {source}")]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating the hard link failed; the original name was restored.
    #[error("unable to link {link} to {target}: {source}")]
    Link {
        target: PathBuf,
        link: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating the hard link failed and the backup could not be renamed back.
    #[error("unable to restore {path} from {backup} after failed link: {source}")]
    RestoreFailed {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LinkError {
    /// Get the path the error is about.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::BackupExists(p) => p,
            Self::Backup { path, .. } | Self::RestoreFailed { path, .. } => path,
            Self::Link { link, .. } => link,
        }
    }
}

/// Results of linking a whole duplicate set.
#[derive(Debug, Clone, Default)]
pub struct BatchLinkResult {
    /// Pairs that were linked.
    pub successes: Vec<DuplicatePair>,
    /// Pairs that failed, with the error message.
    pub failures: Vec<(DuplicatePair, String)>,
    /// Bytes reclaimed by the successful pairs.
    pub bytes_saved: u64,
}

impl BatchLinkResult {
    /// Number of linked pairs.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed pairs.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if every pair was linked.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Performs the hard link transaction for duplicate pairs.
#[derive(Debug, Clone)]
pub struct Linker {
    suffix: String,
}

impl Default for Linker {
    fn default() -> Self {
        Self::new()
    }
}

impl Linker {
    /// Create a linker using [`BACKUP_SUFFIX`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_suffix(BACKUP_SUFFIX)
    }

    /// Create a linker with a custom backup suffix.
    #[must_use]
    fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Path the second file is parked at during the swap.
    #[must_use]
    pub fn backup_path(&self, path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(&self.suffix);
        PathBuf::from(name)
    }

    /// Replace `pair.second` with a hard link to `pair.first`.
    ///
    /// # Errors
    ///
    /// Returns `LinkError` if the backup path is taken, the rename fails,
    /// or the link cannot be created.
    pub fn link(&self, pair: &DuplicatePair) -> Result<(), LinkError> {
        let backup = self.backup_path(&pair.second);

        if fs::symlink_metadata(&backup).is_ok() {
            return Err(LinkError::BackupExists(backup));
        }

        fs::rename(&pair.second, &backup).map_err(|source| LinkError::Backup {
            path: pair.second.clone(),
            backup: backup.clone(),
            source,
        })?;

        if let Err(link_err) = fs::hard_link(&pair.first, &pair.second) {
            if let Err(source) = fs::rename(&backup, &pair.second) {
                log::error!(
                    "Unable to restore {} after failed link: {}",
                    pair.second.display(),
                    link_err
                );
                return Err(LinkError::RestoreFailed {
                    path: pair.second.clone(),
                    backup,
                    source,
                });
            }
            return Err(LinkError::Link {
                target: pair.first.clone(),
                link: pair.second.clone(),
                source: link_err,
            });
        }

        if let Err(e) = remove_backup(&backup) {
            log::error!("Unable to delete backup file {}: {}", backup.display(), e);
        }

        Ok(())
    }

    /// Drain the set and link every pair.
    ///
    /// Failures are logged and collected; they never stop the batch.
    pub fn link_all(&self, mut set: DuplicateSet) -> BatchLinkResult {
        let mut result = BatchLinkResult::default();

        if set.is_empty() {
            log::info!("No files found for linking");
            return result;
        }

        log::info!("Hard linking {} duplicate files", set.len());

        while let Some(pair) = set.pop() {
            log::info!(
                "Linking {} and {}",
                pair.first.display(),
                pair.second.display()
            );

            match self.link(&pair) {
                Ok(()) => {
                    result.bytes_saved += pair.size;
                    result.successes.push(pair);
                }
                Err(e) => {
                    log::error!(
                        "Unable to process links for {} and {}: {}",
                        pair.first.display(),
                        pair.second.display(),
                        e
                    );
                    let message = e.to_string();
                    result.failures.push((pair, message));
                }
            }
        }

        log::info!(
            "Hard linking done, {} bytes ({}) saved.",
            result.bytes_saved,
            ByteSize::b(result.bytes_saved)
        );

        result
    }
}

/// Delete the backup, retrying once with the read-only flag cleared.
fn remove_backup(backup: &Path) -> io::Result<()> {
    let Err(first) = fs::remove_file(backup) else {
        return Ok(());
    };
    log::debug!(
        "Deleting {} failed ({}), clearing read-only flag and retrying",
        backup.display(),
        first
    );
    clear_readonly(backup)?;
    fs::remove_file(backup)
}

#[cfg(unix)]
fn clear_readonly(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o200);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn clear_readonly(path: &Path) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}
