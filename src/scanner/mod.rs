//! Scanner module for directory traversal and file discovery.
//!
//! This module provides functionality for:
//! - Breadth-first traversal of one or more root folders
//! - Scan filters (hidden, system, small and empty files, recursion, junctions)
//! - Stable file identity for hard link detection
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: The [`Scanner`] draining the pending folder queue
//! - [`attributes`]: Hidden/system flags and attribute sets per platform
//! - [`identity`]: Device + inode (or volume + file index) identity
//!
//! # Example
//!
//! ```no_run
//! use dupelink::config::ScanPolicy;
//! use dupelink::scanner::Scanner;
//! use std::path::Path;
//!
//! let policy = ScanPolicy::default().with_recurse(true);
//! let mut scanner = Scanner::new(policy);
//!
//! let catalog = scanner.scan(&[Path::new("/data/photos")]).unwrap();
//! for file in catalog.iter() {
//!     println!("{}: {} bytes", file.path.display(), file.size);
//! }
//! ```

pub mod attributes;
pub mod identity;
pub mod walker;

use std::path::PathBuf;

use crate::queue::Queue;

// Re-export main types
pub use identity::FileIdentity;
pub use walker::Scanner;

/// Folders waiting to be enumerated, in discovery order.
pub type PathQueue = Queue<PathBuf>;

/// Accepted file candidates, in discovery order.
pub type FileCatalog = Queue<FileCandidate>;

/// A file accepted by the scan filters.
///
/// The size is taken once, at scan time, and is trusted by the comparison
/// phase without another `stat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileCandidate {
    /// Create a new candidate.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Counters collected while scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Folders whose entries were listed
    pub folders_read: usize,
    /// Folders that could not be opened and were skipped
    pub folders_skipped: usize,
    /// Files added to the catalog
    pub files_accepted: usize,
    /// Entries rejected by a filter
    pub entries_filtered: usize,
}

/// Errors that abort a scan.
///
/// Folders that cannot be opened are only logged and skipped; this error
/// is reserved for failures while reading an already opened folder.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Enumerating the entries of a folder failed midway.
    #[error("Enumerating {path} failed: {source}")]
    Enumeration {
        /// Folder being enumerated
        path: PathBuf,
        /// The underlying walk error
        #[source]
        source: walkdir::Error,
    },
}
