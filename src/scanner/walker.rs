//! Breadth-first directory scanner.
//!
//! # Overview
//!
//! This module provides the [`Scanner`] which discovers the files that take
//! part in duplicate detection. Root folders seed a FIFO queue of pending
//! folders; each folder is listed one level deep with [`walkdir`], its
//! subfolders are appended to the queue and its files are filtered into the
//! [`FileCatalog`].
//!
//! # Features
//!
//! - Breadth-first traversal, one folder level at a time
//! - Optional recursion and junction (directory symlink) following
//! - Hidden, system, empty and small file filters
//! - Folder loop detection via [`FileIdentity`] when junctions are followed
//!
//! # Errors
//!
//! A folder that cannot be opened is logged and skipped. An error while
//! reading the entries of an opened folder aborts the whole scan with
//! [`ScanError::Enumeration`].
//!
//! # Example
//!
//! ```no_run
//! use dupelink::config::ScanPolicy;
//! use dupelink::scanner::Scanner;
//! use std::path::PathBuf;
//!
//! let mut scanner = Scanner::new(ScanPolicy::default());
//! let catalog = scanner.scan(&[PathBuf::from("/home/user/Downloads")]).unwrap();
//! println!("Found {} files", catalog.len());
//! ```

use std::collections::HashSet;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::attributes;
use super::identity::FileIdentity;
use super::{FileCandidate, FileCatalog, PathQueue, ScanError, ScanStats};
use crate::config::{ScanPolicy, MIN_FILE_SIZE};

/// Directory scanner producing the file catalog.
#[derive(Debug)]
pub struct Scanner {
    /// Filter policy
    policy: ScanPolicy,
    /// Counters of the last scan
    stats: ScanStats,
    /// Identities of folders already queued
    visited: HashSet<FileIdentity>,
}

impl Scanner {
    /// Create a scanner with the given filter policy.
    #[must_use]
    pub fn new(policy: ScanPolicy) -> Self {
        Self {
            policy,
            stats: ScanStats::default(),
            visited: HashSet::new(),
        }
    }

    /// Counters of the most recent scan.
    #[must_use]
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Scan the given root folders.
    ///
    /// Roots must be existing folders; that is checked while parsing the
    /// command line. Relative roots are made absolute against the current
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Enumeration`] if reading the entries of an
    /// opened folder fails. Nothing is returned from a failed scan.
    pub fn scan<P: AsRef<Path>>(&mut self, roots: &[P]) -> Result<FileCatalog, ScanError> {
        self.stats = ScanStats::default();
        self.visited.clear();

        let mut pending = PathQueue::new();
        for root in roots {
            let root = absolute_path(root.as_ref());
            let metadata = fs::metadata(&root).ok();
            if self.first_visit(&root, metadata.as_ref()) {
                pending.push(root);
            }
        }

        let mut catalog = FileCatalog::new();
        log::info!("Parsing directory tree...");

        while let Some(folder) = pending.pop() {
            log::debug!("Parsing folder {}", folder.display());
            self.read_folder(&folder, &mut pending, &mut catalog)?;
        }

        log::debug!(
            "Scan complete: {} folders read, {} skipped, {} files accepted, {} entries filtered",
            self.stats.folders_read,
            self.stats.folders_skipped,
            self.stats.files_accepted,
            self.stats.entries_filtered
        );

        Ok(catalog)
    }

    /// List one folder level and sort its entries into the queues.
    fn read_folder(
        &mut self,
        folder: &Path,
        pending: &mut PathQueue,
        catalog: &mut FileCatalog,
    ) -> Result<(), ScanError> {
        let entries = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in entries {
            match entry {
                Ok(entry) => self.add_entry(&entry, pending, catalog),
                Err(err) if err.depth() == 0 => {
                    // Protected folders (e.g. "System Volume Information")
                    // end up here; skip them and keep scanning.
                    log::error!("Unable to read folder content of {}: {}", folder.display(), err);
                    self.stats.folders_skipped += 1;
                    return Ok(());
                }
                Err(err) => {
                    return Err(ScanError::Enumeration {
                        path: folder.to_path_buf(),
                        source: err,
                    });
                }
            }
        }

        self.stats.folders_read += 1;
        Ok(())
    }

    /// Apply the filter policy to one entry.
    fn add_entry(&mut self, entry: &DirEntry, pending: &mut PathQueue, catalog: &mut FileCatalog) {
        let path = entry.path();

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Unable to read metadata of {}: {}", path.display(), e);
                self.stats.entries_filtered += 1;
                return;
            }
        };

        log::trace!(
            "Found \"{}\" (size={}, {})",
            path.display(),
            metadata.len(),
            attributes::describe(path, &metadata)
        );

        let file_type = entry.file_type();
        if file_type.is_dir() {
            self.add_folder(path, false, Some(&metadata), pending);
        } else if file_type.is_symlink() {
            match fs::metadata(path) {
                Ok(target) if target.is_dir() => {
                    self.add_folder(path, true, Some(&target), pending);
                }
                _ => {
                    log::trace!("ignoring link, it does not point to a folder");
                    self.stats.entries_filtered += 1;
                }
            }
        } else if file_type.is_file() {
            self.add_file(path, &metadata, catalog);
        } else {
            log::trace!("ignoring entry, not a regular file");
            self.stats.entries_filtered += 1;
        }
    }

    fn add_folder(
        &mut self,
        path: &Path,
        is_junction: bool,
        metadata: Option<&Metadata>,
        pending: &mut PathQueue,
    ) {
        if !self.policy.recurse {
            log::trace!("skipping folder, not running recursive");
            self.stats.entries_filtered += 1;
            return;
        }
        if is_junction && !self.policy.follow_junctions {
            log::trace!("ignoring junction");
            self.stats.entries_filtered += 1;
            return;
        }
        if !self.first_visit(path, metadata) {
            self.stats.entries_filtered += 1;
            return;
        }
        pending.push(path.to_path_buf());
    }

    fn add_file(&mut self, path: &Path, metadata: &Metadata, catalog: &mut FileCatalog) {
        let size = metadata.len();

        if size == 0 {
            log::trace!("ignoring file, it is empty");
        } else if !self.policy.include_hidden && attributes::is_hidden(path, metadata) {
            log::trace!("ignoring file, hidden attribute is set");
        } else if !self.policy.include_small && size < MIN_FILE_SIZE {
            log::trace!("ignoring file, is too small");
        } else if !self.policy.include_system && attributes::is_system(metadata) {
            log::trace!("ignoring file, system attribute is set");
        } else {
            catalog.push(FileCandidate::new(path.to_path_buf(), size));
            self.stats.files_accepted += 1;
            return;
        }

        self.stats.entries_filtered += 1;
    }

    /// Record a folder identity; `false` if it was queued before.
    fn first_visit(&mut self, path: &Path, metadata: Option<&Metadata>) -> bool {
        match metadata.and_then(FileIdentity::from_metadata) {
            Some(identity) if !self.visited.insert(identity) => {
                log::warn!("Folder {} was already visited, skipping", path.display());
                false
            }
            _ => true,
        }
    }
}

/// Make a root path absolute without resolving links.
fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|e| {
        log::warn!("Unable to make {} absolute: {}", path.display(), e);
        path.to_path_buf()
    })
}
