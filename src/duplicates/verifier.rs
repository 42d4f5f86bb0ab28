//! Pairwise content verification.
//!
//! # Overview
//!
//! The [`Verifier`] decides how two same-size files relate to each other:
//!
//! 1. **Identity**: names sharing a [`FileIdentity`] are already hard linked
//! 2. **Policy**: attribute and timestamp checks when the run requires them
//! 3. **Content**: block-wise byte comparison with early exit on mismatch
//!
//! The first block is small so that most non-duplicates are rejected after
//! a short read; later blocks are large for throughput. The two files are
//! read in alternating order from block to block, which keeps the disk head
//! moving less on spinning media.
//!
//! Any failure to open or read a file classifies the pair as
//! [`CompareOutcome::Different`]: a pair that cannot be verified is never
//! reported as a duplicate.
//!
//! # Example
//!
//! ```no_run
//! use dupelink::config::ScanPolicy;
//! use dupelink::duplicates::{CompareOutcome, Verifier};
//! use std::path::Path;
//!
//! let mut verifier = Verifier::new();
//! let outcome = verifier.compare(
//!     Path::new("/data/a.bin"),
//!     Path::new("/data/b.bin"),
//!     4096,
//!     &ScanPolicy::default(),
//! );
//!
//! if outcome == CompareOutcome::Equal {
//!     println!("Files are equal, hard link possible");
//! }
//! ```

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use crate::config::ScanPolicy;
use crate::scanner::attributes::attribute_bits;
use crate::scanner::FileIdentity;

/// Size of the first block read from each file (64 KiB).
pub const FIRST_BLOCK_SIZE: usize = 64 * 1024;

/// Size of every following block (4 MiB).
pub const BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Relationship between two files of equal declared size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOutcome {
    /// Distinct files with identical content.
    Equal,
    /// Both names already refer to the same data.
    AlreadyLinked,
    /// Excluded by the attribute/timestamp policy, or metadata unreadable.
    Filtered,
    /// Content differs, or could not be verified.
    Different,
}

/// Content comparer with a reusable pair of block buffers.
///
/// The buffers are allocated on the first content comparison, at the large
/// block size, and kept for every later call.
#[derive(Debug)]
pub struct Verifier {
    first_block: usize,
    block: usize,
    buffers: Option<(Box<[u8]>, Box<[u8]>)>,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Verifier {
    /// Create a verifier with the standard block sizes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_block_sizes(FIRST_BLOCK_SIZE, BLOCK_SIZE)
    }

    /// Create a verifier with custom block sizes.
    ///
    /// `block` is raised to at least 1 and `first_block` is clamped to
    /// `1..=block`.
    #[must_use]
    pub fn with_block_sizes(first_block: usize, block: usize) -> Self {
        let block = block.max(1);
        Self {
            first_block: first_block.clamp(1, block),
            block,
            buffers: None,
        }
    }

    /// Check if the comparison buffers have been allocated yet.
    #[must_use]
    pub fn is_buffer_allocated(&self) -> bool {
        self.buffers.is_some()
    }

    /// Compare two files of the given declared size.
    pub fn compare(
        &mut self,
        a: &Path,
        b: &Path,
        declared_size: u64,
        policy: &ScanPolicy,
    ) -> CompareOutcome {
        if a == b {
            log::error!("Same file \"{}\" found as duplicate, ignoring!", a.display());
            return CompareOutcome::Different;
        }

        let Some(mut file_a) = open_for_compare(a) else {
            return CompareOutcome::Different;
        };
        let Some(mut file_b) = open_for_compare(b) else {
            return CompareOutcome::Different;
        };

        if let Some(outcome) = check_metadata(&file_a, &file_b, policy) {
            return outcome;
        }

        self.compare_content(&mut file_a, &mut file_b, declared_size)
    }

    /// Block-wise comparison of two open files.
    fn compare_content<R: Read>(&mut self, a: &mut R, b: &mut R, declared_size: u64) -> CompareOutcome {
        let block = self.block;
        let mut chunk = self.first_block;
        let (buf_a, buf_b) = self.buffers.get_or_insert_with(|| {
            (
                vec![0u8; block].into_boxed_slice(),
                vec![0u8; block].into_boxed_slice(),
            )
        });

        let mut remaining = declared_size;
        let mut a_first = true;

        while remaining > 0 {
            let want = usize::try_from(remaining).map_or(chunk, |r| r.min(chunk));
            let (read_a, read_b) = if a_first {
                let read_a = read_block(a, &mut buf_a[..want]);
                (read_a, read_block(b, &mut buf_b[..want]))
            } else {
                let read_b = read_block(b, &mut buf_b[..want]);
                (read_block(a, &mut buf_a[..want]), read_b)
            };
            a_first = !a_first;
            chunk = block;

            let (read_a, read_b) = match (read_a, read_b) {
                (Ok(ra), Ok(rb)) => (ra, rb),
                (Err(e), _) | (_, Err(e)) => {
                    log::error!("Read error while comparing files: {}", e);
                    return CompareOutcome::Different;
                }
            };

            if read_a != read_b || read_a == 0 {
                log::error!(
                    "File length differ or read error ({} vs {} bytes), file changed since scan?",
                    read_a,
                    read_b
                );
                return CompareOutcome::Different;
            }

            if buf_a[..read_a] != buf_b[..read_b] {
                log::debug!("Files differ in content.");
                return CompareOutcome::Different;
            }

            remaining -= read_a as u64;
        }

        // Both files must end exactly at the declared size.
        let mut probe = [0u8; 1];
        let a_ended = matches!(read_block(a, &mut probe), Ok(0));
        let b_ended = matches!(read_block(b, &mut probe), Ok(0));
        if !a_ended || !b_ended {
            log::error!("File grew beyond its scanned size of {} bytes, skipping.", declared_size);
            return CompareOutcome::Different;
        }

        log::debug!("Files are equal, hard link possible.");
        CompareOutcome::Equal
    }
}

/// Open a file for sequential reading, logging failures.
fn open_for_compare(path: &Path) -> Option<File> {
    match File::open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            log::error!("Unable to open file \"{}\": {}", path.display(), e);
            None
        }
    }
}

/// Identity and policy checks; `None` means "go on and compare content".
fn check_metadata(a: &File, b: &File, policy: &ScanPolicy) -> Option<CompareOutcome> {
    let (identity_a, identity_b) = match (FileIdentity::from_file(a), FileIdentity::from_file(b)) {
        (Ok(ia), Ok(ib)) => (ia, ib),
        (Err(e), _) | (_, Err(e)) => {
            log::info!("Unable to read further file information ({}), skipping.", e);
            return Some(CompareOutcome::Filtered);
        }
    };

    if identity_a == identity_b {
        log::debug!("Files are already hard linked, skipping.");
        return Some(CompareOutcome::AlreadyLinked);
    }

    if !policy.match_attributes && !policy.match_timestamps {
        return None;
    }

    let (meta_a, meta_b) = match (a.metadata(), b.metadata()) {
        (Ok(ma), Ok(mb)) => (ma, mb),
        (Err(e), _) | (_, Err(e)) => {
            log::info!("Unable to read further file information ({}), skipping.", e);
            return Some(CompareOutcome::Filtered);
        }
    };

    if policy.match_attributes && attribute_bits(&meta_a) != attribute_bits(&meta_b) {
        log::debug!("Attributes of files do not match, skipping.");
        return Some(CompareOutcome::Filtered);
    }

    if policy.match_timestamps {
        match (meta_a.modified(), meta_b.modified()) {
            (Ok(ta), Ok(tb)) if ta == tb => {}
            (Ok(_), Ok(_)) => {
                log::debug!("Modification timestamps of files do not match, skipping.");
                return Some(CompareOutcome::Filtered);
            }
            (Err(e), _) | (_, Err(e)) => {
                log::info!("Unable to read modification time ({}), skipping.", e);
                return Some(CompareOutcome::Filtered);
            }
        }
    }

    None
}

/// Fill `buf` as far as the reader allows; returns the byte count.
fn read_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
