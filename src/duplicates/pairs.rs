//! Confirmed duplicate pairs.
//!
//! # Overview
//!
//! Every pair in a [`DuplicateSet`] names two distinct files with identical
//! content and distinct file identity. The set keeps the pairs in the order
//! they were confirmed, along with running totals of the pair count and the
//! bytes that linking would reclaim.
//!
//! # Example
//!
//! ```
//! use dupelink::duplicates::{DuplicatePair, DuplicateSet};
//! use std::path::PathBuf;
//!
//! let mut set = DuplicateSet::new();
//! set.add(DuplicatePair::new(PathBuf::from("/a.bin"), PathBuf::from("/b.bin"), 2048));
//! set.add(DuplicatePair::new(PathBuf::from("/c.bin"), PathBuf::from("/d.bin"), 4096));
//!
//! assert_eq!(set.pair_count(), 2);
//! assert_eq!(set.byte_sum(), 6144);
//! ```

use std::path::PathBuf;

use crate::queue::Queue;

/// Two files with byte-identical content.
///
/// Linking keeps `first` and replaces `second` with a hard link to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePair {
    /// File whose data is kept
    pub first: PathBuf,
    /// File that is replaced by a hard link to `first`
    pub second: PathBuf,
    /// Size of each file in bytes
    pub size: u64,
}

impl DuplicatePair {
    /// Create a new pair.
    #[must_use]
    pub fn new(first: PathBuf, second: PathBuf, size: u64) -> Self {
        Self {
            first,
            second,
            size,
        }
    }
}

/// Ordered set of confirmed duplicate pairs with running totals.
///
/// The totals describe everything ever added, so they stay valid for the
/// final report even after the pairs have been consumed by the linker.
#[derive(Debug, Clone, Default)]
pub struct DuplicateSet {
    pairs: Queue<DuplicatePair>,
    pair_count: usize,
    byte_sum: u64,
}

impl DuplicateSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a confirmed pair.
    pub fn add(&mut self, pair: DuplicatePair) {
        self.pair_count += 1;
        self.byte_sum += pair.size;
        self.pairs.push(pair);
    }

    /// Remove and return the oldest pair.
    pub fn pop(&mut self) -> Option<DuplicatePair> {
        self.pairs.pop()
    }

    /// Iterate over the remaining pairs without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &DuplicatePair> {
        self.pairs.iter()
    }

    /// Number of pairs ever added.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Bytes reclaimable by linking every pair ever added.
    #[must_use]
    pub fn byte_sum(&self) -> u64 {
        self.byte_sum
    }

    /// Number of pairs not yet consumed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if no pairs remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
