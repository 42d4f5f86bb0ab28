//! Duplicate finder driving the pairwise comparison pass.
//!
//! # Overview
//!
//! The finder drains a [`FileCatalog`] front to back. Each popped candidate
//! is compared against every remaining candidate of the same declared size,
//! in catalog order, until one comparison settles it:
//!
//! - [`CompareOutcome::Equal`] records a pair and stops the inner scan
//! - [`CompareOutcome::AlreadyLinked`] and [`CompareOutcome::Filtered`] stop
//!   the inner scan without recording anything
//! - [`CompareOutcome::Different`] moves on to the next candidate
//!
//! The partner of a recorded pair stays in the catalog and is later popped
//! as a candidate of its own, so three identical files `A`, `B`, `C` yield
//! the pairs `(A, B)` and `(B, C)`.
//!
//! # Example
//!
//! ```no_run
//! use dupelink::config::ScanPolicy;
//! use dupelink::duplicates::DuplicateFinder;
//! use dupelink::scanner::Scanner;
//! use std::path::Path;
//!
//! let policy = ScanPolicy::default().with_recurse(true);
//! let catalog = Scanner::new(policy).scan(&[Path::new("/data")]).unwrap();
//!
//! let mut finder = DuplicateFinder::new(policy);
//! let (set, summary) = finder.find(catalog);
//!
//! println!("{} pairs after {} comparisons", set.pair_count(), summary.comparisons);
//! ```

use std::time::Instant;

use bytesize::ByteSize;

use super::pairs::{DuplicatePair, DuplicateSet};
use super::verifier::{CompareOutcome, Verifier};
use crate::config::ScanPolicy;
use crate::scanner::FileCatalog;

/// Counters collected while pairing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingSummary {
    /// Number of candidates in the catalog when pairing started
    pub candidates: usize,
    /// Number of verifier calls
    pub comparisons: usize,
    /// Comparisons that found identical content
    pub equal: usize,
    /// Comparisons that found the two names already hard linked
    pub already_linked: usize,
    /// Comparisons excluded by policy or unreadable metadata
    pub filtered: usize,
    /// Comparisons that found different or unverifiable content
    pub different: usize,
}

impl PairingSummary {
    fn record(&mut self, outcome: CompareOutcome) {
        self.comparisons += 1;
        match outcome {
            CompareOutcome::Equal => self.equal += 1,
            CompareOutcome::AlreadyLinked => self.already_linked += 1,
            CompareOutcome::Filtered => self.filtered += 1,
            CompareOutcome::Different => self.different += 1,
        }
    }
}

/// Pairs up byte-identical files from a scanned catalog.
#[derive(Debug)]
pub struct DuplicateFinder {
    policy: ScanPolicy,
    verifier: Verifier,
}

impl DuplicateFinder {
    /// Create a finder using the standard verifier.
    #[must_use]
    pub fn new(policy: ScanPolicy) -> Self {
        Self::with_verifier(policy, Verifier::new())
    }

    /// Create a finder around a preconfigured verifier.
    #[must_use]
    pub fn with_verifier(policy: ScanPolicy, verifier: Verifier) -> Self {
        Self { policy, verifier }
    }

    /// Consume the catalog and return the confirmed pairs.
    ///
    /// The catalog is drained completely. Pairs appear in the order they
    /// were confirmed.
    pub fn find(&mut self, mut catalog: FileCatalog) -> (DuplicateSet, PairingSummary) {
        let mut set = DuplicateSet::new();
        let mut summary = PairingSummary {
            candidates: catalog.len(),
            ..PairingSummary::default()
        };

        log::info!(
            "Found {} files in folders, comparing relevant files.",
            summary.candidates
        );

        while let Some(candidate) = catalog.pop() {
            for other in catalog.iter().filter(|other| other.size == candidate.size) {
                log::debug!(
                    "File \"{}\" and \"{}\" have both size of {} comparing...",
                    candidate.path.display(),
                    other.path.display(),
                    candidate.size
                );

                let started = Instant::now();
                let outcome =
                    self.verifier
                        .compare(&candidate.path, &other.path, candidate.size, &self.policy);
                summary.record(outcome);

                match outcome {
                    CompareOutcome::Equal => {
                        log_throughput(started, candidate.size);
                        set.add(DuplicatePair::new(
                            candidate.path.clone(),
                            other.path.clone(),
                            candidate.size,
                        ));
                        break;
                    }
                    CompareOutcome::AlreadyLinked | CompareOutcome::Filtered => break,
                    CompareOutcome::Different => {}
                }
            }
        }

        log::info!(
            "Found {} duplicate files, savings of {} bytes ({}) possible.",
            set.pair_count(),
            set.byte_sum(),
            ByteSize::b(set.byte_sum())
        );

        (set, summary)
    }
}

fn log_throughput(started: Instant, size: u64) {
    let elapsed = started.elapsed();
    let kib_per_sec = if elapsed.as_secs_f64() > 0.0 {
        size as f64 / 1024.0 / elapsed.as_secs_f64()
    } else {
        0.0
    };
    log::trace!(
        "Compare took {:.3} ms ({:.0} KB/s)",
        elapsed.as_secs_f64() * 1000.0,
        kib_per_sec
    );
}
