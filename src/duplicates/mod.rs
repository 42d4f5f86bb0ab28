//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Byte-wise verification of two same-size files
//! - The pairing pass over a scanned catalog
//! - The ordered set of confirmed duplicate pairs

pub mod finder;
pub mod pairs;
pub mod verifier;

pub use finder::{DuplicateFinder, PairingSummary};
pub use pairs::{DuplicatePair, DuplicateSet};
pub use verifier::{CompareOutcome, Verifier, BLOCK_SIZE, FIRST_BLOCK_SIZE};
