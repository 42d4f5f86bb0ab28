//! Output formatters for pairing results.
//!
//! Currently a single plain text listing of the confirmed pairs, written to
//! any [`std::io::Write`] so the binary can send it to stdout while logs go
//! to stderr.
//!
//! # Example
//!
//! ```
//! use dupelink::duplicates::{DuplicatePair, DuplicateSet};
//! use dupelink::output::write_duplicate_list;
//! use std::path::PathBuf;
//!
//! let mut set = DuplicateSet::new();
//! set.add(DuplicatePair::new(PathBuf::from("/a"), PathBuf::from("/b"), 2048));
//!
//! let mut out = Vec::new();
//! write_duplicate_list(&set, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("2048 bytes: /a = /b"));
//! ```

pub mod list;

pub use list::{write_duplicate_list, ListOutput};
