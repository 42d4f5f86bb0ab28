//! File actions module.
//!
//! # Linking
//!
//! The link module replaces confirmed duplicates with hard links:
//! - Backup rename before the link is created
//! - Original name restored when linking fails
//! - Batch operation over a whole duplicate set with a savings report
//!
//! ```no_run
//! use dupelink::actions::link::Linker;
//! use dupelink::duplicates::DuplicateSet;
//!
//! let result = Linker::new().link_all(DuplicateSet::new());
//! println!("{} bytes saved", result.bytes_saved);
//! ```

pub mod link;

pub use link::{BatchLinkResult, LinkError, Linker};
