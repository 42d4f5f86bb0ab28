//! Plain text listing of duplicate pairs.

use std::io::{self, Write};

use crate::duplicates::DuplicateSet;

/// Header line printed before the pairs.
pub const LIST_HEADER: &str = "Result of duplicate analysis:";

/// Line printed when there is nothing to list.
pub const EMPTY_LIST: &str = "No duplicates to list.";

/// Text formatter over a borrowed duplicate set.
///
/// Reads the set without consuming it, so the same set can still be handed
/// to the linker afterwards.
#[derive(Debug, Clone, Copy)]
pub struct ListOutput<'a> {
    set: &'a DuplicateSet,
}

impl<'a> ListOutput<'a> {
    /// Create a formatter for the given set.
    #[must_use]
    pub fn new(set: &'a DuplicateSet) -> Self {
        Self { set }
    }

    /// Write the listing to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.set.is_empty() {
            writeln!(writer, "{EMPTY_LIST}")?;
            return writer.flush();
        }

        writeln!(writer, "{LIST_HEADER}")?;
        for pair in self.set.iter() {
            writeln!(
                writer,
                "{} bytes: {} = {}",
                pair.size,
                pair.first.display(),
                pair.second.display()
            )?;
        }
        writer.flush()
    }
}

/// Write the listing of `set` to `writer`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_duplicate_list<W: Write>(set: &DuplicateSet, writer: &mut W) -> io::Result<()> {
    ListOutput::new(set).write_to(writer)
}
