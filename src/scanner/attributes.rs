//! Platform file attributes used by the scan filters and the verifier.
//!
//! Windows exposes hidden and system flags directly. On other platforms a
//! leading dot marks a hidden entry and there is no system flag. The
//! "attribute set" compared under `/a` is the attribute word on Windows and
//! the permission bits elsewhere.

use std::fs::Metadata;
use std::path::Path;

#[cfg(windows)]
use windows_sys::Win32::Storage::FileSystem::{FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_SYSTEM};

/// Check if an entry is hidden.
#[cfg(windows)]
#[must_use]
pub fn is_hidden(_path: &Path, metadata: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
#[must_use]
pub fn is_hidden(path: &Path, _metadata: &Metadata) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().first() == Some(&b'.'))
}

/// Check if an entry carries the system flag.
#[cfg(windows)]
#[must_use]
pub fn is_system(metadata: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    metadata.file_attributes() & FILE_ATTRIBUTE_SYSTEM != 0
}

#[cfg(not(windows))]
#[must_use]
pub fn is_system(_metadata: &Metadata) -> bool {
    false
}

/// Attribute set compared when matching attributes is required.
#[cfg(windows)]
#[must_use]
pub fn attribute_bits(metadata: &Metadata) -> u32 {
    use std::os::windows::fs::MetadataExt;
    metadata.file_attributes()
}

#[cfg(unix)]
#[must_use]
pub fn attribute_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(any(unix, windows)))]
#[must_use]
pub fn attribute_bits(metadata: &Metadata) -> u32 {
    u32::from(metadata.permissions().readonly())
}

/// Short flag summary for trace output, e.g. `"HIDDEN READONLY"`.
#[must_use]
pub fn describe(path: &Path, metadata: &Metadata) -> String {
    let file_type = metadata.file_type();
    let flags = [
        (file_type.is_dir(), "DIRECTORY"),
        (file_type.is_symlink(), "JUNCTION"),
        (is_hidden(path, metadata), "HIDDEN"),
        (is_system(metadata), "SYSTEM"),
        (metadata.permissions().readonly(), "READONLY"),
    ];

    flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(" ")
}
