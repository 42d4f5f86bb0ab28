//! Stable file identity for hard link detection.
//!
//! # Overview
//!
//! Two directory entries are hard links to the same data exactly when they
//! share a file identity. Hard linked names are never reported as
//! duplicates: they already share their storage.
//!
//! # Platform Support
//!
//! - **Unix**: (device id, inode) from `fstat`
//! - **Windows**: (volume serial number, file index) from
//!   `GetFileInformationByHandle`
//! - **Other**: not available; callers treat the identity as unreadable
//!
//! # Example
//!
//! ```no_run
//! use dupelink::scanner::identity::FileIdentity;
//! use std::fs::File;
//!
//! let a = FileIdentity::from_file(&File::open("a.bin").unwrap()).unwrap();
//! let b = FileIdentity::from_file(&File::open("b.bin").unwrap()).unwrap();
//!
//! if a == b {
//!     println!("a.bin and b.bin are already hard linked");
//! }
//! ```

use std::fs::{File, Metadata};
use std::io;
use std::path::Path;

/// Identity of the data behind a directory entry.
///
/// On Unix this is (device id, inode); on Windows it is
/// (volume serial number, file index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileIdentity {
    device: u64,
    index: u64,
}

impl FileIdentity {
    /// Read the identity of an open file.
    ///
    /// # Errors
    ///
    /// Returns the underlying OS error if the file information cannot be
    /// queried, or `Unsupported` on platforms without a stable identity.
    #[cfg(unix)]
    pub fn from_file(file: &File) -> io::Result<Self> {
        use std::os::unix::fs::MetadataExt;

        let metadata = file.metadata()?;
        Ok(Self {
            device: metadata.dev(),
            index: metadata.ino(),
        })
    }

    #[cfg(windows)]
    pub fn from_file(file: &File) -> io::Result<Self> {
        use std::os::windows::io::AsRawHandle;
        use windows_sys::Win32::Storage::FileSystem::{
            GetFileInformationByHandle, BY_HANDLE_FILE_INFORMATION,
        };

        // SAFETY: BY_HANDLE_FILE_INFORMATION is plain old data; all-zero is valid.
        let mut info: BY_HANDLE_FILE_INFORMATION = unsafe { std::mem::zeroed() };
        // SAFETY: the handle is owned by `file` and stays open for the call.
        let ok = unsafe { GetFileInformationByHandle(file.as_raw_handle() as _, &mut info) };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(Self {
            device: u64::from(info.dwVolumeSerialNumber),
            index: (u64::from(info.nFileIndexHigh) << 32) | u64::from(info.nFileIndexLow),
        })
    }

    #[cfg(not(any(unix, windows)))]
    pub fn from_file(_file: &File) -> io::Result<Self> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "file identity is not available on this platform",
        ))
    }

    /// Open a path and read its identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or queried.
    pub fn of_path(path: &Path) -> io::Result<Self> {
        Self::from_file(&File::open(path)?)
    }

    /// Identity from already-fetched metadata, without opening the file.
    ///
    /// Returns `None` where metadata does not carry the identity (Windows
    /// needs an open handle, see [`from_file`](Self::from_file)).
    #[cfg(unix)]
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;

        Some(Self {
            device: metadata.dev(),
            index: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    #[must_use]
    pub fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }

    /// Check if identities can be read on this platform.
    #[must_use]
    pub const fn is_supported() -> bool {
        cfg!(any(unix, windows))
    }
}
