use std::os::raw::c_int;

use thiserror::Error;

use crate::consts::InodePointer;

type ErrorNum = c_int;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No superblock within the scan bound, or a name missing from the root directory.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("inode {inode} out of range (table holds {count} inodes)")]
    OutOfRange { inode: InodePointer, count: u32 },

    /// A nonzero-size inode whose first block pointer is the sentinel.
    #[error("inconsistent inode: {0}")]
    Inconsistent(String),

    /// The block graph ran out before the requested length was reached.
    #[error("truncated block chain: expected {expected} bytes, found {got}")]
    Truncated { expected: u64, got: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    /// A directory entry whose name cannot be used as a host file name.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    /// Malformed command line: the reason, then the usage string.
    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub fn to_errno(&self) -> ErrorNum {
        match self {
            Error::NotFound(_) => libc::ENOENT,
            Error::OutOfRange { .. } => libc::EINVAL,
            Error::Inconsistent(_) => libc::EIO,
            Error::Truncated { .. } => libc::EIO,
            Error::Io(e) => e.raw_os_error().unwrap_or(libc::EIO),
            Error::Config(_) => libc::EINVAL,
            Error::InvalidName(_) => libc::EINVAL,
            Error::Usage(_) => libc::EINVAL,
        }
    }
}
