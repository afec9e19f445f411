//! Enumeration errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while enumerating storage
#[derive(Debug, Error)]
pub enum ScanError {
    /// The picker root does not exist or is not a directory
    #[error("picker root not found: {0}")]
    RootNotFound(PathBuf),

    /// A directory outside the picker root was requested
    #[error("{0} is outside the picker root")]
    OutsideRoot(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for enumeration
pub type Result<T> = std::result::Result<T, ScanError>;
