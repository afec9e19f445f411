//! Diagnostic export errors

use thiserror::Error;

/// Errors that can occur while sharing the exported log
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    /// The share target could not hand the file off
    #[error("share failed: {0}")]
    Share(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for diagnostic export
pub type Result<T> = std::result::Result<T, DiagnosticsError>;
