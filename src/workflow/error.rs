//! Workflow error types

use super::Workflow;
use crate::picker::ConfigurationError;
use crate::scan::ScanError;
use crate::ui::InputError;
use thiserror::Error;

/// Errors from the launch dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The workflow already has a picker invocation in flight
    #[error("a {0} picker is already open")]
    AlreadyOutstanding(Workflow),
}

/// Errors raised by a picker surface while starting
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("picker surface unavailable: {0}")]
    Unavailable(String),

    #[error("enumeration failed: {0}")]
    Scan(#[from] ScanError),

    #[error("input failed: {0}")]
    Input(#[from] InputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a workflow before anything is launched
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Result type for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;
