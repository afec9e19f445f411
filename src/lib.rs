//! Mediapick - a media and file selection host
//!
//! This library builds picker configurations for four fixed workflows
//! (images, videos, a single audio item, generic files), gates the video
//! workflow behind a permission request, launches a picker surface under a
//! correlation token, and reconciles the result into one authoritative
//! selection.
//!
//! The core ([`picker`], [`permission`], [`workflow`]) is independent of the
//! terminal; [`surface`], [`scan`] and [`ui`] provide the console
//! collaborators the `mediapick` binary plugs in.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod media;
pub mod output;
pub mod permission;
pub mod picker;
pub mod scan;
pub mod surface;
pub mod ui;
pub mod workflow;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum MediaPickError {
    /// A workflow could not be started
    #[error("Workflow error: {0}")]
    Workflow(#[from] workflow::WorkflowError),
    /// Enumerating the picker root failed
    #[error("Scan error: {0}")]
    Scan(#[from] scan::ScanError),
    /// Exporting diagnostics failed
    #[error("Diagnostics error: {0}")]
    Diagnostics(#[from] diagnostics::DiagnosticsError),
    /// A prompt failed
    #[error("Input error: {0}")]
    Input(#[from] ui::InputError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
