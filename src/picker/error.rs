//! Picker configuration errors

use thiserror::Error;

/// Errors detected when finalizing a picker configuration
///
/// All of these are raised by `ConfigurationBuilder::build`; individual
/// setters never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Single-choice mode with more than one pre-selected item
    #[error("single-choice mode allows at most one pre-selected item, got {0}")]
    MultiplePreselectedInSingleChoice(usize),

    /// Every media type is hidden, so nothing could be selected
    #[error("no selectable content: images, videos, audios and files are all hidden")]
    NoSelectableContent,

    /// Maximum selection must be positive
    #[error("maximum selection must be at least 1")]
    InvalidMaxSelection,

    /// An ignore-path entry is not a valid regular expression
    #[error("invalid ignore pattern '{pattern}': {reason}")]
    InvalidIgnorePattern { pattern: String, reason: String },
}

/// Result type for configuration building
pub type Result<T> = std::result::Result<T, ConfigurationError>;
