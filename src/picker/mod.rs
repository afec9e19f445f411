//! Picker invocation configuration
//!
//! A [`Configuration`] describes exactly one invocation of the picker
//! surface: which media types are visible, whether capture is offered, how
//! many items may be chosen, which paths the enumerator should skip, and
//! what the picker starts out with selected.
//!
//! Configurations are immutable. They are produced by
//! [`ConfigurationBuilder`], which accepts any subset of options in any
//! order and validates them together in [`ConfigurationBuilder::build`].
//!
//! ```
//! use mediapick::picker::ConfigurationBuilder;
//!
//! let config = ConfigurationBuilder::new()
//!     .show_videos(false)
//!     .enable_image_capture(true)
//!     .max_selection(10)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.show_images());
//! assert!(!config.show_videos());
//! assert_eq!(config.max_selection(), Some(10));
//! ```

mod config;
mod error;

pub use config::{Configuration, ConfigurationBuilder};
pub use error::{ConfigurationError, Result};
