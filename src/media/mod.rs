//! Media item model
//!
//! `MediaFile` is the unit the picker surface hands back and the selection
//! list holds. Items are immutable once constructed; the only way to "change"
//! one is to build a new value.

mod types;

pub use types::{MediaFile, MediaId, MediaType};
