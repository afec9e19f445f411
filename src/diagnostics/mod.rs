//! Diagnostic log capture and export
//!
//! [`LogBuffer`] is a `tracing_subscriber` layer holding the most recent
//! records in memory. [`share_log`] writes that ring to a file in the cache
//! directory and hands it to a [`ShareTarget`] (system opener or clipboard).

mod buffer;
mod error;
mod share;

pub use buffer::{LogBuffer, LogRecord};
pub use error::{DiagnosticsError, Result};
pub use share::{
    ClipboardShare, OpenShare, SHARE_SUBJECT, ShareOutcome, ShareRequest, ShareTarget, report_outcome,
    share_log, share_log_reporting,
};
