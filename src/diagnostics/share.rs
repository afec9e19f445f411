use super::LogBuffer;
use super::error::{DiagnosticsError, Result};
use crate::ui::OutputWriter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Subject and body text attached to a shared log
pub const SHARE_SUBJECT: &str = "mediapick log file";

/// A file handed to a share target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub path: PathBuf,
    pub mime: &'static str,
    pub subject: String,
    pub text: String,
}

/// How an export ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The file was written and handed to the share target
    Shared(PathBuf),
    /// No log file could be produced
    NothingToShare,
}

/// Destination for an exported log
pub trait ShareTarget {
    /// Hand the file off
    ///
    /// # Errors
    ///
    /// Returns `DiagnosticsError` if the target rejects the request.
    fn share(&mut self, request: &ShareRequest) -> Result<()>;

    /// Notice shown once the file was handed off
    fn shared_notice(&self, path: &Path) -> String {
        format!("Log written to {}", path.display())
    }
}

/// Opens the exported file with the system's default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenShare;

impl ShareTarget for OpenShare {
    fn share(&mut self, request: &ShareRequest) -> Result<()> {
        open::that(&request.path).map_err(|e| DiagnosticsError::Share(e.to_string()))
    }
}

/// Copies the exported log to the clipboard
///
/// The clipboard text is the file path followed by the file contents.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClipboardShare;

impl ShareTarget for ClipboardShare {
    fn share(&mut self, request: &ShareRequest) -> Result<()> {
        let contents = fs::read_to_string(&request.path)?;
        let text = format!("{}\n\n{}", request.path.display(), contents);

        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| DiagnosticsError::Share(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| DiagnosticsError::Share(e.to_string()))
    }

    fn shared_notice(&self, path: &Path) -> String {
        format!("Log copied to clipboard ({})", path.display())
    }
}

/// Export the log ring and hand the file to a share target
///
/// Any previous export at the same path is replaced. A failed write is
/// logged and treated as nothing to share.
///
/// # Errors
///
/// Returns `DiagnosticsError` only if the share target fails.
pub fn share_log(
    buffer: &LogBuffer,
    cache_dir: &Path,
    file_name: &str,
    sharer: &mut dyn ShareTarget,
) -> Result<ShareOutcome> {
    let path = cache_dir.join(file_name);

    if let Err(e) = write_snapshot(buffer, &path) {
        error!(path = %path.display(), error = %e, "failed to write log file");
    }

    if !path.exists() {
        return Ok(ShareOutcome::NothingToShare);
    }

    let request = ShareRequest {
        path: path.clone(),
        mime: "text/plain",
        subject: SHARE_SUBJECT.to_string(),
        text: SHARE_SUBJECT.to_string(),
    };
    sharer.share(&request)?;
    debug!(path = %path.display(), "log shared");

    Ok(ShareOutcome::Shared(path))
}

/// Show how an export ended
pub fn report_outcome(outcome: &ShareOutcome, sharer: &dyn ShareTarget, notices: &dyn OutputWriter) {
    match outcome {
        ShareOutcome::Shared(path) => notices.success(&sharer.shared_notice(path)),
        ShareOutcome::NothingToShare => notices.warning("No log file to share"),
    }
}

/// Export the log and report the result as a notice
///
/// A failed export is logged and shown, never returned, so an ongoing
/// session carries on with its selection intact.
pub fn share_log_reporting(
    buffer: &LogBuffer,
    cache_dir: &Path,
    file_name: &str,
    sharer: &mut dyn ShareTarget,
    notices: &dyn OutputWriter,
) -> Option<ShareOutcome> {
    match share_log(buffer, cache_dir, file_name, sharer) {
        Ok(outcome) => {
            report_outcome(&outcome, sharer, notices);
            Some(outcome)
        }
        Err(e) => {
            error!(error = %e, "failed to share log");
            notices.error(&format!("Could not share log: {e}"));
            None
        }
    }
}

fn write_snapshot(buffer: &LogBuffer, path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, buffer.snapshot())
}
