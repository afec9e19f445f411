//! Output formatting for CLI display
//!
//! Renders media items and whole selections as colored text, JSON, or CSV.

use crate::config::PathFormat;
use crate::media::{MediaFile, MediaType};
use byte_unit::{Byte, UnitType};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io;
use std::path::Path;

/// Output format for a printed selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable list
    #[default]
    Text,
    /// JSON array of items
    Json,
    /// CSV with a header row
    Csv,
}

/// Format a path according to the display mode
#[must_use]
pub fn format_path(path: &Path, format: PathFormat) -> String {
    match format {
        PathFormat::Absolute => path.display().to_string(),
        PathFormat::Relative => {
            if let Ok(cwd) = std::env::current_dir()
                && let Ok(rel_path) = path.strip_prefix(&cwd)
            {
                return rel_path.display().to_string();
            }
            // Fallback to absolute if relative path cannot be computed
            path.display().to_string()
        }
    }
}

/// Human-readable size, binary units
#[must_use]
pub fn format_size(bytes: u64) -> String {
    Byte::from_u64(bytes)
        .get_appropriate_unit(UnitType::Binary)
        .to_string()
}

/// Short label for a picker list entry
#[must_use]
pub fn picker_label(file: &MediaFile) -> String {
    format!("{} ({})", file.name(), format_size(file.size()))
}

fn colorize_type(media_type: MediaType) -> String {
    let label = format!("{media_type:<5}");
    match media_type {
        MediaType::Image => label.green().to_string(),
        MediaType::Video => label.magenta().to_string(),
        MediaType::Audio => label.cyan().to_string(),
        MediaType::File => label.dimmed().to_string(),
    }
}

/// One line of the text listing
#[must_use]
pub fn media_line(file: &MediaFile, format: PathFormat, quiet: bool) -> String {
    let path = format_path(file.path(), format);
    if quiet {
        return path;
    }

    let mut line = format!(
        "  {} {}  {}",
        colorize_type(file.media_type()),
        path,
        format_size(file.size()).dimmed()
    );
    if let Some(duration) = file.duration() {
        line.push_str(&format!("  {}", format!("{}s", duration.as_secs()).dimmed()));
    }
    line
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    path: String,
    media_type: &'static str,
    size: u64,
    duration_secs: Option<f64>,
}

/// Write a selection in the requested format
///
/// # Errors
///
/// Returns an I/O error if writing fails or JSON/CSV encoding fails.
pub fn write_selection<W: io::Write>(
    out: &mut W,
    items: &[MediaFile],
    format: OutputFormat,
    path_format: PathFormat,
    quiet: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            if items.is_empty() {
                if !quiet {
                    writeln!(out, "{}", "No files selected".dimmed())?;
                }
                return Ok(());
            }
            if !quiet {
                writeln!(out, "Selected ({}):", items.len())?;
            }
            for file in items {
                writeln!(out, "{}", media_line(file, path_format, quiet))?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, items).map_err(io::Error::other)?;
            writeln!(out)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for file in items {
                writer
                    .serialize(CsvRow {
                        id: file.id().as_str(),
                        path: format_path(file.path(), path_format),
                        media_type: file.media_type().as_str(),
                        size: file.size(),
                        duration_secs: file.duration().map(|d| d.as_secs_f64()),
                    })
                    .map_err(io::Error::other)?;
            }
            writer.flush()
        }
    }
}
