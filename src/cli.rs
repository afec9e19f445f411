//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for mediapick using the `clap` crate.
//!
//! # Commands
//!
//! - **interactive**: Menu loop over all workflows (default)
//! - **image / video / audio / browse**: Run one workflow and print the selection
//! - **share-log**: Export recent diagnostics
//! - **config**: Show the effective configuration or its file path
//!
//! # Examples
//!
//! ```
//! use mediapick::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["mediapick", "audio", "--format", "json"]);
//! assert!(matches!(cli.get_command(), Commands::Audio(_)));
//! ```

use crate::config::PathFormat;
use crate::output::OutputFormat;
use crate::permission::CapabilityTier;
use crate::workflow::Workflow;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Configuration inspection subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the path of the configuration file
    Path,
}

/// Options shared by the one-shot workflow commands
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickArgs {
    /// Output format for the final selection
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "mediapick")]
#[command(about = "Pick images, videos, audio and files from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this configuration file instead of the default one
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to pick from (overrides config)
    #[arg(long = "root", global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Permission model (overrides config)
    #[arg(long = "tier", global = true, value_enum)]
    pub tier: Option<CapabilityTier>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Display absolute paths (overrides config)
    #[arg(long = "absolute", global = true, conflicts_with = "relative")]
    pub absolute: bool,

    /// Display relative paths (overrides config)
    #[arg(long = "relative", global = true, conflicts_with = "absolute")]
    pub relative: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Menu loop over all workflows (default)
    #[command(visible_alias = "i")]
    Interactive,

    /// Pick up to 10 images
    Image(PickArgs),

    /// Pick up to 10 videos (asks for permission first)
    Video(PickArgs),

    /// Pick a single audio item
    Audio(PickArgs),

    /// Browse directories and pick files
    #[command(visible_alias = "b")]
    Browse(PickArgs),

    /// Export recent diagnostics and share them
    ShareLog {
        /// Copy the log to the clipboard instead of opening it
        #[arg(long)]
        clipboard: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Workflow a one-shot command runs, with its output options
    #[must_use]
    pub const fn workflow(&self) -> Option<(Workflow, PickArgs)> {
        match self {
            Self::Image(args) => Some((Workflow::Image, *args)),
            Self::Video(args) => Some((Workflow::Video, *args)),
            Self::Audio(args) => Some((Workflow::Audio, *args)),
            Self::Browse(args) => Some((Workflow::Generic, *args)),
            Self::Interactive | Self::ShareLog { .. } | Self::Config { .. } => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Interactive if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Interactive)
    }

    /// Helper method to get the path format override from global flags
    #[must_use]
    pub const fn get_path_format(&self) -> Option<PathFormat> {
        if self.absolute {
            Some(PathFormat::Absolute)
        } else if self.relative {
            Some(PathFormat::Relative)
        } else {
            None
        }
    }
}
