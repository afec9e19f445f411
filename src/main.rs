//! Mediapick CLI application entry point
//!
//! This is the main executable for the mediapick selection host. It wires the
//! selection controller to a terminal picker surface and a console permission
//! prompt.
//!
//! # Features
//!
//! - **Interactive Mode**: Menu loop that keeps one selection across workflows
//! - **One-shot Workflows**: Pick images, videos, one audio item or files, then print them
//! - **Diagnostics**: Recent warnings are kept in memory and can be shared
//! - **Quiet Mode**: Suppress informational output for scripting
//!
//! # Usage
//!
//! ```bash
//! # Menu loop (default command)
//! mediapick
//! mediapick interactive
//!
//! # Pick images under a directory and print them as JSON
//! mediapick --root ~/Pictures image --format json
//!
//! # Pick one audio item, legacy permission model
//! mediapick --tier legacy audio
//!
//! # Share recent diagnostics via the clipboard
//! mediapick share-log --clipboard
//! ```
//!
//! # Configuration
//!
//! On first run, a default configuration is written to the user's config
//! directory (`~/.config/mediapick/config.toml` on Linux).

use mediapick::{
    MediaPickError,
    cli::{Cli, Commands, ConfigCommands, PickArgs},
    config::{AppConfig, PathFormat},
    diagnostics::{
        ClipboardShare, LogBuffer, OpenShare, ShareTarget, report_outcome, share_log, share_log_reporting,
    },
    output::{self, OutputFormat},
    permission::{CapabilityTier, PermissionGate},
    scan::MediaScanner,
    surface::ConsoleSurface,
    ui::{ConsolePermissions, DialoguerInput, OutputWriter, StdoutWriter, UserInput},
    workflow::{PickerResult, SelectionController, SelectionSet, StartOutcome, Workflow},
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use tracing::{debug, error, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

type Result<T> = std::result::Result<T, MediaPickError>;

type Permissions = ConsolePermissions<DialoguerInput>;
type Controller = SelectionController<ConsoleSurface<DialoguerInput, Permissions>, Permissions>;

/// Effective settings after applying command-line overrides to the config
struct Settings {
    root: PathBuf,
    tier: CapabilityTier,
    quiet: bool,
    path_format: PathFormat,
}

impl Settings {
    fn resolve(cli: &Cli, config: &AppConfig) -> Self {
        Self {
            root: cli.root.clone().unwrap_or_else(|| config.picker_root()),
            tier: cli.tier.unwrap_or(config.capability_tier),
            quiet: cli.quiet || config.quiet,
            path_format: cli.get_path_format().unwrap_or(config.path_format),
        }
    }

    const fn notices(&self) -> StdoutWriter {
        if self.quiet {
            StdoutWriter::quiet()
        } else {
            StdoutWriter::new()
        }
    }
}

/// Install the stderr formatter and the in-memory diagnostics ring
fn init_logging(config: &AppConfig) -> LogBuffer {
    let buffer = LogBuffer::new(
        config.diagnostics.capacity,
        config.diagnostics.verbose_targets.clone(),
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(filter),
        )
        .with(buffer.clone())
        .init();

    buffer
}

/// Controller wired to the terminal, plus the channel its picker results arrive on
fn build_controller(settings: &Settings, input: &Arc<DialoguerInput>) -> (Controller, Receiver<PickerResult>) {
    let permissions = ConsolePermissions::shared(Arc::clone(input));
    let (results, receiver) = mpsc::channel();

    let surface = ConsoleSurface::new(MediaScanner::new(&settings.root), Arc::clone(input), results)
        .with_gate(PermissionGate::new(settings.tier, permissions.clone()))
        .with_notices(settings.notices());

    let controller = SelectionController::new(
        surface,
        PermissionGate::new(settings.tier, permissions),
        settings.notices(),
    );
    (controller, receiver)
}

/// Start a workflow and reconcile whatever the surface delivered
///
/// # Errors
/// Returns `MediaPickError::Workflow` if the workflow could not be started.
fn run_workflow(controller: &mut Controller, results: &Receiver<PickerResult>, workflow: Workflow) -> Result<()> {
    match controller.start(workflow)? {
        StartOutcome::Launched(token) => debug!(%workflow, %token, "picker finished"),
        StartOutcome::PermissionDenied => debug!(%workflow, "workflow denied"),
    }

    for result in results.try_iter() {
        controller.deliver(result);
    }
    Ok(())
}

fn print_selection(selection: &SelectionSet, format: OutputFormat, settings: &Settings) -> Result<()> {
    let mut stdout = io::stdout().lock();
    output::write_selection(&mut stdout, selection.as_slice(), format, settings.path_format, settings.quiet)?;
    Ok(())
}

fn handle_pick_command(settings: &Settings, workflow: Workflow, args: PickArgs) -> Result<()> {
    let input = Arc::new(DialoguerInput::new());
    let (mut controller, results) = build_controller(settings, &input);

    run_workflow(&mut controller, &results, workflow)?;
    print_selection(controller.current_selection(), args.format, settings)
}

fn handle_interactive_command(settings: &Settings, config: &AppConfig, buffer: &LogBuffer) -> Result<()> {
    const MENU: [&str; 6] = [
        "Pick images",
        "Pick videos",
        "Pick audio",
        "Browse files",
        "Share log",
        "Quit",
    ];

    let input = Arc::new(DialoguerInput::new());
    let (mut controller, results) = build_controller(settings, &input);

    let path_format = settings.path_format;
    controller.set_observer(move |selection: &SelectionSet| {
        let mut stdout = io::stdout().lock();
        if let Err(e) = output::write_selection(&mut stdout, selection.as_slice(), OutputFormat::Text, path_format, false) {
            warn!(error = %e, "failed to print selection");
        }
    });

    let items: Vec<String> = MENU.iter().map(ToString::to_string).collect();
    loop {
        let workflow = match input.prompt_select("mediapick", &items, Some(0))? {
            Some(0) => Workflow::Image,
            Some(1) => Workflow::Video,
            Some(2) => Workflow::Audio,
            Some(3) => Workflow::Generic,
            Some(4) => {
                share_from_menu(config, buffer, &settings.notices());
                continue;
            }
            _ => break,
        };

        // The controller has already reported the failure to the user
        match run_workflow(&mut controller, &results, workflow) {
            Ok(()) => {}
            Err(MediaPickError::Workflow(e)) => debug!(%workflow, error = %e, "workflow failed"),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

fn share_target(clipboard: bool) -> Box<dyn ShareTarget> {
    if clipboard {
        Box::new(ClipboardShare)
    } else {
        Box::new(OpenShare)
    }
}

/// Export the log without ending the menu loop on failure
fn share_from_menu(config: &AppConfig, buffer: &LogBuffer, notices: &dyn OutputWriter) {
    let cache_dir = match AppConfig::cache_dir() {
        Ok(dir) => dir,
        Err(e) => {
            error!(error = %e, "no cache directory for the log export");
            notices.error(&e.to_string());
            return;
        }
    };

    let mut target = share_target(false);
    share_log_reporting(buffer, &cache_dir, &config.diagnostics.file_name, target.as_mut(), notices);
}

fn handle_share_log_command(
    config: &AppConfig,
    buffer: &LogBuffer,
    clipboard: bool,
    notices: &dyn OutputWriter,
) -> Result<()> {
    let cache_dir = AppConfig::cache_dir()?;
    let mut target = share_target(clipboard);

    let outcome = share_log(buffer, &cache_dir, &config.diagnostics.file_name, target.as_mut())?;
    report_outcome(&outcome, target.as_ref(), notices);
    Ok(())
}

fn handle_config_command(cli: &Cli, config: &AppConfig, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => print!("{}", config.to_toml()?),
        ConfigCommands::Path => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => AppConfig::config_path()?,
            };
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let buffer = init_logging(&config);
    let settings = Settings::resolve(&cli, &config);
    let command = cli.get_command();

    if let Some((workflow, args)) = command.workflow() {
        return handle_pick_command(&settings, workflow, args);
    }

    match command {
        Commands::Interactive => handle_interactive_command(&settings, &config, &buffer),
        Commands::ShareLog { clipboard } => {
            handle_share_log_command(&config, &buffer, clipboard, &settings.notices())
        }
        Commands::Config { command } => handle_config_command(&cli, &config, command),
        Commands::Image(_) | Commands::Video(_) | Commands::Audio(_) | Commands::Browse(_) => {
            unreachable!()
        }
    }
}
