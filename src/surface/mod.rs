//! Terminal picker surface
//!
//! [`ConsoleSurface`] runs a picker invocation in the terminal: it enumerates
//! the root with [`MediaScanner`], prompts through [`UserInput`], and sends the
//! outcome back over a channel as a [`PickerResult`] carrying the request's
//! token.
//!
//! - `MediaPicker` requests show a flat list of matching media. Single-choice
//!   configurations get a select prompt, others a multi-select with the
//!   pre-selection checked.
//! - `DirectoryBrowser` requests walk directories first, then offer the
//!   current directory's entries for multi-select.
//!
//! Dismissing any prompt delivers `Cancelled`.

use crate::media::{MediaFile, MediaType};
use crate::output::picker_label;
use crate::permission::{PermissionGate, PermissionRuntime};
use crate::picker::Configuration;
use crate::scan::{DirListing, MediaScanner};
use crate::ui::{InputError, OutputWriter, StdoutWriter, UserInput};
use crate::workflow::policy::{AUDIO_TITLE, GENERIC_TITLE};
use crate::workflow::{
    LaunchRequest, PickerOutcome, PickerResult, PickerSurface, SurfaceError, SurfaceKind, Workflow,
};
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};

type Result<T> = std::result::Result<T, SurfaceError>;

/// First entry of every directory prompt
pub const SELECT_HERE: &str = "[select from this folder]";
/// Entry that moves to the parent directory
pub const PARENT_DIR: &str = "..";

/// Picker surface backed by terminal prompts
pub struct ConsoleSurface<I, P> {
    scanner: MediaScanner,
    input: Arc<I>,
    gate: Option<PermissionGate<P>>,
    results: Sender<PickerResult>,
    notices: Box<dyn OutputWriter>,
}

impl<I, P> ConsoleSurface<I, P>
where
    I: UserInput,
    P: PermissionRuntime,
{
    pub fn new(scanner: MediaScanner, input: Arc<I>, results: Sender<PickerResult>) -> Self {
        Self {
            scanner,
            input,
            gate: None,
            results,
            notices: Box::new(StdoutWriter::new()),
        }
    }

    /// Gate used when a configuration asks the picker to check permissions itself
    #[must_use]
    pub fn with_gate(mut self, gate: PermissionGate<P>) -> Self {
        self.gate = Some(gate);
        self
    }

    #[must_use]
    pub fn with_notices(mut self, notices: impl OutputWriter + 'static) -> Self {
        self.notices = Box::new(notices);
        self
    }

    #[must_use]
    pub const fn scanner(&self) -> &MediaScanner {
        &self.scanner
    }

    #[must_use]
    pub const fn gate(&self) -> Option<&PermissionGate<P>> {
        self.gate.as_ref()
    }

    fn run(&mut self, request: &LaunchRequest) -> Result<PickerOutcome> {
        let config = &request.configuration;

        if config.check_permission()
            && let Some(gate) = self.gate.as_mut()
            && !gate.authorize(request.workflow).is_granted()
        {
            info!(target: "mediapick::surface", token = %request.token, "picker permission check failed");
            return Ok(PickerOutcome::Cancelled);
        }

        if config.enable_image_capture() || config.enable_video_capture() {
            debug!(target: "mediapick::surface", "capture is not available in the terminal");
        }

        let title = config.title().unwrap_or_else(|| default_title(request.workflow));
        match request.surface {
            SurfaceKind::MediaPicker => self.pick_media(title, config),
            SurfaceKind::DirectoryBrowser => self.browse(title, config),
        }
    }

    fn pick_media(&self, title: &str, config: &Configuration) -> Result<PickerOutcome> {
        let candidates = self.scanner.scan(config)?;
        debug!(target: "mediapick::surface", count = candidates.len(), "candidates found");

        if candidates.is_empty() {
            self.notices.info("No matching media found");
            return Ok(PickerOutcome::Cancelled);
        }

        if config.is_single_choice() {
            let labels: Vec<String> = candidates.iter().map(picker_label).collect();
            let default = candidates
                .iter()
                .position(|c| is_pre_selected(c, config));
            return match self.input.prompt_select(title, &labels, default)? {
                Some(index) => Ok(PickerOutcome::Selected(vec![pick(&candidates, index)?])),
                None => Ok(PickerOutcome::Cancelled),
            };
        }

        self.multi_select(title, &candidates, config)
    }

    fn browse(&self, title: &str, config: &Configuration) -> Result<PickerOutcome> {
        let root = self.scanner.root().to_path_buf();
        let mut current = root.clone();

        loop {
            let listing = self.scanner.list_dir(&current, config)?;
            let at_root = current == root;

            let mut items = vec![SELECT_HERE.to_string()];
            if !at_root {
                items.push(PARENT_DIR.to_string());
            }
            items.extend(listing.dirs.iter().map(|d| format!("{}/", file_name(d))));

            let prompt = format!("{title} [{}]", display_relative(&current, &root));
            let Some(index) = self.input.prompt_select(&prompt, &items, Some(0))? else {
                return Ok(PickerOutcome::Cancelled);
            };

            let first_dir = if at_root { 1 } else { 2 };
            match index {
                0 => {
                    let entries = entries(&listing);
                    if entries.is_empty() {
                        self.notices.info("Nothing to select here");
                        continue;
                    }
                    return self.multi_select(title, &entries, config);
                }
                1 if !at_root => {
                    if let Some(parent) = current.parent() {
                        current = parent.to_path_buf();
                    }
                }
                i => {
                    current = listing
                        .dirs
                        .get(i - first_dir)
                        .cloned()
                        .ok_or_else(|| InputError::Invalid(format!("no entry at index {i}")))?;
                }
            }
        }
    }

    /// Multi-select over `candidates`, re-prompting while over the maximum
    fn multi_select(
        &self,
        title: &str,
        candidates: &[MediaFile],
        config: &Configuration,
    ) -> Result<PickerOutcome> {
        let labels: Vec<String> = candidates
            .iter()
            .map(|c| match c.media_type() {
                MediaType::File if c.path().is_dir() => format!("{}/", c.name()),
                _ => picker_label(c),
            })
            .collect();
        let mut checked: Vec<bool> = candidates.iter().map(|c| is_pre_selected(c, config)).collect();

        loop {
            let Some(indices) = self.input.prompt_multi_select(title, &labels, &checked)? else {
                return Ok(PickerOutcome::Cancelled);
            };

            if let Some(max) = config.max_selection()
                && indices.len() > max
            {
                warn!(target: "mediapick::surface", chosen = indices.len(), max, "too many items chosen");
                self.notices.warning(&format!("Select at most {max} items"));
                checked = (0..candidates.len()).map(|i| indices.contains(&i)).collect();
                continue;
            }

            let chosen = indices
                .into_iter()
                .map(|i| pick(candidates, i))
                .collect::<Result<Vec<_>>>()?;
            return Ok(PickerOutcome::Selected(chosen));
        }
    }
}

impl<I, P> PickerSurface for ConsoleSurface<I, P>
where
    I: UserInput,
    P: PermissionRuntime,
{
    fn launch(&mut self, request: &LaunchRequest) -> Result<()> {
        debug!(
            target: "mediapick::surface",
            token = %request.token,
            workflow = %request.workflow,
            "picker launched"
        );
        let outcome = self.run(request)?;
        self.results
            .send(PickerResult::new(request.token, outcome))
            .map_err(|_| SurfaceError::Unavailable("result channel closed".to_string()))
    }
}

fn default_title(workflow: Workflow) -> &'static str {
    match workflow {
        Workflow::Image => "Select images",
        Workflow::Video => "Select videos",
        Workflow::Audio => AUDIO_TITLE,
        Workflow::Generic => GENERIC_TITLE,
    }
}

fn is_pre_selected(file: &MediaFile, config: &Configuration) -> bool {
    config.pre_selected().iter().any(|p| p.id() == file.id())
}

fn pick(candidates: &[MediaFile], index: usize) -> Result<MediaFile> {
    candidates
        .get(index)
        .cloned()
        .ok_or_else(|| InputError::Invalid(format!("no entry at index {index}")).into())
}

/// Directories then files of a listing, as selectable items
fn entries(listing: &DirListing) -> Vec<MediaFile> {
    listing
        .dirs
        .iter()
        .map(|d| MediaFile::from_path(d.clone(), MediaType::File, 0))
        .chain(listing.files.iter().cloned())
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn display_relative(dir: &Path, root: &Path) -> String {
    match dir.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => "/".to_string(),
        Ok(rel) => format!("/{}", rel.display()),
        Err(_) => dir.display().to_string(),
    }
}
