//! Integration tests for mediapick
//!
//! These tests drive the selection controller through the public API, once
//! with recording doubles and once with the real console surface over a
//! temporary media tree and scripted answers.

use mediapick::media::{MediaFile, MediaType};
use mediapick::permission::{
    CapabilityTier, PermissionGate, PermissionRuntime, PermissionToken, required_permissions,
};
use mediapick::picker::{ConfigurationBuilder, ConfigurationError};
use mediapick::scan::MediaScanner;
use mediapick::surface::ConsoleSurface;
use mediapick::ui::input::{InputError, UserInput};
use mediapick::ui::{MessageLevel, StatusBarWriter};
use mediapick::workflow::{
    CorrelationToken, LaunchRequest, PickerOutcome, PickerSurface, Reconciliation,
    SelectionController, SelectionSet, StartOutcome, SurfaceError, SurfaceKind, Workflow,
    configuration_for,
};
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Surface that only records launch requests
#[derive(Default)]
struct RecordingSurface {
    requests: Vec<LaunchRequest>,
}

impl PickerSurface for RecordingSurface {
    fn launch(&mut self, request: &LaunchRequest) -> Result<(), SurfaceError> {
        self.requests.push(request.clone());
        Ok(())
    }
}

/// Permission runtime answering every request the same way
struct FixedPermissions {
    grant: bool,
    asked: usize,
}

impl FixedPermissions {
    fn new(grant: bool) -> Self {
        Self { grant, asked: 0 }
    }
}

impl PermissionRuntime for FixedPermissions {
    fn is_granted(&self, _token: PermissionToken) -> bool {
        false
    }

    fn request_permissions(&mut self, tokens: &[PermissionToken]) -> HashMap<PermissionToken, bool> {
        self.asked += 1;
        tokens.iter().map(|&t| (t, self.grant)).collect()
    }
}

/// Input that replays canned select / multi-select answers
#[derive(Default)]
struct CannedInput {
    selects: Mutex<VecDeque<Option<usize>>>,
    multi: Mutex<VecDeque<Option<Vec<usize>>>>,
}

impl CannedInput {
    fn multi(answers: Vec<Option<Vec<usize>>>) -> Self {
        Self {
            multi: Mutex::new(answers.into()),
            ..Self::default()
        }
    }

    fn select(answers: Vec<Option<usize>>) -> Self {
        Self {
            selects: Mutex::new(answers.into()),
            ..Self::default()
        }
    }
}

impl UserInput for CannedInput {
    fn prompt_confirm(&self, _prompt: &str, default: bool) -> Result<Option<bool>, InputError> {
        Ok(Some(default))
    }

    fn prompt_select(
        &self,
        prompt: &str,
        _items: &[String],
        _default: Option<usize>,
    ) -> Result<Option<usize>, InputError> {
        self.selects
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| InputError::Invalid(format!("unexpected prompt '{prompt}'")))
    }

    fn prompt_multi_select(
        &self,
        prompt: &str,
        _items: &[String],
        _checked: &[bool],
    ) -> Result<Option<Vec<usize>>, InputError> {
        self.multi
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| InputError::Invalid(format!("unexpected prompt '{prompt}'")))
    }
}

fn image(id: &str) -> MediaFile {
    MediaFile::new(id, format!("/storage/{id}.jpg"), MediaType::Image, 1024)
}

fn audio(id: &str) -> MediaFile {
    MediaFile::new(id, format!("/storage/{id}.ogg"), MediaType::Audio, 1024)
}

fn recording_controller(
    grant: bool,
) -> (SelectionController<RecordingSurface, FixedPermissions>, StatusBarWriter) {
    let notices = StatusBarWriter::new();
    let controller = SelectionController::new(
        RecordingSurface::default(),
        PermissionGate::new(CapabilityTier::Scoped, FixedPermissions::new(grant)),
        notices.clone(),
    );
    (controller, notices)
}

fn token_of(outcome: StartOutcome) -> CorrelationToken {
    match outcome {
        StartOutcome::Launched(token) => token,
        StartOutcome::PermissionDenied => panic!("expected a launch"),
    }
}

#[test]
fn test_image_then_denied_video_keeps_images() {
    let (mut controller, notices) = recording_controller(false);

    let token = token_of(controller.start(Workflow::Image).unwrap());
    controller.on_result(token, PickerOutcome::Selected(vec![image("imgA"), image("imgB")]));
    assert_eq!(controller.current_selection().len(), 2);

    assert_eq!(
        controller.start(Workflow::Video).unwrap(),
        StartOutcome::PermissionDenied
    );
    assert_eq!(controller.surface().requests.len(), 1);
    assert_eq!(controller.gate().runtime().asked, 1);
    assert_eq!(controller.current_selection().as_slice(), [image("imgA"), image("imgB")]);
    assert_eq!(
        notices.latest_message(),
        Some((MessageLevel::Warning, "Permission Denied".to_string()))
    );
}

#[test]
fn test_audio_preselects_last_audio_of_mixed_selection() {
    let (mut controller, _) = recording_controller(true);

    let token = token_of(controller.start(Workflow::Generic).unwrap());
    controller.on_result(
        token,
        PickerOutcome::Selected(vec![audio("aud1"), image("img"), audio("aud2")]),
    );
    token_of(controller.start(Workflow::Audio).unwrap());

    let request = controller.surface().requests.last().unwrap();
    assert_eq!(request.surface, SurfaceKind::MediaPicker);
    assert_eq!(request.configuration.pre_selected(), [audio("aud2")]);
    assert_eq!(request.configuration.title(), Some("Select an audio"));
}

#[test]
fn test_unknown_and_cancelled_results() {
    let (mut controller, notices) = recording_controller(true);
    let token = token_of(controller.start(Workflow::Generic).unwrap());

    assert_eq!(
        controller.on_result(CorrelationToken::new(9999), PickerOutcome::Cancelled),
        Reconciliation::Ignored
    );
    assert_eq!(notices.message_count(), 0);

    assert_eq!(
        controller.on_result(token, PickerOutcome::Cancelled),
        Reconciliation::Unchanged
    );
    assert_eq!(
        notices.latest_message(),
        Some((MessageLevel::Warning, "File not selected".to_string()))
    );
    assert!(controller.current_selection().is_empty());
}

#[test]
fn test_workflow_policies() {
    let empty = SelectionSet::new();

    let image = configuration_for(Workflow::Image, &empty).unwrap();
    assert!(image.check_permission());
    assert!(image.enable_image_capture());
    assert!(image.skip_zero_size_files());
    assert_eq!(image.shown_media_types(), [MediaType::Image]);
    assert_eq!(image.max_selection(), Some(10));

    let video = configuration_for(Workflow::Video, &empty).unwrap();
    assert!(!video.check_permission());
    assert!(video.enable_video_capture());
    assert_eq!(video.shown_media_types(), [MediaType::Video]);
    assert_eq!(video.ignore_paths(), [".*WhatsApp.*"]);

    let audio = configuration_for(Workflow::Audio, &empty).unwrap();
    assert!(audio.is_single_choice());
    assert!(!audio.ignore_hidden_files());
    assert!(!audio.ignore_no_media());
    assert!(audio.pre_selected().is_empty());

    let generic = configuration_for(Workflow::Generic, &empty).unwrap();
    assert!(generic.enable_image_capture() && generic.enable_video_capture());
    assert_eq!(generic.shown_media_types().len(), 4);
    assert_eq!(generic.title(), Some("Select a file"));
}

#[test]
fn test_required_permissions_by_tier() {
    for workflow in Workflow::ALL {
        assert_eq!(
            required_permissions(CapabilityTier::Legacy, workflow),
            [PermissionToken::ReadExternalStorage]
        );
    }
    assert_eq!(
        required_permissions(CapabilityTier::Scoped, Workflow::Video),
        [PermissionToken::ReadMediaVideo]
    );
}

#[test]
fn test_builder_rejects_inconsistent_options() {
    let err = ConfigurationBuilder::new()
        .single_choice_mode(true)
        .selected_media_files(vec![audio("a"), audio("b")])
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigurationError::MultiplePreselectedInSingleChoice(2));
}

#[test]
fn test_console_surface_round_trip() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("beach.jpg"), b"jpeg").unwrap();
    fs::write(dir.path().join("sunset.png"), b"png").unwrap();
    fs::write(dir.path().join("empty.jpg"), b"").unwrap();

    let input = Arc::new(CannedInput::multi(vec![Some(vec![0, 1])]));
    let (tx, rx) = mpsc::channel();
    let surface = ConsoleSurface::new(MediaScanner::new(dir.path()), Arc::clone(&input), tx)
        .with_gate(PermissionGate::new(CapabilityTier::Scoped, FixedPermissions::new(true)))
        .with_notices(StatusBarWriter::new());
    let mut controller = SelectionController::new(
        surface,
        PermissionGate::new(CapabilityTier::Scoped, FixedPermissions::new(true)),
        StatusBarWriter::new(),
    );

    token_of(controller.start(Workflow::Image).unwrap());
    let result = rx.try_recv().unwrap();
    assert_eq!(controller.deliver(result), Reconciliation::Replaced);

    let names: Vec<String> = controller.current_selection().iter().map(MediaFile::name).collect();
    assert_eq!(names, ["beach.jpg", "sunset.png"]);
    assert_eq!(controller.dispatcher().outstanding_count(), 0);
}

#[test]
fn test_console_surface_cancel_keeps_selection() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("track.mp3"), b"audio").unwrap();

    let input = Arc::new(CannedInput::select(vec![Some(0), None]));
    let (tx, rx) = mpsc::channel();
    let surface: ConsoleSurface<CannedInput, FixedPermissions> =
        ConsoleSurface::new(MediaScanner::new(dir.path()), Arc::clone(&input), tx);
    let notices = StatusBarWriter::new();
    let mut controller = SelectionController::new(
        surface,
        PermissionGate::new(CapabilityTier::Legacy, FixedPermissions::new(true)),
        notices.clone(),
    );

    token_of(controller.start(Workflow::Audio).unwrap());
    controller.deliver(rx.try_recv().unwrap());
    token_of(controller.start(Workflow::Audio).unwrap());
    assert_eq!(controller.deliver(rx.try_recv().unwrap()), Reconciliation::Unchanged);

    assert_eq!(controller.current_selection().len(), 1);
    assert_eq!(
        notices.latest_message(),
        Some((MessageLevel::Warning, "Audio not selected".to_string()))
    );
}
