//! Selection workflows
//!
//! A workflow is one user-triggered round trip: build a configuration,
//! optionally pass the permission gate, launch the picker surface under a
//! correlation token, and reconcile whatever comes back into the selection.
//!
//! # Architecture
//!
//! - **`policy`**: fixed per-workflow configuration (`configuration_for`)
//! - **`dispatcher`**: correlation tokens and the outstanding-launch table
//! - **`selection`**: the authoritative `SelectionSet` and its observer
//! - **`controller`**: `SelectionController`, which ties the pieces together
//!
//! # Workflow
//!
//! ```text
//! start(workflow)
//!     ↓
//! Video? ── yes → PermissionGate::authorize ── Denied → notice, stop
//!     ↓ no / Granted
//! configuration_for(workflow, selection) ── Err → notice, stop
//!     ↓
//! Dispatcher::launch → token → PickerSurface::launch(request)
//!     ⋮  (picker runs, result comes back over a channel)
//! on_result(token, outcome)
//!     ├─ unknown token → ignored
//!     ├─ Selected(items) → selection replaced, observer notified
//!     └─ Cancelled → notice, selection unchanged
//! ```

mod controller;
mod dispatcher;
mod error;
mod selection;

pub mod policy;

pub use controller::{Reconciliation, SelectionController, StartOutcome};
pub use dispatcher::{CorrelationToken, LaunchDispatcher, PendingLaunch};
pub use error::{DispatchError, Result, SurfaceError, WorkflowError};
pub use policy::configuration_for;
pub use selection::{SelectionObserver, SelectionSet};

use crate::media::MediaFile;
use crate::picker::Configuration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-triggered selection workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    /// Pick images
    Image,
    /// Pick videos, gated by an explicit permission request
    Video,
    /// Pick a single audio item
    Audio,
    /// Browse files and directories
    Generic,
}

impl Workflow {
    pub const ALL: [Self; 4] = [Self::Image, Self::Video, Self::Audio, Self::Generic];

    /// Surface the workflow launches
    #[must_use]
    pub const fn surface(self) -> SurfaceKind {
        match self {
            Self::Image | Self::Video | Self::Audio => SurfaceKind::MediaPicker,
            Self::Generic => SurfaceKind::DirectoryBrowser,
        }
    }

    /// Whether the host runs the permission gate before building
    #[must_use]
    pub const fn is_gated(self) -> bool {
        matches!(self, Self::Video)
    }

    /// Noun used in user-visible notices
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Generic => "File",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of picker surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Flat list of media items
    MediaPicker,
    /// Directory navigation with file selection
    DirectoryBrowser,
}

/// One picker invocation handed to the surface
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub token: CorrelationToken,
    pub workflow: Workflow,
    pub surface: SurfaceKind,
    pub configuration: Configuration,
}

/// How a picker invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Items chosen, in selection order
    Selected(Vec<MediaFile>),
    /// User backed out, or the surface's own permission check failed
    Cancelled,
}

/// Result delivered by the surface for a launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerResult {
    pub token: CorrelationToken,
    pub outcome: PickerOutcome,
}

impl PickerResult {
    #[must_use]
    pub const fn new(token: CorrelationToken, outcome: PickerOutcome) -> Self {
        Self { token, outcome }
    }
}

/// External picker surface
///
/// `launch` starts the picker and returns; the outcome is delivered later as
/// a [`PickerResult`] carrying the request's token.
pub trait PickerSurface {
    /// Start one picker invocation
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError` if the surface could not be started. No result
    /// will be delivered for the request in that case.
    fn launch(&mut self, request: &LaunchRequest) -> std::result::Result<(), SurfaceError>;
}
