use super::error::{DispatchError, Result};
use super::{
    CorrelationToken, LaunchDispatcher, PickerOutcome, PickerResult, PickerSurface,
    SelectionObserver, SelectionSet, Workflow, configuration_for,
};
use crate::permission::{PermissionGate, PermissionRuntime};
use crate::ui::OutputWriter;
use tracing::{error, info, warn};

/// Notice shown when the permission gate denies a workflow
pub const PERMISSION_DENIED_NOTICE: &str = "Permission Denied";

/// How `start` ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The picker was launched under this token
    Launched(CorrelationToken),
    /// The permission gate denied the workflow; nothing was launched
    PermissionDenied,
}

/// What `on_result` did with a delivered result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The selection was replaced and the observer notified
    Replaced,
    /// The picker was cancelled; the selection is untouched
    Unchanged,
    /// Unknown or stale token; nothing happened
    Ignored,
}

/// Drives the four selection workflows and owns the selection
///
/// All methods run on the caller's thread. The selection is only written by
/// [`on_result`](Self::on_result).
pub struct SelectionController<S, P> {
    surface: S,
    gate: PermissionGate<P>,
    dispatcher: LaunchDispatcher,
    selection: SelectionSet,
    observer: Option<Box<dyn SelectionObserver>>,
    notices: Box<dyn OutputWriter>,
}

impl<S, P> SelectionController<S, P>
where
    S: PickerSurface,
    P: PermissionRuntime,
{
    /// Create a controller with an empty selection
    pub fn new(surface: S, gate: PermissionGate<P>, notices: impl OutputWriter + 'static) -> Self {
        Self {
            surface,
            gate,
            dispatcher: LaunchDispatcher::new(),
            selection: SelectionSet::new(),
            observer: None,
            notices: Box::new(notices),
        }
    }

    /// Set the single selection observer, replacing any previous one
    pub fn set_observer(&mut self, observer: impl SelectionObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Read-only view of the current selection
    #[must_use]
    pub const fn current_selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub const fn gate(&self) -> &PermissionGate<P> {
        &self.gate
    }

    #[must_use]
    pub const fn dispatcher(&self) -> &LaunchDispatcher {
        &self.dispatcher
    }

    /// Start a workflow
    ///
    /// The video workflow is authorized first; a denial ends the workflow
    /// with a notice and no launch. Otherwise the workflow's configuration is
    /// built from the current selection and handed to the surface.
    ///
    /// # Errors
    ///
    /// - `WorkflowError::Dispatch` if the workflow already has a picker open
    /// - `WorkflowError::Configuration` if the configuration is invalid
    /// - `WorkflowError::Surface` if the surface fails to start
    ///
    /// The selection is untouched in every error case.
    pub fn start(&mut self, workflow: Workflow) -> Result<StartOutcome> {
        if self.dispatcher.is_outstanding(workflow) {
            warn!(%workflow, "workflow already has a picker open");
            return Err(DispatchError::AlreadyOutstanding(workflow).into());
        }

        if workflow.is_gated() && !self.gate.authorize(workflow).is_granted() {
            self.notices.warning(PERMISSION_DENIED_NOTICE);
            return Ok(StartOutcome::PermissionDenied);
        }

        let configuration = configuration_for(workflow, &self.selection).map_err(|e| {
            error!(%workflow, error = %e, "invalid picker configuration");
            self.notices.error(&e.to_string());
            e
        })?;

        let request = self.dispatcher.launch(workflow, configuration)?;
        if let Err(e) = self.surface.launch(&request) {
            error!(%workflow, token = %request.token, error = %e, "picker failed to start");
            self.dispatcher.cancel(request.token);
            self.notices.error(&e.to_string());
            return Err(e.into());
        }

        Ok(StartOutcome::Launched(request.token))
    }

    /// Reconcile a picker result into the selection
    ///
    /// `Selected` replaces the selection and notifies the observer once. A
    /// single-choice result keeps its first item only, and any other result
    /// is cut to the configured maximum.
    /// `Cancelled` leaves it alone and shows a notice. Results for tokens that
    /// are not outstanding are dropped.
    pub fn on_result(&mut self, token: CorrelationToken, outcome: PickerOutcome) -> Reconciliation {
        let Some(pending) = self.dispatcher.resolve(token) else {
            warn!(%token, "result for unknown or stale token ignored");
            return Reconciliation::Ignored;
        };

        match outcome {
            PickerOutcome::Selected(items) => {
                let limit = if pending.configuration.is_single_choice() {
                    Some(1)
                } else {
                    pending.configuration.max_selection()
                };
                let dropped = self.selection.replace_at_most(items, limit);
                if dropped > 0 {
                    warn!(%token, dropped, "picker returned more items than allowed; extra items dropped");
                }
                info!(
                    %token,
                    workflow = %pending.workflow,
                    count = self.selection.len(),
                    "selection replaced"
                );
                if let Some(observer) = self.observer.as_mut() {
                    observer.selection_changed(&self.selection);
                }
                Reconciliation::Replaced
            }
            PickerOutcome::Cancelled => {
                warn!(%token, workflow = %pending.workflow, "picker cancelled");
                self.notices
                    .warning(&format!("{} not selected", pending.workflow.noun()));
                Reconciliation::Unchanged
            }
        }
    }

    /// Reconcile a result delivered as one value
    pub fn deliver(&mut self, result: PickerResult) -> Reconciliation {
        self.on_result(result.token, result.outcome)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
