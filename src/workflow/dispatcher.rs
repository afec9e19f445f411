use super::error::DispatchError;
use super::{LaunchRequest, SurfaceKind, Workflow};
use crate::picker::Configuration;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Identifies one outstanding picker invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CorrelationToken(u32);

impl CorrelationToken {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a token is waiting for
#[derive(Debug, Clone)]
pub struct PendingLaunch {
    pub workflow: Workflow,
    pub surface: SurfaceKind,
    pub configuration: Configuration,
}

/// Issues correlation tokens and tracks outstanding launches
///
/// Tokens come from a counter and are never reissued while outstanding. Each
/// workflow family has at most one launch in flight.
#[derive(Debug, Default)]
pub struct LaunchDispatcher {
    next: u32,
    outstanding: HashMap<CorrelationToken, PendingLaunch>,
}

impl LaunchDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a launch and hand back the request for the surface
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::AlreadyOutstanding` if the workflow already has
    /// a launch in flight.
    pub fn launch(
        &mut self,
        workflow: Workflow,
        configuration: Configuration,
    ) -> Result<LaunchRequest, DispatchError> {
        if self.is_outstanding(workflow) {
            return Err(DispatchError::AlreadyOutstanding(workflow));
        }

        let token = self.issue_token();
        let surface = workflow.surface();
        self.outstanding.insert(
            token,
            PendingLaunch {
                workflow,
                surface,
                configuration: configuration.clone(),
            },
        );
        debug!(%token, %workflow, "picker launch issued");

        Ok(LaunchRequest {
            token,
            workflow,
            surface,
            configuration,
        })
    }

    /// Take the pending launch for a token
    ///
    /// Returns `None` for unknown or already-resolved tokens.
    pub fn resolve(&mut self, token: CorrelationToken) -> Option<PendingLaunch> {
        let pending = self.outstanding.remove(&token);
        if pending.is_some() {
            debug!(%token, "picker launch resolved");
        }
        pending
    }

    /// Forget a launch that never reached the surface
    pub fn cancel(&mut self, token: CorrelationToken) {
        self.outstanding.remove(&token);
    }

    #[must_use]
    pub fn is_outstanding(&self, workflow: Workflow) -> bool {
        self.outstanding.values().any(|p| p.workflow == workflow)
    }

    #[must_use]
    pub fn pending(&self, token: CorrelationToken) -> Option<&PendingLaunch> {
        self.outstanding.get(&token)
    }

    #[must_use]
    pub fn outstanding_count(&self) -> usize {
        self.outstanding.len()
    }

    fn issue_token(&mut self) -> CorrelationToken {
        // Skip values still in flight after wraparound
        loop {
            self.next = self.next.wrapping_add(1);
            let token = CorrelationToken(self.next);
            if !self.outstanding.contains_key(&token) {
                return token;
            }
        }
    }
}
