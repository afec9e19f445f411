use super::{CapabilityTier, PermissionToken, required_permissions};
use crate::workflow::Workflow;
use std::collections::HashMap;
use tracing::{debug, warn};

/// OS permission runtime
///
/// `request_permissions` is where a gated workflow suspends: it returns only
/// once the user has answered the permission dialog.
pub trait PermissionRuntime {
    /// Whether the token is already held
    fn is_granted(&self, token: PermissionToken) -> bool;

    /// Ask the user for the given tokens
    ///
    /// Tokens missing from the returned map count as not granted.
    fn request_permissions(&mut self, tokens: &[PermissionToken]) -> HashMap<PermissionToken, bool>;
}

/// Result of authorizing a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied,
}

impl Authorization {
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Decides and requests the permissions a workflow needs
#[derive(Debug)]
pub struct PermissionGate<R> {
    tier: CapabilityTier,
    runtime: R,
}

impl<R: PermissionRuntime> PermissionGate<R> {
    #[must_use]
    pub const fn new(tier: CapabilityTier, runtime: R) -> Self {
        Self { tier, runtime }
    }

    #[must_use]
    pub const fn tier(&self) -> CapabilityTier {
        self.tier
    }

    #[must_use]
    pub const fn runtime(&self) -> &R {
        &self.runtime
    }

    pub const fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    /// Make sure the workflow's permission family is held
    ///
    /// Already-granted tokens are not requested again. The request as a
    /// whole is granted only when every requested token is; a partial grant
    /// is a denial.
    pub fn authorize(&mut self, workflow: Workflow) -> Authorization {
        let required = required_permissions(self.tier, workflow);
        let missing: Vec<PermissionToken> = required
            .into_iter()
            .filter(|token| !self.runtime.is_granted(*token))
            .collect();

        if missing.is_empty() {
            debug!(%workflow, "permissions already held");
            return Authorization::Granted;
        }

        debug!(%workflow, tokens = ?missing, "requesting permissions");
        let answers = self.runtime.request_permissions(&missing);
        let all_granted = missing
            .iter()
            .all(|token| answers.get(token).copied().unwrap_or(false));

        if all_granted {
            Authorization::Granted
        } else {
            warn!(%workflow, tokens = ?missing, "permission denied");
            Authorization::Denied
        }
    }
}
