//! Permission gating for picker workflows
//!
//! Before a gated workflow may enumerate storage, the host must hold the
//! OS permission family that covers it. Which family that is depends only on
//! the platform's capability tier:
//!
//! - **Scoped** platforms grant per-media-type read tokens
//!   (`ReadMediaImages`, `ReadMediaVideo`, `ReadMediaAudio`).
//! - **Legacy** platforms only know the broad `ReadExternalStorage` token.
//!
//! [`required_permissions`] is the pure mapping from tier and workflow to a
//! token set; [`PermissionGate`] asks a [`PermissionRuntime`] for whatever is
//! still missing and reduces the answer to [`Authorization`].

mod gate;

pub use gate::{Authorization, PermissionGate, PermissionRuntime};

use crate::workflow::Workflow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform version bucket that decides the permission family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityTier {
    /// Per-media-type read permissions
    #[default]
    Scoped,
    /// Single broad storage permission
    Legacy,
}

impl fmt::Display for CapabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scoped => f.write_str("scoped"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

/// OS permission token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PermissionToken {
    ReadMediaImages,
    ReadMediaVideo,
    ReadMediaAudio,
    ReadExternalStorage,
}

impl PermissionToken {
    /// Platform name of the token
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadMediaImages => "READ_MEDIA_IMAGES",
            Self::ReadMediaVideo => "READ_MEDIA_VIDEO",
            Self::ReadMediaAudio => "READ_MEDIA_AUDIO",
            Self::ReadExternalStorage => "READ_EXTERNAL_STORAGE",
        }
    }
}

impl fmt::Display for PermissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tokens a workflow needs on the given tier
///
/// Exactly one family is returned: scoped tokens on `Scoped`, the legacy
/// storage token on `Legacy`. The generic browse workflow needs every scoped
/// media token, so it is the one multi-token request.
#[must_use]
pub fn required_permissions(tier: CapabilityTier, workflow: Workflow) -> Vec<PermissionToken> {
    match tier {
        CapabilityTier::Legacy => vec![PermissionToken::ReadExternalStorage],
        CapabilityTier::Scoped => match workflow {
            Workflow::Image => vec![PermissionToken::ReadMediaImages],
            Workflow::Video => vec![PermissionToken::ReadMediaVideo],
            Workflow::Audio => vec![PermissionToken::ReadMediaAudio],
            Workflow::Generic => vec![
                PermissionToken::ReadMediaImages,
                PermissionToken::ReadMediaVideo,
                PermissionToken::ReadMediaAudio,
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_tokens_per_workflow() {
        assert_eq!(
            required_permissions(CapabilityTier::Scoped, Workflow::Video),
            vec![PermissionToken::ReadMediaVideo]
        );
        assert_eq!(
            required_permissions(CapabilityTier::Scoped, Workflow::Image),
            vec![PermissionToken::ReadMediaImages]
        );
        assert_eq!(
            required_permissions(CapabilityTier::Scoped, Workflow::Audio),
            vec![PermissionToken::ReadMediaAudio]
        );
        assert_eq!(required_permissions(CapabilityTier::Scoped, Workflow::Generic).len(), 3);
    }

    #[test]
    fn test_legacy_uses_storage_token_only() {
        for workflow in Workflow::ALL {
            assert_eq!(
                required_permissions(CapabilityTier::Legacy, workflow),
                vec![PermissionToken::ReadExternalStorage]
            );
        }
    }

    #[test]
    fn test_families_never_mix() {
        for workflow in Workflow::ALL {
            let scoped = required_permissions(CapabilityTier::Scoped, workflow);
            assert!(!scoped.contains(&PermissionToken::ReadExternalStorage));
            assert!(!scoped.is_empty());
        }
    }

    #[test]
    fn test_token_names() {
        assert_eq!(PermissionToken::ReadMediaVideo.to_string(), "READ_MEDIA_VIDEO");
        assert_eq!(CapabilityTier::Legacy.to_string(), "legacy");
    }
}
