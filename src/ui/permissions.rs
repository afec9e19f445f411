//! Console permission runtime
//!
//! Stands in for the OS permission dialog: each missing token is confirmed
//! with the user, and grants are remembered for the rest of the session.

use super::input::UserInput;
use crate::permission::{PermissionRuntime, PermissionToken};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Permission runtime that asks on the terminal
///
/// Clones share the same grant table, so the controller's gate and the
/// surface's gate see each other's grants.
pub struct ConsolePermissions<I> {
    input: Arc<I>,
    granted: Arc<Mutex<HashSet<PermissionToken>>>,
}

impl<I> Clone for ConsolePermissions<I> {
    fn clone(&self) -> Self {
        Self {
            input: Arc::clone(&self.input),
            granted: Arc::clone(&self.granted),
        }
    }
}

impl<I: UserInput> ConsolePermissions<I> {
    #[must_use]
    pub fn new(input: I) -> Self {
        Self::shared(Arc::new(input))
    }

    /// Runtime sharing an input handle with other console components
    #[must_use]
    pub fn shared(input: Arc<I>) -> Self {
        Self {
            input,
            granted: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Tokens granted so far this session
    #[must_use]
    pub fn granted(&self) -> Vec<PermissionToken> {
        let mut tokens: Vec<_> = self
            .granted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect();
        tokens.sort();
        tokens
    }
}

impl<I: UserInput> PermissionRuntime for ConsolePermissions<I> {
    fn is_granted(&self, token: PermissionToken) -> bool {
        self.granted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&token)
    }

    fn request_permissions(&mut self, tokens: &[PermissionToken]) -> HashMap<PermissionToken, bool> {
        let mut answers = HashMap::with_capacity(tokens.len());

        for &token in tokens {
            let prompt = format!("Allow mediapick to use {token}?");
            let granted = match self.input.prompt_confirm(&prompt, true) {
                Ok(answer) => answer.unwrap_or(false),
                Err(e) => {
                    warn!(%token, error = %e, "permission prompt failed, treating as denied");
                    false
                }
            };

            if granted {
                self.granted
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(token);
            }
            answers.insert(token, granted);

            // The OS dialog stops at the first refusal; later tokens stay unanswered
            if !granted {
                break;
            }
        }

        answers
    }
}
