//! Test doubles for the picker surface, permission runtime and user input

use super::input::{InputError, Result, UserInput};
use crate::permission::{PermissionRuntime, PermissionToken};
use crate::workflow::{CorrelationToken, LaunchRequest, PickerSurface, SurfaceError};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// Picker surface that records launches instead of showing anything
#[derive(Debug, Default)]
pub struct MockSurface {
    /// Every request passed to `launch`, in order
    pub launched: Vec<LaunchRequest>,
    /// When set, `launch` fails with this message
    pub fail_with: Option<String>,
}

impl MockSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface whose launches always fail
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            launched: Vec::new(),
            fail_with: Some(message.to_string()),
        }
    }

    /// Token of the most recent launch
    #[must_use]
    pub fn last_token(&self) -> Option<CorrelationToken> {
        self.launched.last().map(|r| r.token)
    }

    #[must_use]
    pub fn last_request(&self) -> Option<&LaunchRequest> {
        self.launched.last()
    }
}

impl PickerSurface for MockSurface {
    fn launch(&mut self, request: &LaunchRequest) -> std::result::Result<(), SurfaceError> {
        if let Some(message) = &self.fail_with {
            return Err(SurfaceError::Unavailable(message.clone()));
        }
        self.launched.push(request.clone());
        Ok(())
    }
}

/// Permission runtime with canned answers
#[derive(Debug, Default)]
pub struct MockPermissions {
    /// Tokens the "user" grants; `None` grants everything
    grants: Option<HashSet<PermissionToken>>,
    held: HashSet<PermissionToken>,
    requests: Vec<Vec<PermissionToken>>,
}

impl MockPermissions {
    /// Runtime that grants every request
    #[must_use]
    pub fn granting() -> Self {
        Self::default()
    }

    /// Runtime that denies every request
    #[must_use]
    pub fn denying() -> Self {
        Self::granting_only(&[])
    }

    /// Runtime that grants only the listed tokens
    #[must_use]
    pub fn granting_only(tokens: &[PermissionToken]) -> Self {
        Self {
            grants: Some(tokens.iter().copied().collect()),
            ..Self::default()
        }
    }

    /// Mark tokens as already held before any request
    #[must_use]
    pub fn with_held(mut self, tokens: &[PermissionToken]) -> Self {
        self.held.extend(tokens.iter().copied());
        self
    }

    /// Token sets passed to `request_permissions`, in order
    #[must_use]
    pub fn requests(&self) -> Vec<Vec<PermissionToken>> {
        self.requests.clone()
    }
}

impl PermissionRuntime for MockPermissions {
    fn is_granted(&self, token: PermissionToken) -> bool {
        self.held.contains(&token)
    }

    fn request_permissions(&mut self, tokens: &[PermissionToken]) -> HashMap<PermissionToken, bool> {
        self.requests.push(tokens.to_vec());
        tokens
            .iter()
            .map(|&token| {
                let granted = self.grants.as_ref().is_none_or(|g| g.contains(&token));
                if granted {
                    self.held.insert(token);
                }
                (token, granted)
            })
            .collect()
    }
}

/// Canned answer for one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Confirm(Option<bool>),
    Select(Option<usize>),
    MultiSelect(Option<Vec<usize>>),
}

/// A prompt as the input saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenPrompt {
    pub prompt: String,
    pub items: Vec<String>,
    /// Checked flags for multi-select, default index as a one-element list for select
    pub initial: Vec<usize>,
}

/// User input that replays scripted answers
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<Answer>>,
    seen: Mutex<Vec<SeenPrompt>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far
    #[must_use]
    pub fn seen(&self) -> Vec<SeenPrompt> {
        self.seen.lock().unwrap().clone()
    }

    fn next(&self, prompt: &str, items: &[String], initial: Vec<usize>) -> Result<Answer> {
        self.seen.lock().unwrap().push(SeenPrompt {
            prompt: prompt.to_string(),
            items: items.to_vec(),
            initial,
        });
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| InputError::Invalid(format!("no scripted answer for '{prompt}'")))
    }
}

impl UserInput for ScriptedInput {
    fn prompt_confirm(&self, prompt: &str, _default: bool) -> Result<Option<bool>> {
        match self.next(prompt, &[], Vec::new())? {
            Answer::Confirm(answer) => Ok(answer),
            other => Err(InputError::Invalid(format!("expected confirm, scripted {other:?}"))),
        }
    }

    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        match self.next(prompt, items, default.into_iter().collect())? {
            Answer::Select(answer) => Ok(answer),
            other => Err(InputError::Invalid(format!("expected select, scripted {other:?}"))),
        }
    }

    fn prompt_multi_select(
        &self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Option<Vec<usize>>> {
        let initial = checked
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.then_some(i))
            .collect();
        match self.next(prompt, items, initial)? {
            Answer::MultiSelect(answer) => Ok(answer),
            other => Err(InputError::Invalid(format!(
                "expected multi-select, scripted {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::ConfigurationBuilder;
    use crate::workflow::{SurfaceKind, Workflow};

    fn request(token: u32) -> LaunchRequest {
        LaunchRequest {
            token: CorrelationToken::new(token),
            workflow: Workflow::Image,
            surface: SurfaceKind::MediaPicker,
            configuration: ConfigurationBuilder::new().build().unwrap(),
        }
    }

    #[test]
    fn test_mock_surface_records_launches() {
        let mut surface = MockSurface::new();
        surface.launch(&request(1)).unwrap();
        surface.launch(&request(2)).unwrap();

        assert_eq!(surface.launched.len(), 2);
        assert_eq!(surface.last_token(), Some(CorrelationToken::new(2)));
    }

    #[test]
    fn test_mock_surface_failing() {
        let mut surface = MockSurface::failing("no display");
        assert!(surface.launch(&request(1)).is_err());
        assert!(surface.launched.is_empty());
    }

    #[test]
    fn test_scripted_input_order() {
        let input = ScriptedInput::new(vec![Answer::Confirm(Some(true)), Answer::Select(None)]);

        assert_eq!(input.prompt_confirm("ok?", false).unwrap(), Some(true));
        assert_eq!(input.prompt_select("which?", &["a".into()], Some(0)).unwrap(), None);
        assert!(input.prompt_confirm("again?", false).is_err());
        assert_eq!(input.seen().len(), 3);
        assert_eq!(input.seen()[1].initial, vec![0]);
    }

    #[test]
    fn test_scripted_input_type_mismatch() {
        let input = ScriptedInput::new(vec![Answer::Select(Some(0))]);
        assert!(input.prompt_confirm("ok?", false).is_err());
    }
}
