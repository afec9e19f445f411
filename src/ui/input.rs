//! User input abstraction layer
//!
//! The console picker surface and permission runtime never talk to the
//! terminal directly; they go through [`UserInput`], so tests can script the
//! answers.

use std::io;

/// Trait for user input operations
///
/// Every prompt returns `Ok(None)` when the user dismisses it (Esc or `q`),
/// which callers treat as a cancellation rather than an error.
///
/// # Examples
///
/// ```no_run
/// use mediapick::ui::input::{DialoguerInput, UserInput};
///
/// let input = DialoguerInput::new();
/// if let Some(true) = input.prompt_confirm("Allow access to videos?", true).unwrap() {
///     println!("granted");
/// }
/// ```
pub trait UserInput: Send + Sync {
    /// Prompt user for confirmation (yes/no)
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bool))` - User confirmed (true) or denied (false)
    /// * `Ok(None)` - User cancelled (ESC)
    /// * `Err(_)` - Input operation failed
    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>>;

    /// Prompt user to select one item from a list
    ///
    /// # Returns
    ///
    /// * `Ok(Some(usize))` - Index of selected item
    /// * `Ok(None)` - User cancelled (ESC)
    /// * `Err(_)` - Input operation failed
    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>>;

    /// Prompt user to select any number of items
    ///
    /// `checked` holds the initial state of each item and must be the same
    /// length as `items`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(indices))` - Chosen indices in list order
    /// * `Ok(None)` - User cancelled (ESC)
    /// * `Err(_)` - Input operation failed
    fn prompt_multi_select(
        &self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Option<Vec<usize>>>;
}

/// Result type for user input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur during user input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// IO error during input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    Invalid(String),
}

/// CLI-based user input using dialoguer
pub struct DialoguerInput {
    theme: dialoguer::theme::ColorfulTheme,
}

impl DialoguerInput {
    /// Create a new dialoguer-based input handler
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInput for DialoguerInput {
    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>> {
        use dialoguer::Confirm;

        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }

    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        use dialoguer::Select;

        if items.is_empty() {
            return Err(InputError::Invalid("nothing to select".to_string()));
        }

        let mut select = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items);

        if let Some(def) = default {
            select = select.default(def);
        }

        select
            .interact_opt()
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }

    fn prompt_multi_select(
        &self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Option<Vec<usize>>> {
        use dialoguer::MultiSelect;

        if items.len() != checked.len() {
            return Err(InputError::Invalid(format!(
                "{} items but {} checked flags",
                items.len(),
                checked.len()
            )));
        }

        let pairs: Vec<(&String, bool)> = items.iter().zip(checked.iter().copied()).collect();

        MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items_checked(&pairs)
            .interact_opt()
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }
}
