//! Fixed configuration policy per workflow
//!
//! Each workflow always builds the same shape of configuration; only the
//! pre-selection depends on the current selection.

use super::{SelectionSet, Workflow};
use crate::media::MediaType;
use crate::picker::{Configuration, ConfigurationBuilder, Result};

/// Maximum items for the multi-select workflows
pub const MAX_SELECTION: usize = 10;

/// Directory excluded from the video picker
pub const VIDEO_IGNORE_PATTERN: &str = ".*WhatsApp.*";

pub const AUDIO_TITLE: &str = "Select an audio";
pub const GENERIC_TITLE: &str = "Select a file";

/// Build the configuration a workflow launches with
///
/// # Errors
///
/// Returns `ConfigurationError` if the resulting options are inconsistent.
/// The fixed policies never are, but the check is the builder's, not ours.
pub fn configuration_for(workflow: Workflow, selection: &SelectionSet) -> Result<Configuration> {
    match workflow {
        Workflow::Image => ConfigurationBuilder::new()
            .check_permission(true)
            .selected_media_files(selection.to_vec())
            .enable_image_capture(true)
            .show_videos(false)
            .show_audios(false)
            .show_files(false)
            .skip_zero_size_files(true)
            .max_selection(MAX_SELECTION)
            .build(),

        // Permission was already granted by the gate
        Workflow::Video => ConfigurationBuilder::new()
            .check_permission(false)
            .selected_media_files(selection.to_vec())
            .enable_video_capture(true)
            .show_images(false)
            .show_audios(false)
            .show_files(false)
            .max_selection(MAX_SELECTION)
            .ignore_paths([VIDEO_IGNORE_PATTERN])
            .build(),

        Workflow::Audio => ConfigurationBuilder::new()
            .check_permission(true)
            .show_images(false)
            .show_videos(false)
            .show_files(false)
            .ignore_hidden_files(false)
            .ignore_no_media(false)
            .show_audios(true)
            .single_choice_mode(true)
            .selected_media_file(selection.last_of_type(MediaType::Audio).cloned())
            .title(AUDIO_TITLE)
            .build(),

        Workflow::Generic => ConfigurationBuilder::new()
            .check_permission(true)
            .selected_media_files(selection.to_vec())
            .show_files(true)
            .show_images(true)
            .show_audios(true)
            .show_videos(true)
            .ignore_no_media(false)
            .enable_video_capture(true)
            .enable_image_capture(true)
            .ignore_hidden_files(false)
            .max_selection(MAX_SELECTION)
            .title(GENERIC_TITLE)
            .build(),
    }
}
