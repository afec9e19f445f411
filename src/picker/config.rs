use super::error::{ConfigurationError, Result};
use crate::media::{MediaFile, MediaType};
use regex::Regex;
use std::path::Path;

/// Immutable description of one picker invocation
#[derive(Debug, Clone)]
pub struct Configuration {
    show_images: bool,
    show_videos: bool,
    show_audios: bool,
    show_files: bool,
    enable_image_capture: bool,
    enable_video_capture: bool,
    max_selection: Option<usize>,
    single_choice_mode: bool,
    check_permission: bool,
    ignore_paths: Vec<String>,
    ignore_matchers: Vec<Regex>,
    ignore_hidden_files: bool,
    ignore_no_media: bool,
    skip_zero_size_files: bool,
    pre_selected: Vec<MediaFile>,
    title: Option<String>,
}

impl Configuration {
    /// Start building a configuration
    #[must_use]
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    #[must_use]
    pub const fn show_images(&self) -> bool {
        self.show_images
    }

    #[must_use]
    pub const fn show_videos(&self) -> bool {
        self.show_videos
    }

    #[must_use]
    pub const fn show_audios(&self) -> bool {
        self.show_audios
    }

    #[must_use]
    pub const fn show_files(&self) -> bool {
        self.show_files
    }

    /// Whether items of the given type are visible in the picker
    #[must_use]
    pub const fn shows(&self, media_type: MediaType) -> bool {
        match media_type {
            MediaType::Image => self.show_images,
            MediaType::Video => self.show_videos,
            MediaType::Audio => self.show_audios,
            MediaType::File => self.show_files,
        }
    }

    /// Visible media types, in `Image, Video, Audio, File` order
    #[must_use]
    pub fn shown_media_types(&self) -> Vec<MediaType> {
        [MediaType::Image, MediaType::Video, MediaType::Audio, MediaType::File]
            .into_iter()
            .filter(|t| self.shows(*t))
            .collect()
    }

    #[must_use]
    pub const fn enable_image_capture(&self) -> bool {
        self.enable_image_capture
    }

    #[must_use]
    pub const fn enable_video_capture(&self) -> bool {
        self.enable_video_capture
    }

    /// Maximum number of items, `None` when unbounded
    #[must_use]
    pub const fn max_selection(&self) -> Option<usize> {
        self.max_selection
    }

    #[must_use]
    pub const fn single_choice_mode(&self) -> bool {
        self.single_choice_mode
    }

    /// Effective single-choice semantics
    ///
    /// A maximum of one behaves as single choice even without the flag.
    #[must_use]
    pub const fn is_single_choice(&self) -> bool {
        self.single_choice_mode || matches!(self.max_selection, Some(1))
    }

    #[must_use]
    pub const fn check_permission(&self) -> bool {
        self.check_permission
    }

    /// Ignore patterns as given to the builder
    #[must_use]
    pub fn ignore_paths(&self) -> &[String] {
        &self.ignore_paths
    }

    /// Whether a path matches any ignore pattern
    ///
    /// Patterns must match the whole path string.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.ignore_matchers.is_empty() {
            return false;
        }
        let path = path.to_string_lossy();
        self.ignore_matchers.iter().any(|re| re.is_match(&path))
    }

    #[must_use]
    pub const fn ignore_hidden_files(&self) -> bool {
        self.ignore_hidden_files
    }

    #[must_use]
    pub const fn ignore_no_media(&self) -> bool {
        self.ignore_no_media
    }

    #[must_use]
    pub const fn skip_zero_size_files(&self) -> bool {
        self.skip_zero_size_files
    }

    /// Items the picker starts out with selected
    #[must_use]
    pub fn pre_selected(&self) -> &[MediaFile] {
        &self.pre_selected
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Builder for [`Configuration`]
///
/// Setters may be called in any order; validation happens once, in
/// [`build`](Self::build).
#[derive(Debug, Clone)]
#[must_use]
pub struct ConfigurationBuilder {
    show_images: bool,
    show_videos: bool,
    show_audios: bool,
    show_files: bool,
    enable_image_capture: bool,
    enable_video_capture: bool,
    max_selection: Option<usize>,
    single_choice_mode: bool,
    check_permission: bool,
    ignore_paths: Vec<String>,
    ignore_hidden_files: bool,
    ignore_no_media: bool,
    skip_zero_size_files: bool,
    pre_selected: Vec<MediaFile>,
    title: Option<String>,
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self {
            show_images: true,
            show_videos: true,
            show_audios: true,
            show_files: true,
            enable_image_capture: false,
            enable_video_capture: false,
            max_selection: None,
            single_choice_mode: false,
            check_permission: false,
            ignore_paths: Vec::new(),
            ignore_hidden_files: true,
            ignore_no_media: true,
            skip_zero_size_files: false,
            pre_selected: Vec::new(),
            title: None,
        }
    }
}

impl ConfigurationBuilder {
    /// Builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn show_images(mut self, show: bool) -> Self {
        self.show_images = show;
        self
    }

    pub const fn show_videos(mut self, show: bool) -> Self {
        self.show_videos = show;
        self
    }

    pub const fn show_audios(mut self, show: bool) -> Self {
        self.show_audios = show;
        self
    }

    pub const fn show_files(mut self, show: bool) -> Self {
        self.show_files = show;
        self
    }

    /// Allow taking new photos from the picker
    pub const fn enable_image_capture(mut self, enable: bool) -> Self {
        self.enable_image_capture = enable;
        self
    }

    /// Allow recording new videos from the picker
    pub const fn enable_video_capture(mut self, enable: bool) -> Self {
        self.enable_video_capture = enable;
        self
    }

    /// Cap the number of selectable items
    pub const fn max_selection(mut self, max: usize) -> Self {
        self.max_selection = Some(max);
        self
    }

    pub const fn single_choice_mode(mut self, single: bool) -> Self {
        self.single_choice_mode = single;
        self
    }

    /// Whether the picker must check permissions itself before enumerating
    pub const fn check_permission(mut self, check: bool) -> Self {
        self.check_permission = check;
        self
    }

    /// Regular expressions for paths the enumerator should exclude
    pub fn ignore_paths<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_paths = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub const fn ignore_hidden_files(mut self, ignore: bool) -> Self {
        self.ignore_hidden_files = ignore;
        self
    }

    /// Whether directories carrying a `.nomedia` marker are skipped
    pub const fn ignore_no_media(mut self, ignore: bool) -> Self {
        self.ignore_no_media = ignore;
        self
    }

    pub const fn skip_zero_size_files(mut self, skip: bool) -> Self {
        self.skip_zero_size_files = skip;
        self
    }

    /// Items the picker starts out with selected
    pub fn selected_media_files(mut self, files: Vec<MediaFile>) -> Self {
        self.pre_selected = files;
        self
    }

    /// Single pre-selected item, for single-choice pickers
    ///
    /// `None` clears any pre-selection.
    pub fn selected_media_file(mut self, file: Option<MediaFile>) -> Self {
        self.pre_selected = file.into_iter().collect();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Validate the options and produce the configuration
    ///
    /// # Errors
    ///
    /// - `MultiplePreselectedInSingleChoice` if single-choice mode is set and
    ///   more than one item is pre-selected
    /// - `NoSelectableContent` if every `show_*` flag is false
    /// - `InvalidMaxSelection` if the maximum is zero
    /// - `InvalidIgnorePattern` if an ignore path is not a valid regex
    pub fn build(self) -> Result<Configuration> {
        if self.single_choice_mode && self.pre_selected.len() > 1 {
            return Err(ConfigurationError::MultiplePreselectedInSingleChoice(
                self.pre_selected.len(),
            ));
        }

        if !(self.show_images || self.show_videos || self.show_audios || self.show_files) {
            return Err(ConfigurationError::NoSelectableContent);
        }

        if self.max_selection == Some(0) {
            return Err(ConfigurationError::InvalidMaxSelection);
        }

        let ignore_matchers = self
            .ignore_paths
            .iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
                    ConfigurationError::InvalidIgnorePattern {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Configuration {
            show_images: self.show_images,
            show_videos: self.show_videos,
            show_audios: self.show_audios,
            show_files: self.show_files,
            enable_image_capture: self.enable_image_capture,
            enable_video_capture: self.enable_video_capture,
            max_selection: self.max_selection,
            single_choice_mode: self.single_choice_mode,
            check_permission: self.check_permission,
            ignore_paths: self.ignore_paths,
            ignore_matchers,
            ignore_hidden_files: self.ignore_hidden_files,
            ignore_no_media: self.ignore_no_media,
            skip_zero_size_files: self.skip_zero_size_files,
            pre_selected: self.pre_selected,
            title: self.title,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
