//! Storage enumeration for the console picker
//!
//! Walks a root directory and turns entries into [`MediaFile`]s, applying
//! the filtering policy carried by a picker [`Configuration`]:
//!
//! - only media types the configuration shows
//! - paths matching an ignore pattern are skipped
//! - hidden entries (leading `.`) are skipped when `ignore_hidden_files`
//! - directories holding a `.nomedia` marker are skipped when `ignore_no_media`
//! - empty files are skipped when `skip_zero_size_files`

mod error;

pub use error::{Result, ScanError};

use crate::media::{MediaFile, MediaType};
use crate::picker::Configuration;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Marker file that hides a directory from media enumeration
pub const NO_MEDIA_MARKER: &str = ".nomedia";

/// Immediate contents of one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    /// Subdirectories, sorted by name
    pub dirs: Vec<PathBuf>,
    /// Files passing the configuration's filters, sorted by name
    pub files: Vec<MediaFile>,
}

/// Enumerates media below a root directory
#[derive(Debug, Clone)]
pub struct MediaScanner {
    root: PathBuf,
}

impl MediaScanner {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every selectable file below the root, sorted by path
    ///
    /// Unreadable entries are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::RootNotFound` if the root is not a directory.
    pub fn scan(&self, config: &Configuration) -> Result<Vec<MediaFile>> {
        self.check_root()?;

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !prune_dir(entry, config));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(file) = media_file(entry.path(), config) {
                files.push(file);
            }
        }

        debug!(root = %self.root.display(), count = files.len(), "scan complete");
        Ok(files)
    }

    /// Contents of one directory below (or at) the root
    ///
    /// # Errors
    ///
    /// Returns `ScanError::OutsideRoot` for directories outside the root and
    /// `ScanError::Io` if the directory cannot be read.
    pub fn list_dir(&self, dir: &Path, config: &Configuration) -> Result<DirListing> {
        self.check_root()?;
        if !dir.starts_with(&self.root) {
            return Err(ScanError::OutsideRoot(dir.to_path_buf()));
        }

        let mut listing = DirListing::default();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                if (config.ignore_hidden_files() && is_hidden(&path))
                    || (config.ignore_no_media() && has_no_media_marker(&path))
                    || config.is_ignored(&path)
                {
                    continue;
                }
                listing.dirs.push(path);
            } else if file_type.is_file()
                && let Some(file) = media_file(&path, config)
            {
                listing.files.push(file);
            }
        }

        listing.dirs.sort();
        listing.files.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(listing)
    }

    fn check_root(&self) -> Result<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(ScanError::RootNotFound(self.root.clone()))
        }
    }
}

/// Whether a directory and everything below it is excluded
fn prune_dir(entry: &DirEntry, config: &Configuration) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let path = entry.path();
    (config.ignore_hidden_files() && is_hidden(path))
        || (config.ignore_no_media() && has_no_media_marker(path))
        || config.is_ignored(path)
}

/// Build the media item for a file, or `None` if the configuration filters it out
fn media_file(path: &Path, config: &Configuration) -> Option<MediaFile> {
    if config.ignore_hidden_files() && is_hidden(path) {
        return None;
    }
    if config.is_ignored(path) {
        return None;
    }

    let media_type = MediaType::from_path(path);
    if !config.shows(media_type) {
        return None;
    }

    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read metadata");
            return None;
        }
    };
    if config.skip_zero_size_files() && size == 0 {
        return None;
    }

    Some(MediaFile::from_path(path, media_type, size))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn has_no_media_marker(dir: &Path) -> bool {
    dir.join(NO_MEDIA_MARKER).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::ConfigurationBuilder;
    use crate::testing::MediaTree;

    fn create_media_tree() -> MediaTree {
        let tree = MediaTree::new()
            .with_file("a.jpg", b"jpeg")
            .with_file("empty.png", b"")
            .with_file("clip.mp4", b"video")
            .with_file("song.mp3", b"audio")
            .with_file("notes.txt", b"text")
            .with_file(".hidden.jpg", b"jpeg")
            .with_file("WhatsApp/forwarded.mp4", b"video")
            .with_file("private/secret.mp3", b"audio")
            .with_file(".cache/thumb.jpg", b"jpeg");
        tree.file(&format!("private/{NO_MEDIA_MARKER}"), b"");
        tree
    }

    fn names(files: &[MediaFile]) -> Vec<String> {
        files.iter().map(MediaFile::name).collect()
    }

    #[test]
    fn test_scan_defaults() {
        let dir = create_media_tree();
        let config = ConfigurationBuilder::new().build().unwrap();

        let files = MediaScanner::new(dir.path()).scan(&config).unwrap();

        assert_eq!(
            names(&files),
            ["forwarded.mp4", "a.jpg", "clip.mp4", "empty.png", "notes.txt", "song.mp3"]
        );
    }

    #[test]
    fn test_scan_images_skipping_empty() {
        let dir = create_media_tree();
        let config = ConfigurationBuilder::new()
            .show_videos(false)
            .show_audios(false)
            .show_files(false)
            .skip_zero_size_files(true)
            .build()
            .unwrap();

        let files = MediaScanner::new(dir.path()).scan(&config).unwrap();

        assert_eq!(names(&files), ["a.jpg"]);
        assert_eq!(files[0].media_type(), MediaType::Image);
        assert_eq!(files[0].size(), 4);
    }

    #[test]
    fn test_scan_applies_ignore_paths() {
        let dir = create_media_tree();
        let config = ConfigurationBuilder::new()
            .show_images(false)
            .show_audios(false)
            .show_files(false)
            .ignore_paths([".*WhatsApp.*"])
            .build()
            .unwrap();

        let files = MediaScanner::new(dir.path()).scan(&config).unwrap();

        assert_eq!(names(&files), ["clip.mp4"]);
    }

    #[test]
    fn test_scan_includes_hidden_and_nomedia_when_asked() {
        let dir = create_media_tree();
        let config = ConfigurationBuilder::new()
            .show_images(false)
            .show_videos(false)
            .show_files(false)
            .ignore_hidden_files(false)
            .ignore_no_media(false)
            .build()
            .unwrap();

        let files = MediaScanner::new(dir.path()).scan(&config).unwrap();

        assert_eq!(names(&files), ["secret.mp3", "song.mp3"]);
    }

    #[test]
    fn test_scan_hidden_files_when_not_ignored() {
        let dir = create_media_tree();
        let config = ConfigurationBuilder::new()
            .show_videos(false)
            .show_audios(false)
            .show_files(false)
            .ignore_hidden_files(false)
            .build()
            .unwrap();

        let files = MediaScanner::new(dir.path()).scan(&config).unwrap();

        assert_eq!(names(&files), ["thumb.jpg", ".hidden.jpg", "a.jpg", "empty.png"]);
    }

    #[test]
    fn test_scan_missing_root() {
        let config = ConfigurationBuilder::new().build().unwrap();
        let err = MediaScanner::new("/definitely/not/here").scan(&config).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));
    }

    #[test]
    fn test_list_dir() {
        let dir = create_media_tree();
        let config = ConfigurationBuilder::new().build().unwrap();
        let scanner = MediaScanner::new(dir.path());

        let listing = scanner.list_dir(dir.path(), &config).unwrap();

        assert_eq!(listing.dirs, vec![dir.path().join("WhatsApp")]);
        assert_eq!(
            names(&listing.files),
            ["a.jpg", "clip.mp4", "empty.png", "notes.txt", "song.mp3"]
        );
    }

    #[test]
    fn test_list_dir_outside_root() {
        let dir = create_media_tree();
        let other = MediaTree::new();
        let config = ConfigurationBuilder::new().build().unwrap();

        let err = MediaScanner::new(dir.path())
            .list_dir(other.path(), &config)
            .unwrap_err();
        assert!(matches!(err, ScanError::OutsideRoot(_)));
    }
}
