//! Testing utilities for mediapick
//!
//! This module provides [`MediaTree`], a temporary directory that tests fill
//! with media files before pointing a scanner or surface at it.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory tree of fixture files
///
/// Removed when dropped.
pub struct MediaTree {
    dir: TempDir,
}

impl MediaTree {
    /// Create an empty tree
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Root of the tree
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file, creating parent directories as needed
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn file(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Create an empty directory
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.join(relative);
        fs::create_dir_all(&path).expect("Failed to create fixture directory");
        path
    }

    /// Chainable form of [`file`](Self::file)
    #[must_use]
    pub fn with_file(self, relative: &str, content: &[u8]) -> Self {
        self.file(relative, content);
        self
    }
}

impl Default for MediaTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_file() {
        let tree = MediaTree::new().with_file("DCIM/Camera/a.jpg", b"jpeg");

        assert_eq!(fs::read(tree.join("DCIM/Camera/a.jpg")).unwrap(), b"jpeg");
    }

    #[test]
    fn test_removed_on_drop() {
        let tree = MediaTree::new();
        let root = tree.path().to_path_buf();
        tree.dir("empty");
        assert!(root.join("empty").is_dir());

        drop(tree);
        assert!(!root.exists());
    }
}
