use crate::media::{MediaFile, MediaId, MediaType};
use std::collections::HashSet;

/// The host's current selection
///
/// Ordered by selection order and unique by item id. It starts empty and is
/// only ever replaced wholesale by the reconciler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: Vec<MediaFile>,
}

impl SelectionSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Replace the whole selection
    ///
    /// Duplicate ids keep their first occurrence.
    pub(crate) fn replace(&mut self, items: Vec<MediaFile>) {
        let mut seen = HashSet::with_capacity(items.len());
        self.items = items
            .into_iter()
            .filter(|item| seen.insert(item.id().clone()))
            .collect();
    }

    /// Replace the whole selection, keeping at most `limit` items
    ///
    /// Items past the limit are dropped after duplicates are collapsed.
    /// Returns how many were dropped.
    pub(crate) fn replace_at_most(&mut self, items: Vec<MediaFile>, limit: Option<usize>) -> usize {
        self.replace(items);
        match limit {
            Some(limit) if self.items.len() > limit => {
                let dropped = self.items.len() - limit;
                self.items.truncate(limit);
                dropped
            }
            _ => 0,
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[MediaFile] {
        &self.items
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<MediaFile> {
        self.items.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MediaFile> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &MediaId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Most recently selected item of the given type
    ///
    /// Scans the whole list and keeps the last match.
    #[must_use]
    pub fn last_of_type(&self, media_type: MediaType) -> Option<&MediaFile> {
        self.items
            .iter()
            .rev()
            .find(|item| item.media_type() == media_type)
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a MediaFile;
    type IntoIter = std::slice::Iter<'a, MediaFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Single observer of selection changes
///
/// Called exactly once per replacement, never on cancellation. Closures
/// taking `&SelectionSet` implement it.
pub trait SelectionObserver {
    fn selection_changed(&mut self, selection: &SelectionSet);
}

impl<F> SelectionObserver for F
where
    F: FnMut(&SelectionSet),
{
    fn selection_changed(&mut self, selection: &SelectionSet) {
        self(selection);
    }
}
