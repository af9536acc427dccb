// SPDX-License-Identifier: MPL-2.0
//! Session-scoped subtitle storage.
//!
//! The store is append-only and keeps insertion order. Lookups scan from the
//! oldest entry, so when ranges overlap the subtitle authored first wins.
//! Counts stay small (every entry is authored by hand), which keeps a linear
//! scan cheaper than maintaining an interval index.

use crate::domain::subtitle::Subtitle;

/// Ordered collection of the subtitles authored during one playback session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleStore {
    entries: Vec<Subtitle>,
}

impl SubtitleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subtitle after every existing entry. Duplicates are kept.
    pub fn append(&mut self, subtitle: Subtitle) {
        self.entries.push(subtitle);
    }

    /// Returns the first subtitle, in insertion order, whose range contains
    /// the canonical `second`.
    #[must_use]
    pub fn lookup(&self, second: u64) -> Option<&Subtitle> {
        self.entries.iter().find(|entry| entry.is_active_at(second))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Subtitle> {
        self.entries.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Subtitle> {
        self.entries.last()
    }

    /// Returns the entry at `index`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Subtitle> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subtitle> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a SubtitleStore {
    type Item = &'a Subtitle;
    type IntoIter = std::slice::Iter<'a, Subtitle>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Subtitle> for SubtitleStore {
    fn from_iter<I: IntoIterator<Item = Subtitle>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
