// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;

use smol_str::SmolStr;

pub const MAX_RECENT_PATTERNS: usize = 10;

/// Most-recently-used list of search or replacement patterns, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternHistory {
    entries: VecDeque<SmolStr>,
    capacity: usize,
}

impl Default for PatternHistory {
    fn default() -> Self {
        Self::with_capacity(MAX_RECENT_PATTERNS)
    }
}

impl PatternHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Moves `pattern` to the front, evicting the oldest entry when full. Empty patterns are
    /// not recorded.
    pub fn record(&mut self, pattern: &str) {
        if pattern.is_empty() || self.capacity == 0 {
            return;
        }
        if let Some(index) = self.entries.iter().position(|p| p == pattern) {
            if let Some(existing) = self.entries.remove(index) {
                self.entries.push_front(existing);
            }
            return;
        }
        self.entries.push_front(SmolStr::new(pattern));
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(SmolStr::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<S: AsRef<str>> FromIterator<S> for PatternHistory {
    /// Builds a history from entries listed newest first.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut history = Self::default();
        let entries = iter.into_iter().collect::<Vec<_>>();
        for entry in entries.iter().rev() {
            history.record(entry.as_ref());
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::{PatternHistory, MAX_RECENT_PATTERNS};

    #[test]
    fn duplicates_move_to_the_front() {
        let mut history = PatternHistory::default();
        for pattern in ["a", "b", "c", "a"] {
            history.record(pattern);
        }
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["a", "c", "b"]);
    }

    #[test]
    fn oldest_entries_are_evicted() {
        let mut history = PatternHistory::default();
        for index in 0..=MAX_RECENT_PATTERNS {
            history.record(&format!("p{index}"));
        }
        assert_eq!(history.len(), MAX_RECENT_PATTERNS);
        assert_eq!(history.latest(), Some("p10"));
        assert!(!history.iter().any(|p| p == "p0"));
    }

    #[test]
    fn empty_patterns_are_ignored() {
        let mut history = PatternHistory::default();
        history.record("");
        assert!(history.is_empty());
    }

    #[test]
    fn collecting_keeps_newest_first_order() {
        let history = ["newest", "older", "newest", "oldest"]
            .into_iter()
            .collect::<PatternHistory>();
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["newest", "older", "oldest"]);
    }
}
