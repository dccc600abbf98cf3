// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::{Regex, RegexBuilder};

use super::error::SearchError;
use super::settings::SearchSettings;

/// A compiled search pattern together with the mode flags it was compiled for.
///
/// Literal patterns are escaped and run through the same regex engine, so both modes share
/// one matching path. The anchored twin is used to recover matched text piece by piece.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    regex_mode: bool,
    case_sensitive: bool,
    whole_word: bool,
    finder: Regex,
    anchored: Regex,
}

impl Matcher {
    /// Compiles the pattern of `settings`. An empty pattern yields `None`: it matches nothing.
    pub fn compile(settings: &SearchSettings) -> Result<Option<Self>, SearchError> {
        if settings.pattern.is_empty() {
            return Ok(None);
        }

        let source = if settings.regex {
            settings.pattern.clone()
        } else {
            regex::escape(&settings.pattern)
        };
        let build = |source: &str| {
            RegexBuilder::new(source)
                .case_insensitive(!settings.case_sensitive)
                .build()
                .map_err(|err| SearchError::InvalidPattern {
                    pattern: settings.pattern.clone(),
                    diagnostic: err.to_string(),
                })
        };
        let finder = build(&source)?;
        let anchored = build(&format!(r"\A(?:{source})"))?;

        Ok(Some(Self {
            pattern: settings.pattern.clone(),
            regex_mode: settings.regex,
            case_sensitive: settings.case_sensitive,
            whole_word: settings.whole_word_effective(),
            finder,
            anchored,
        }))
    }

    /// True when this matcher was compiled for the pattern and flags of `settings`.
    pub fn is_compiled_for(&self, settings: &SearchSettings) -> bool {
        self.pattern == settings.pattern
            && self.regex_mode == settings.regex
            && self.case_sensitive == settings.case_sensitive
            && self.whole_word == settings.whole_word_effective()
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_regex(&self) -> bool {
        self.regex_mode
    }

    pub fn is_whole_word(&self) -> bool {
        self.whole_word
    }

    pub(crate) fn finder(&self) -> &Regex {
        &self.finder
    }

    pub(crate) fn anchored(&self) -> &Regex {
        &self.anchored
    }

    /// Accepted match spans in `text`, leftmost-first and non-overlapping.
    pub fn spans<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (usize, usize)> + 't {
        self.finder
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .filter(move |&(start, end)| self.accepts(text, start, end))
    }

    pub(crate) fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        !self.whole_word || is_word_bounded(text, start, end)
    }
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether `text[start..end]` is neither preceded nor followed by a word character.
pub fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
