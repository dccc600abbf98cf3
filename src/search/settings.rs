// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{DiagramType, ElementKind, ElementModel, ModelError, NodeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Whether the cursor addresses whole nodes or individual matches inside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Elementwise,
    #[default]
    Positional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    CurrentSelection,
    #[default]
    CurrentRoot,
    AllOpenRoots,
}

impl Scope {
    pub fn key_name(self) -> &'static str {
        match self {
            Self::CurrentSelection => "CURRENT_SELECTION",
            Self::CurrentRoot => "CURRENT_DIAGRAM",
            Self::AllOpenRoots => "OPENED_DIAGRAMS",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search scope '{0}'")]
pub struct ParseScopeError(String);

impl FromStr for Scope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::CurrentSelection, Self::CurrentRoot, Self::AllOpenRoots]
            .into_iter()
            .find(|scope| scope.key_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseScopeError(s.to_owned()))
    }
}

/// The two searchable text fields of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Text,
    Comment,
}

impl Field {
    pub fn read<'a, M: ElementModel + ?Sized>(self, model: &'a M, node: &NodeRef) -> Option<&'a str> {
        match self {
            Self::Text => model.text(node),
            Self::Comment => model.comment(node),
        }
    }

    pub fn write<M: ElementModel + ?Sized>(
        self,
        model: &mut M,
        node: &NodeRef,
        value: String,
    ) -> Result<(), ModelError> {
        match self {
            Self::Text => model.set_text(node, value),
            Self::Comment => model.set_comment(node, value),
        }
    }
}

/// Current pattern, modes and filters of the find engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub pattern: String,
    pub replacement: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
    pub direction: Direction,
    pub granularity: Granularity,
    pub element_kinds: BTreeSet<ElementKind>,
    pub diagram_types: BTreeSet<DiagramType>,
    pub in_text: bool,
    pub in_comment: bool,
    pub scope: Scope,
    pub include_disabled: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            replacement: String::new(),
            case_sensitive: false,
            whole_word: false,
            regex: false,
            direction: Direction::Forward,
            granularity: Granularity::Positional,
            element_kinds: ElementKind::ALL.into_iter().collect(),
            diagram_types: DiagramType::ALL.into_iter().collect(),
            in_text: true,
            in_comment: true,
            scope: Scope::CurrentRoot,
            include_disabled: true,
        }
    }
}

impl SearchSettings {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Applies a partial update and reports whether anything changed.
    ///
    /// At least one of `in_text`/`in_comment` stays enabled: switching one off while the
    /// other is already off turns the other one back on.
    pub fn apply(&mut self, patch: SearchPatch) -> bool {
        let before = self.clone();

        if let Some(pattern) = patch.pattern {
            self.pattern = pattern;
        }
        if let Some(replacement) = patch.replacement {
            self.replacement = replacement;
        }
        if let Some(case_sensitive) = patch.case_sensitive {
            self.case_sensitive = case_sensitive;
        }
        if let Some(whole_word) = patch.whole_word {
            self.whole_word = whole_word;
        }
        if let Some(regex) = patch.regex {
            self.regex = regex;
        }
        if let Some(direction) = patch.direction {
            self.direction = direction;
        }
        if let Some(granularity) = patch.granularity {
            self.granularity = granularity;
        }
        if let Some(element_kinds) = patch.element_kinds {
            self.element_kinds = element_kinds;
        }
        if let Some(diagram_types) = patch.diagram_types {
            self.diagram_types = diagram_types;
        }
        if let Some(scope) = patch.scope {
            self.scope = scope;
        }
        if let Some(include_disabled) = patch.include_disabled {
            self.include_disabled = include_disabled;
        }

        match (patch.in_text, patch.in_comment) {
            (Some(in_text), Some(in_comment)) => {
                self.in_text = in_text;
                self.in_comment = in_comment || !in_text;
            }
            (Some(in_text), None) => {
                self.in_text = in_text;
                if !in_text {
                    self.in_comment = true;
                }
            }
            (None, Some(in_comment)) => {
                self.in_comment = in_comment;
                if !in_comment {
                    self.in_text = true;
                }
            }
            (None, None) => {}
        }
        self.normalize();

        *self != before
    }

    pub(crate) fn normalize(&mut self) {
        if !self.in_text && !self.in_comment {
            self.in_text = true;
        }
    }

    /// Whole-word matching only applies to literal searches and to regexes that are a
    /// plain identifier.
    pub fn whole_word_effective(&self) -> bool {
        self.whole_word && (!self.regex || is_identifier(&self.pattern))
    }

    pub fn whole_word_available(&self) -> bool {
        !self.regex || is_identifier(&self.pattern)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        [(Field::Text, self.in_text), (Field::Comment, self.in_comment)]
            .into_iter()
            .filter_map(|(field, enabled)| enabled.then_some(field))
    }

    pub fn field_enabled(&self, field: Field) -> bool {
        match field {
            Field::Text => self.in_text,
            Field::Comment => self.in_comment,
        }
    }

    pub fn set_all_element_kinds(&mut self, selected: bool) {
        self.element_kinds = if selected {
            ElementKind::ALL.into_iter().collect()
        } else {
            BTreeSet::new()
        };
    }
}

/// Partial update of [`SearchSettings`]; `None` leaves a setting unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPatch {
    pub pattern: Option<String>,
    pub replacement: Option<String>,
    pub case_sensitive: Option<bool>,
    pub whole_word: Option<bool>,
    pub regex: Option<bool>,
    pub direction: Option<Direction>,
    pub granularity: Option<Granularity>,
    pub element_kinds: Option<BTreeSet<ElementKind>>,
    pub diagram_types: Option<BTreeSet<DiagramType>>,
    pub in_text: Option<bool>,
    pub in_comment: Option<bool>,
    pub scope: Option<Scope>,
    pub include_disabled: Option<bool>,
}

impl SearchPatch {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }
}

pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{is_identifier, Field, Scope, SearchPatch, SearchSettings};

    #[test]
    fn switching_off_the_only_enabled_field_flips_the_other_on() {
        let mut settings = SearchSettings::default();
        settings.apply(SearchPatch {
            in_comment: Some(false),
            ..SearchPatch::default()
        });
        assert!(settings.in_text && !settings.in_comment);

        let changed = settings.apply(SearchPatch {
            in_text: Some(false),
            ..SearchPatch::default()
        });
        assert!(changed);
        assert!(!settings.in_text);
        assert!(settings.in_comment);
        assert_eq!(settings.fields().collect::<Vec<_>>(), vec![Field::Comment]);
    }

    #[test]
    fn switching_both_fields_off_keeps_text() {
        let mut settings = SearchSettings::default();
        settings.apply(SearchPatch {
            in_text: Some(false),
            in_comment: Some(false),
            ..SearchPatch::default()
        });
        assert!(!settings.in_text);
        assert!(settings.in_comment);
    }

    #[test]
    fn identical_patch_reports_no_change() {
        let mut settings = SearchSettings::new("count");
        assert!(!settings.apply(SearchPatch::pattern("count")));
        assert!(settings.apply(SearchPatch::pattern("counter")));
    }

    #[rstest]
    #[case("cat", false, true)]
    #[case("cat", true, true)]
    #[case("c.t", true, false)]
    #[case("c t", false, true)]
    fn whole_word_applies_to_literals_and_identifier_regexes(
        #[case] pattern: &str,
        #[case] regex: bool,
        #[case] effective: bool,
    ) {
        let settings = SearchSettings {
            whole_word: true,
            regex,
            ..SearchSettings::new(pattern)
        };
        assert_eq!(settings.whole_word_effective(), effective);
    }

    #[rstest]
    #[case("x", true)]
    #[case("_tmp1", true)]
    #[case("1x", false)]
    #[case("", false)]
    #[case("a-b", false)]
    fn identifiers_are_ascii_words(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_identifier(value), expected);
    }

    #[test]
    fn scope_parses_persisted_names() {
        assert_eq!("OPENED_DIAGRAMS".parse::<Scope>(), Ok(Scope::AllOpenRoots));
        assert_eq!(Scope::CurrentRoot.to_string(), "CURRENT_DIAGRAM");
        assert!("everything".parse::<Scope>().is_err());
    }
}
