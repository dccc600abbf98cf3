// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persisted finder preferences.
//!
//! Stored as pretty JSON by [`PreferencesFile`]; [`FinderPreferences::to_properties`] and
//! [`FinderPreferences::from_properties`] map the same data onto flat ini-style keys.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{DiagramType, ElementKind};
use crate::search::{
    Direction, FindEngine, Granularity, PatternHistory, Scope, SearchSettings,
    MAX_RECENT_PATTERNS,
};

use super::atomic::{write_atomic, WriteDurability};
use super::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderPreferences {
    /// Newest first.
    pub search_patterns: Vec<String>,
    /// Newest first.
    pub replace_patterns: Vec<String>,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
    pub direction: Direction,
    pub granularity: Granularity,
    pub scope: Scope,
    pub diagram_types: BTreeSet<DiagramType>,
    pub element_kinds: BTreeSet<ElementKind>,
    pub in_text: bool,
    pub in_comment: bool,
    pub include_disabled: bool,
}

impl Default for FinderPreferences {
    fn default() -> Self {
        Self::from_parts(
            &SearchSettings::default(),
            &PatternHistory::default(),
            &PatternHistory::default(),
        )
    }
}

impl FinderPreferences {
    fn from_parts(
        settings: &SearchSettings,
        search_history: &PatternHistory,
        replace_history: &PatternHistory,
    ) -> Self {
        Self {
            search_patterns: search_history.iter().map(ToOwned::to_owned).collect(),
            replace_patterns: replace_history.iter().map(ToOwned::to_owned).collect(),
            case_sensitive: settings.case_sensitive,
            whole_word: settings.whole_word,
            regex: settings.regex,
            direction: settings.direction,
            granularity: settings.granularity,
            scope: settings.scope,
            diagram_types: settings.diagram_types.clone(),
            element_kinds: settings.element_kinds.clone(),
            in_text: settings.in_text,
            in_comment: settings.in_comment,
            include_disabled: settings.include_disabled,
        }
    }

    pub fn from_engine(engine: &FindEngine) -> Self {
        Self::from_parts(
            engine.settings(),
            engine.search_history(),
            engine.replace_history(),
        )
    }

    /// Settings with the most recent patterns preselected.
    pub fn search_settings(&self) -> SearchSettings {
        let mut settings = SearchSettings {
            pattern: self.search_patterns.first().cloned().unwrap_or_default(),
            replacement: self.replace_patterns.first().cloned().unwrap_or_default(),
            case_sensitive: self.case_sensitive,
            whole_word: self.whole_word,
            regex: self.regex,
            direction: self.direction,
            granularity: self.granularity,
            element_kinds: self.element_kinds.clone(),
            diagram_types: self.diagram_types.clone(),
            in_text: self.in_text,
            in_comment: self.in_comment,
            scope: self.scope,
            include_disabled: self.include_disabled,
        };
        settings.normalize();
        settings
    }

    pub fn into_engine(self) -> FindEngine {
        let settings = self.search_settings();
        let search = self.search_patterns.iter().collect::<PatternHistory>();
        let replace = self.replace_patterns.iter().collect::<PatternHistory>();
        FindEngine::new(settings).with_history(search, replace)
    }

    /// Flat key/value form. Flags are written as `1`/`0`.
    pub fn to_properties(&self) -> BTreeMap<String, String> {
        let flag = |value: bool| String::from(if value { "1" } else { "0" });
        let mut props = BTreeMap::new();

        for (index, pattern) in self.search_patterns.iter().take(MAX_RECENT_PATTERNS).enumerate() {
            props.insert(format!("searchPattern{}", index + 1), pattern.clone());
        }
        for (index, pattern) in self.replace_patterns.iter().take(MAX_RECENT_PATTERNS).enumerate() {
            props.insert(format!("replacePattern{}", index + 1), pattern.clone());
        }
        props.insert("findCaseSensitive".to_owned(), flag(self.case_sensitive));
        props.insert("findWholeWord".to_owned(), flag(self.whole_word));
        props.insert("findRegEx".to_owned(), flag(self.regex));
        let dir = match self.direction {
            Direction::Forward => "down",
            Direction::Backward => "up",
        };
        props.insert("searchDir".to_owned(), dir.to_owned());
        props.insert(
            "findElementwise".to_owned(),
            flag(self.granularity == Granularity::Elementwise),
        );
        props.insert("searchScope".to_owned(), self.scope.key_name().to_owned());
        for diagram_type in DiagramType::ALL {
            props.insert(
                format!("search{}", diagram_type.key_name()),
                flag(self.diagram_types.contains(&diagram_type)),
            );
        }
        for kind in ElementKind::ALL {
            props.insert(
                format!("find{}", kind.key_name()),
                flag(self.element_kinds.contains(&kind)),
            );
        }
        props.insert("findInTexts".to_owned(), flag(self.in_text));
        props.insert("findInComments".to_owned(), flag(self.in_comment));
        props.insert("findDisabled".to_owned(), flag(self.include_disabled));
        props
    }

    /// Reads the flat key/value form. Missing or malformed entries keep their defaults.
    pub fn from_properties(props: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| match props.get(key).map(|v| v.trim()) {
            Some("1") => true,
            Some("0") => false,
            Some(other) => {
                debug!(key, value = other, "ignoring malformed preference flag");
                default
            }
            None => default,
        };
        let patterns = |prefix: &str| {
            (1..=MAX_RECENT_PATTERNS)
                .filter_map(|index| props.get(&format!("{prefix}{index}")))
                .filter(|pattern| !pattern.is_empty())
                .cloned()
                .collect::<Vec<_>>()
        };

        let direction = match props.get("searchDir").map(String::as_str) {
            Some("up") => Direction::Backward,
            _ => Direction::Forward,
        };
        let granularity = if flag("findElementwise", defaults.granularity == Granularity::Elementwise) {
            Granularity::Elementwise
        } else {
            Granularity::Positional
        };
        let scope = props
            .get("searchScope")
            .and_then(|value| value.parse::<Scope>().ok())
            .unwrap_or(defaults.scope);

        let mut prefs = Self {
            search_patterns: patterns("searchPattern"),
            replace_patterns: patterns("replacePattern"),
            case_sensitive: flag("findCaseSensitive", defaults.case_sensitive),
            whole_word: flag("findWholeWord", defaults.whole_word),
            regex: flag("findRegEx", defaults.regex),
            direction,
            granularity,
            scope,
            diagram_types: DiagramType::ALL
                .into_iter()
                .filter(|t| flag(&format!("search{}", t.key_name()), true))
                .collect(),
            element_kinds: ElementKind::ALL
                .into_iter()
                .filter(|k| flag(&format!("find{}", k.key_name()), true))
                .collect(),
            in_text: flag("findInTexts", defaults.in_text),
            in_comment: flag("findInComments", defaults.in_comment),
            include_disabled: flag("findDisabled", defaults.include_disabled),
        };
        if !prefs.in_text && !prefs.in_comment {
            prefs.in_text = true;
        }
        prefs
    }
}

/// A JSON file holding [`FinderPreferences`].
#[derive(Debug, Clone)]
pub struct PreferencesFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl PreferencesFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the preferences; a missing file yields the defaults.
    pub fn load(&self) -> Result<FinderPreferences, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "no preferences file; using defaults");
                return Ok(FinderPreferences::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, prefs: &FinderPreferences) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(prefs).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, format!("{json}\n").as_bytes(), self.durability)
    }
}
