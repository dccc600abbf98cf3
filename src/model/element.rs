// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ids::ElementId;

/// Structogram element kinds. Each kind can be switched on or off in the element filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Root,
    Instruction,
    Alternative,
    Case,
    For,
    While,
    Repeat,
    Forever,
    Call,
    Jump,
    Parallel,
}

impl ElementKind {
    pub const ALL: [ElementKind; 11] = [
        Self::Root,
        Self::Instruction,
        Self::Alternative,
        Self::Case,
        Self::For,
        Self::While,
        Self::Repeat,
        Self::Forever,
        Self::Call,
        Self::Jump,
        Self::Parallel,
    ];

    /// Upper-case name used in persisted preference keys (`findINSTRUCTION`, ...).
    pub fn key_name(self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Instruction => "INSTRUCTION",
            Self::Alternative => "ALTERNATIVE",
            Self::Case => "CASE",
            Self::For => "FOR",
            Self::While => "WHILE",
            Self::Repeat => "REPEAT",
            Self::Forever => "FOREVER",
            Self::Call => "CALL",
            Self::Jump => "JUMP",
            Self::Parallel => "PARALLEL",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_name().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element kind '{0}'")]
pub struct ParseElementKindError(String);

impl FromStr for ElementKind {
    type Err = ParseElementKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseElementKindError(s.to_owned()))
    }
}

/// Loop bounds parsed out of a `For` element's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForHeader {
    pub variable: String,
    pub start: String,
    pub end: String,
    pub step: String,
}

impl ForHeader {
    pub fn parse(text: &str) -> Option<Self> {
        static HEADER: OnceLock<Regex> = OnceLock::new();
        let header = HEADER.get_or_init(|| {
            Regex::new(
                r"(?i)^\s*for\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?:<-|:=|=)\s*(.+?)\s+to\s+(.+?)(?:\s+step\s+(.+?))?\s*$",
            )
            .expect("for header regex")
        });

        let first_line = text.lines().next()?;
        let caps = header.captures(first_line)?;
        Some(Self {
            variable: caps[1].to_owned(),
            start: caps[2].to_owned(),
            end: caps[3].to_owned(),
            step: caps.get(4).map_or_else(|| "1".to_owned(), |m| m.as_str().to_owned()),
        })
    }
}

/// A single diagram element with its two searchable text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    element_id: ElementId,
    kind: ElementKind,
    text: String,
    comment: String,
    disabled: bool,
    executing: bool,
    children: Vec<Element>,
    for_header: Option<ForHeader>,
}

impl Element {
    pub fn new(element_id: ElementId, kind: ElementKind, text: impl Into<String>) -> Self {
        let mut element = Self {
            element_id,
            kind,
            text: text.into(),
            comment: String::new(),
            disabled: false,
            executing: false,
            children: Vec::new(),
            for_header: None,
        };
        element.refresh_derived();
        element
    }

    pub fn element_id(&self) -> &ElementId {
        &self.element_id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text. Derived fields are only refreshed by [`Element::refresh_derived`].
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Whether the element is currently under execution (and therefore locked).
    pub fn is_executing(&self) -> bool {
        self.executing
    }

    pub fn set_executing(&mut self, executing: bool) {
        self.executing = executing;
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn for_header(&self) -> Option<&ForHeader> {
        self.for_header.as_ref()
    }

    /// Recomputes the fields derived from the text form.
    pub fn refresh_derived(&mut self) {
        self.for_header = match self.kind {
            ElementKind::For => ForHeader::parse(&self.text),
            _ => None,
        };
    }

    pub fn find(&self, element_id: &ElementId) -> Option<&Element> {
        if &self.element_id == element_id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(element_id))
    }

    pub fn find_mut(&mut self, element_id: &ElementId) -> Option<&mut Element> {
        if &self.element_id == element_id {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(element_id))
    }

    /// Returns the element whose direct children include `element_id`.
    pub fn parent_of(&self, element_id: &ElementId) -> Option<&Element> {
        if self.children.iter().any(|c| &c.element_id == element_id) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.parent_of(element_id))
    }

    /// Collects the ids of all descendants in depth-first pre-order (self excluded).
    pub fn collect_descendants(&self, out: &mut Vec<ElementId>) {
        for child in &self.children {
            out.push(child.element_id.clone());
            child.collect_descendants(out);
        }
    }
}
