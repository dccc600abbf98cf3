// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::element::{Element, ElementKind};
use super::ids::DiagramId;

const MAX_UNDO_SNAPSHOTS: usize = 100;

/// The role of a diagram within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramType {
    Main,
    Sub,
    Includable,
}

impl DiagramType {
    pub const ALL: [DiagramType; 3] = [Self::Main, Self::Sub, Self::Includable];

    pub fn key_name(self) -> &'static str {
        match self {
            Self::Main => "MAIN",
            Self::Sub => "SUB",
            Self::Includable => "INCLUDABLE",
        }
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_name().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diagram type '{0}'")]
pub struct ParseDiagramTypeError(String);

impl FromStr for DiagramType {
    type Err = ParseDiagramTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.key_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDiagramTypeError(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("diagram root must be a Root element (found {found:?})")]
pub struct RootKindMismatch {
    found: ElementKind,
}

impl RootKindMismatch {
    pub fn found(&self) -> ElementKind {
        self.found
    }
}

/// A diagram: one tree of elements under a `Root` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    diagram_id: DiagramId,
    name: String,
    diagram_type: DiagramType,
    root: Element,
    rev: u64,
    read_only: bool,
    undo: VecDeque<Element>,
}

impl Diagram {
    pub fn new(
        diagram_id: DiagramId,
        name: impl Into<String>,
        diagram_type: DiagramType,
        root: Element,
    ) -> Result<Self, RootKindMismatch> {
        if root.kind() != ElementKind::Root {
            return Err(RootKindMismatch { found: root.kind() });
        }

        Ok(Self {
            diagram_id,
            name: name.into(),
            diagram_type,
            root,
            rev: 0,
            read_only: false,
            undo: VecDeque::new(),
        })
    }

    pub fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn diagram_type(&self) -> DiagramType {
        self.diagram_type
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Records a snapshot of the element tree that [`Diagram::undo`] can restore.
    pub fn add_undo(&mut self) {
        if self.undo.len() == MAX_UNDO_SNAPSHOTS {
            self.undo.pop_front();
        }
        self.undo.push_back(self.root.clone());
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo.pop_back() else {
            return false;
        };
        self.root = snapshot;
        self.bump_rev();
        true
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }
}
