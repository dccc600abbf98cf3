// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::{DiagramId, ElementId, IdError};

/// Stable reference to one element inside one diagram of the workspace.
///
/// Canonical format: `d:<diagram_id>/<element_id>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef {
    diagram_id: DiagramId,
    element_id: ElementId,
}

impl NodeRef {
    pub fn new(diagram_id: DiagramId, element_id: ElementId) -> Self {
        Self {
            diagram_id,
            element_id,
        }
    }

    pub fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    pub fn element_id(&self) -> &ElementId {
        &self.element_id
    }

    pub fn parse(input: &str) -> Result<Self, ParseNodeRefError> {
        const PREFIX: &str = "d:";
        let rest = input
            .strip_prefix(PREFIX)
            .ok_or(ParseNodeRefError::MissingPrefix)?;

        let (diagram_id_str, element_id_str) = rest
            .split_once('/')
            .ok_or(ParseNodeRefError::MissingElementId)?;

        if diagram_id_str.is_empty() {
            return Err(ParseNodeRefError::MissingDiagramId);
        }
        if element_id_str.is_empty() {
            return Err(ParseNodeRefError::MissingElementId);
        }

        let diagram_id = DiagramId::new(diagram_id_str.to_owned())
            .map_err(ParseNodeRefError::InvalidDiagramId)?;
        let element_id = ElementId::new(element_id_str.to_owned())
            .map_err(ParseNodeRefError::InvalidElementId)?;

        Ok(Self {
            diagram_id,
            element_id,
        })
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d:{}/{}", self.diagram_id, self.element_id)
    }
}

impl FromStr for NodeRef {
    type Err = ParseNodeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNodeRefError {
    #[error("node ref must start with 'd:'")]
    MissingPrefix,
    #[error("node ref is missing diagram id")]
    MissingDiagramId,
    #[error("node ref is missing element id")]
    MissingElementId,
    #[error("invalid diagram id: {0}")]
    InvalidDiagramId(IdError),
    #[error("invalid element id: {0}")]
    InvalidElementId(IdError),
}

/// A contiguous run of sibling elements inside one diagram.
///
/// `first == last` denotes a single selected element; selecting the diagram's root element
/// stands for the whole diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    diagram_id: DiagramId,
    first: ElementId,
    last: ElementId,
}

impl Selection {
    pub fn new(diagram_id: DiagramId, first: ElementId, last: ElementId) -> Self {
        Self {
            diagram_id,
            first,
            last,
        }
    }

    pub fn single(diagram_id: DiagramId, element_id: ElementId) -> Self {
        Self {
            diagram_id,
            first: element_id.clone(),
            last: element_id,
        }
    }

    pub fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    pub fn first(&self) -> &ElementId {
        &self.first
    }

    pub fn last(&self) -> &ElementId {
        &self.last
    }
}
