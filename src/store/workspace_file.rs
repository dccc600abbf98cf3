// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Single-file JSON snapshot of a [`Workspace`]: its open diagrams, the active diagram and
//! the current selection.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    Diagram, DiagramId, DiagramType, Element, ElementId, ElementKind, IdError, RootRegistry,
    Selection, Workspace,
};

use super::atomic::{write_atomic, WriteDurability};
use super::error::StoreError;

#[derive(Debug, Serialize, Deserialize)]
struct WorkspaceJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_diagram_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selection: Option<SelectionJson>,
    #[serde(default)]
    diagrams: Vec<DiagramJson>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SelectionJson {
    diagram_id: String,
    first: String,
    last: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DiagramJson {
    diagram_id: String,
    #[serde(default)]
    name: String,
    diagram_type: String,
    #[serde(default)]
    read_only: bool,
    root: ElementJson,
}

#[derive(Debug, Serialize, Deserialize)]
struct ElementJson {
    id: String,
    kind: String,
    #[serde(default)]
    text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    comment: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    disabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ElementJson>,
}

/// A workspace snapshot stored as one JSON document.
#[derive(Debug, Clone)]
pub struct WorkspaceFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl WorkspaceFile {
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

    pub fn load(&self) -> Result<Workspace, StoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let json: WorkspaceJson =
            serde_json::from_str(&contents).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        let mut workspace = Workspace::new();
        for diagram_json in json.diagrams {
            workspace.open(diagram_from_json(diagram_json)?);
        }
        if let Some(active) = json.active_diagram_id {
            let active = parse_id::<DiagramId>("active_diagram_id", active)?;
            if workspace.diagram(&active).is_some() {
                workspace.set_active_diagram_id(Some(active));
            } else {
                debug!(diagram_id = %active, "active diagram is not part of the workspace");
            }
        }
        if let Some(selection) = json.selection {
            workspace.select(Some(Selection::new(
                parse_id("selection.diagram_id", selection.diagram_id)?,
                parse_id("selection.first", selection.first)?,
                parse_id("selection.last", selection.last)?,
            )));
        }

        debug!(
            path = ?self.path,
            diagrams = workspace.diagrams().len(),
            "loaded workspace"
        );
        Ok(workspace)
    }

    pub fn save(&self, workspace: &Workspace) -> Result<(), StoreError> {
        let json = WorkspaceJson {
            active_diagram_id: workspace.active_diagram_id().map(ToString::to_string),
            selection: workspace.selection().map(|selection| SelectionJson {
                diagram_id: selection.diagram_id().to_string(),
                first: selection.first().to_string(),
                last: selection.last().to_string(),
            }),
            diagrams: workspace.diagrams().values().map(diagram_to_json).collect(),
        };
        let contents = serde_json::to_string_pretty(&json).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, format!("{contents}\n").as_bytes(), self.durability)
    }
}

fn parse_id<I>(field: &'static str, value: String) -> Result<I, StoreError>
where
    I: FromStr<Err = IdError>,
{
    value.parse().map_err(|source| StoreError::InvalidId {
        field,
        value,
        source,
    })
}

fn diagram_from_json(json: DiagramJson) -> Result<Diagram, StoreError> {
    let diagram_id = parse_id::<DiagramId>("diagram_id", json.diagram_id)?;
    let diagram_type = json.diagram_type.parse::<DiagramType>()?;
    let root = element_from_json(json.root)?;
    let name = if json.name.is_empty() {
        diagram_id.to_string()
    } else {
        json.name
    };

    let mut diagram = Diagram::new(diagram_id.clone(), name, diagram_type, root)
        .map_err(|source| StoreError::InvalidRoot { diagram_id, source })?;
    diagram.set_read_only(json.read_only);
    Ok(diagram)
}

fn element_from_json(json: ElementJson) -> Result<Element, StoreError> {
    let element_id = parse_id::<ElementId>("element id", json.id)?;
    let kind = json.kind.parse::<ElementKind>()?;
    let children = json
        .children
        .into_iter()
        .map(element_from_json)
        .collect::<Result<Vec<_>, _>>()?;

    let mut element = Element::new(element_id, kind, json.text)
        .with_comment(json.comment)
        .with_children(children);
    element.set_disabled(json.disabled);
    Ok(element)
}

fn diagram_to_json(diagram: &Diagram) -> DiagramJson {
    DiagramJson {
        diagram_id: diagram.diagram_id().to_string(),
        name: diagram.name().to_owned(),
        diagram_type: diagram.diagram_type().to_string(),
        read_only: diagram.is_read_only(),
        root: element_to_json(diagram.root()),
    }
}

fn element_to_json(element: &Element) -> ElementJson {
    ElementJson {
        id: element.element_id().to_string(),
        kind: element.kind().to_string(),
        text: element.text().to_owned(),
        comment: element.comment().to_owned(),
        disabled: element.is_disabled(),
        children: element.children().iter().map(element_to_json).collect(),
    }
}
