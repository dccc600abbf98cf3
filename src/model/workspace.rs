// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Sender};

use super::diagram::{Diagram, DiagramType};
use super::element::{Element, ElementKind};
use super::ids::{DiagramId, ElementId};
use super::node_ref::{NodeRef, Selection};
use super::pool::{
    ElementModel, ModelError, PoolChanged, PoolSubscription, RootRegistry, SubscriptionId,
};

/// The registry of open diagrams the find engine runs against.
#[derive(Debug, Default)]
pub struct Workspace {
    diagrams: BTreeMap<DiagramId, Diagram>,
    active_diagram_id: Option<DiagramId>,
    selection: Option<Selection>,
    subscribers: Vec<(SubscriptionId, Sender<PoolChanged>)>,
    next_subscription_id: u64,
    generation: u64,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagrams(&self) -> &BTreeMap<DiagramId, Diagram> {
        &self.diagrams
    }

    pub fn diagram(&self, diagram_id: &DiagramId) -> Option<&Diagram> {
        self.diagrams.get(diagram_id)
    }

    /// Opens (or replaces) a diagram. The first opened diagram becomes active.
    pub fn open(&mut self, diagram: Diagram) {
        let diagram_id = diagram.diagram_id().clone();
        self.diagrams.insert(diagram_id.clone(), diagram);
        if self.active_diagram_id.is_none() {
            self.active_diagram_id = Some(diagram_id);
        }
        self.notify_pool_changed();
    }

    pub fn close(&mut self, diagram_id: &DiagramId) -> Option<Diagram> {
        let removed = self.diagrams.remove(diagram_id)?;
        if self.active_diagram_id.as_ref() == Some(diagram_id) {
            self.active_diagram_id = self.diagrams.keys().next().cloned();
        }
        if self
            .selection
            .as_ref()
            .is_some_and(|s| s.diagram_id() == diagram_id)
        {
            self.selection = None;
        }
        self.notify_pool_changed();
        Some(removed)
    }

    pub fn active_diagram_id(&self) -> Option<&DiagramId> {
        self.active_diagram_id.as_ref()
    }

    pub fn set_active_diagram_id(&mut self, diagram_id: Option<DiagramId>) {
        self.active_diagram_id = diagram_id;
    }

    pub fn select(&mut self, selection: Option<Selection>) {
        if let Some(selection) = &selection {
            self.active_diagram_id = Some(selection.diagram_id().clone());
        }
        self.selection = selection;
    }

    pub fn element(&self, node: &NodeRef) -> Option<&Element> {
        self.diagrams
            .get(node.diagram_id())?
            .root()
            .find(node.element_id())
    }

    /// Applies `edit` to one element, e.g. to lock or disable it.
    pub fn edit_element(
        &mut self,
        node: &NodeRef,
        edit: impl FnOnce(&mut Element),
    ) -> Result<(), ModelError> {
        edit(self.element_mut(node)?);
        self.notify_pool_changed();
        Ok(())
    }

    /// Reverts the last undo checkpoint of a diagram.
    pub fn undo(&mut self, diagram_id: &DiagramId) -> bool {
        let undone = self
            .diagrams
            .get_mut(diagram_id)
            .is_some_and(Diagram::undo);
        if undone {
            self.notify_pool_changed();
        }
        undone
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn notify_pool_changed(&mut self) {
        self.generation = self.generation.saturating_add(1);
        let event = PoolChanged {
            generation: self.generation,
        };
        self.subscribers
            .retain(|(_, sender)| sender.send(event).is_ok());
    }

    fn element_mut(&mut self, node: &NodeRef) -> Result<&mut Element, ModelError> {
        let diagram = self
            .diagrams
            .get_mut(node.diagram_id())
            .ok_or_else(|| ModelError::UnknownDiagram(node.diagram_id().clone()))?;
        if diagram.is_read_only() {
            return Err(ModelError::ReadOnly(node.diagram_id().clone()));
        }
        if diagram.root().find(node.element_id()).is_none() {
            return Err(ModelError::UnknownNode(node.clone()));
        }
        diagram.bump_rev();
        diagram
            .root_mut()
            .find_mut(node.element_id())
            .ok_or_else(|| ModelError::UnknownNode(node.clone()))
    }
}

impl ElementModel for Workspace {
    fn text(&self, node: &NodeRef) -> Option<&str> {
        self.element(node).map(Element::text)
    }

    fn set_text(&mut self, node: &NodeRef, text: String) -> Result<(), ModelError> {
        self.element_mut(node)?.set_text(text);
        self.notify_pool_changed();
        Ok(())
    }

    fn comment(&self, node: &NodeRef) -> Option<&str> {
        self.element(node).map(Element::comment)
    }

    fn set_comment(&mut self, node: &NodeRef, comment: String) -> Result<(), ModelError> {
        self.element_mut(node)?.set_comment(comment);
        self.notify_pool_changed();
        Ok(())
    }

    fn kind(&self, node: &NodeRef) -> Option<ElementKind> {
        self.element(node).map(Element::kind)
    }

    fn is_locked(&self, node: &NodeRef) -> bool {
        self.element(node).is_some_and(Element::is_executing)
    }

    fn is_disabled(&self, node: &NodeRef) -> bool {
        self.element(node).is_some_and(Element::is_disabled)
    }

    fn root_of(&self, node: &NodeRef) -> Option<NodeRef> {
        let root_id = self.root_element(node.diagram_id())?;
        Some(NodeRef::new(node.diagram_id().clone(), root_id))
    }

    fn root_element(&self, diagram_id: &DiagramId) -> Option<ElementId> {
        self.diagrams
            .get(diagram_id)
            .map(|d| d.root().element_id().clone())
    }

    fn children(&self, diagram_id: &DiagramId, deep: bool) -> Vec<ElementId> {
        let Some(diagram) = self.diagrams.get(diagram_id) else {
            return Vec::new();
        };
        if deep {
            let mut ids = Vec::new();
            diagram.root().collect_descendants(&mut ids);
            ids
        } else {
            diagram
                .root()
                .children()
                .iter()
                .map(|c| c.element_id().clone())
                .collect()
        }
    }

    fn selected_elements(&self, selection: &Selection, deep: bool) -> Option<Vec<ElementId>> {
        let root = self.diagrams.get(selection.diagram_id())?.root();
        let parent = root.parent_of(selection.first())?;
        let siblings = parent.children();
        let first = siblings
            .iter()
            .position(|c| c.element_id() == selection.first())?;
        let last = siblings
            .iter()
            .position(|c| c.element_id() == selection.last())?;
        let (from, to) = if first <= last {
            (first, last)
        } else {
            (last, first)
        };

        let mut ids = Vec::new();
        for sibling in &siblings[from..=to] {
            ids.push(sibling.element_id().clone());
            if deep {
                sibling.collect_descendants(&mut ids);
            }
        }
        Some(ids)
    }

    fn is_read_only(&self, diagram_id: &DiagramId) -> bool {
        self.diagrams.get(diagram_id).is_some_and(Diagram::is_read_only)
    }

    fn request_undo_checkpoint(&mut self, diagram_id: &DiagramId) {
        if let Some(diagram) = self.diagrams.get_mut(diagram_id) {
            diagram.add_undo();
        }
    }

    fn notify_structural_change(&mut self, node: &NodeRef) {
        if let Some(element) = self
            .diagrams
            .get_mut(node.diagram_id())
            .and_then(|d| d.root_mut().find_mut(node.element_id()))
        {
            element.refresh_derived();
        }
    }
}

impl RootRegistry for Workspace {
    fn list_roots(&self) -> Vec<DiagramId> {
        self.diagrams.keys().cloned().collect()
    }

    fn root_type(&self, diagram_id: &DiagramId) -> Option<DiagramType> {
        self.diagrams.get(diagram_id).map(Diagram::diagram_type)
    }

    fn active_root(&self) -> Option<&DiagramId> {
        self.active_diagram_id.as_ref()
    }

    fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    fn subscribe(&mut self) -> PoolSubscription {
        let subscription_id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id = self.next_subscription_id.saturating_add(1);
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push((subscription_id, sender));
        PoolSubscription::new(subscription_id, receiver)
    }

    fn unsubscribe(&mut self, subscription_id: SubscriptionId) {
        self.subscribers.retain(|(id, _)| *id != subscription_id);
    }
}
