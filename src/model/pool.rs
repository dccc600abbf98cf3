// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The read/write contract the find engine needs from a diagram model.
//!
//! [`ElementModel`] covers per-node access, [`RootRegistry`] the set of open diagrams and
//! their change notifications. [`crate::model::Workspace`] implements both.

use std::sync::mpsc::{Receiver, TryRecvError};

use super::diagram::DiagramType;
use super::element::ElementKind;
use super::ids::{DiagramId, ElementId};
use super::node_ref::{NodeRef, Selection};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("unknown diagram {0}")]
    UnknownDiagram(DiagramId),
    #[error("unknown node {0}")]
    UnknownNode(NodeRef),
    #[error("diagram {0} is read-only")]
    ReadOnly(DiagramId),
}

pub trait ElementModel {
    fn text(&self, node: &NodeRef) -> Option<&str>;

    fn set_text(&mut self, node: &NodeRef, text: String) -> Result<(), ModelError>;

    fn comment(&self, node: &NodeRef) -> Option<&str>;

    fn set_comment(&mut self, node: &NodeRef, comment: String) -> Result<(), ModelError>;

    fn kind(&self, node: &NodeRef) -> Option<ElementKind>;

    /// Locked nodes can be found but not rewritten.
    fn is_locked(&self, node: &NodeRef) -> bool;

    fn is_disabled(&self, node: &NodeRef) -> bool;

    /// The root element of the diagram owning `node`.
    fn root_of(&self, node: &NodeRef) -> Option<NodeRef>;

    /// The root element of `diagram_id`.
    fn root_element(&self, diagram_id: &DiagramId) -> Option<ElementId>;

    /// Elements below the diagram root, depth-first when `deep`, else direct children only.
    fn children(&self, diagram_id: &DiagramId, deep: bool) -> Vec<ElementId>;

    /// The selected sibling range plus (when `deep`) everything nested inside it, in
    /// traversal order. `None` if the selection does not denote a sibling range.
    fn selected_elements(&self, selection: &Selection, deep: bool) -> Option<Vec<ElementId>>;

    /// Whether writes to `diagram_id` will be rejected with [`ModelError::ReadOnly`].
    fn is_read_only(&self, diagram_id: &DiagramId) -> bool;

    fn request_undo_checkpoint(&mut self, diagram_id: &DiagramId);

    /// Refreshes fields derived from the text form after a rewrite.
    fn notify_structural_change(&mut self, node: &NodeRef);
}

pub trait RootRegistry {
    /// Open diagrams in stable registration (alphabetic id) order.
    fn list_roots(&self) -> Vec<DiagramId>;

    fn root_type(&self, diagram_id: &DiagramId) -> Option<DiagramType>;

    fn active_root(&self) -> Option<&DiagramId>;

    fn selection(&self) -> Option<&Selection>;

    fn subscribe(&mut self) -> PoolSubscription;

    fn unsubscribe(&mut self, subscription_id: SubscriptionId);
}

/// Everything the engine needs from its host.
pub trait DiagramPool: ElementModel + RootRegistry {}

impl<T: ElementModel + RootRegistry + ?Sized> DiagramPool for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

/// Coarse "the pool changed" notification; carries no diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolChanged {
    pub generation: u64,
}

/// Receiving end of a registry subscription.
#[derive(Debug)]
pub struct PoolSubscription {
    subscription_id: SubscriptionId,
    events: Receiver<PoolChanged>,
}

impl PoolSubscription {
    pub fn new(subscription_id: SubscriptionId, events: Receiver<PoolChanged>) -> Self {
        Self {
            subscription_id,
            events,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.subscription_id
    }

    /// Consumes all pending events and returns the most recent one.
    pub fn drain(&self) -> Option<PoolChanged> {
        let mut latest = None;
        loop {
            match self.events.try_recv() {
                Ok(event) => latest = Some(event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return latest,
            }
        }
    }
}
