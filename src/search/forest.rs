// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The two-level result structure: one tree per diagram, one leaf per matching node.

use tracing::debug;

use crate::model::{DiagramId, DiagramPool, ElementId, NodeRef};

use super::count::count_matches;
use super::matcher::Matcher;
use super::settings::{Scope, SearchSettings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTree {
    diagram_id: DiagramId,
    leaves: Vec<NodeRef>,
}

impl ResultTree {
    pub fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    pub fn leaves(&self) -> &[NodeRef] {
        &self.leaves
    }
}

/// Matching nodes grouped by diagram, in traversal order. Leaves are addressed by their
/// index in the flattened order, which is what forward/backward traversal walks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultForest {
    trees: Vec<ResultTree>,
    leaf_count: usize,
}

impl ResultForest {
    /// Collects every node in scope with at least one match.
    ///
    /// `AllOpenRoots` visits open diagrams whose type is enabled; `CurrentRoot` the active
    /// diagram; `CurrentSelection` the selected sibling range, falling back to the whole
    /// active diagram when nothing (or the root itself) is selected. Diagram roots are
    /// included first when they match, except for strict sub-selections.
    pub fn build<P: DiagramPool + ?Sized>(
        pool: &P,
        settings: &SearchSettings,
        matcher: &Matcher,
    ) -> Self {
        let mut forest = Self::default();
        match settings.scope {
            Scope::AllOpenRoots => {
                for diagram_id in pool.list_roots() {
                    let enabled = pool
                        .root_type(&diagram_id)
                        .is_some_and(|t| settings.diagram_types.contains(&t));
                    if enabled {
                        forest.push_diagram(pool, &diagram_id, settings, matcher);
                    }
                }
            }
            Scope::CurrentRoot => {
                if let Some(diagram_id) = pool.active_root() {
                    forest.push_diagram(pool, diagram_id, settings, matcher);
                }
            }
            Scope::CurrentSelection => match pool.selection() {
                Some(selection)
                    if pool.root_element(selection.diagram_id()).as_ref()
                        == Some(selection.first()) =>
                {
                    forest.push_diagram(pool, selection.diagram_id(), settings, matcher);
                }
                Some(selection) => match pool.selected_elements(selection, true) {
                    Some(elements) => {
                        forest.push_tree(pool, selection.diagram_id(), elements, settings, matcher);
                    }
                    None => {
                        debug!(
                            diagram = %selection.diagram_id(),
                            "selection is not a sibling range; searching its diagram"
                        );
                        forest.push_diagram(pool, selection.diagram_id(), settings, matcher);
                    }
                },
                None => {
                    if let Some(diagram_id) = pool.active_root() {
                        forest.push_diagram(pool, diagram_id, settings, matcher);
                    }
                }
            },
        }
        forest
    }

    fn push_diagram<P: DiagramPool + ?Sized>(
        &mut self,
        pool: &P,
        diagram_id: &DiagramId,
        settings: &SearchSettings,
        matcher: &Matcher,
    ) {
        let mut elements = pool.root_element(diagram_id).into_iter().collect::<Vec<_>>();
        elements.extend(pool.children(diagram_id, true));
        self.push_tree(pool, diagram_id, elements, settings, matcher);
    }

    fn push_tree<P: DiagramPool + ?Sized>(
        &mut self,
        pool: &P,
        diagram_id: &DiagramId,
        elements: Vec<ElementId>,
        settings: &SearchSettings,
        matcher: &Matcher,
    ) {
        let leaves = elements
            .into_iter()
            .map(|element_id| NodeRef::new(diagram_id.clone(), element_id))
            .filter(|node| count_matches(pool, node, settings, matcher) > 0)
            .collect::<Vec<_>>();
        if leaves.is_empty() {
            return;
        }
        self.leaf_count += leaves.len();
        self.trees.push(ResultTree {
            diagram_id: diagram_id.clone(),
            leaves,
        });
    }

    pub fn trees(&self) -> &[ResultTree] {
        &self.trees
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn leaf(&self, index: usize) -> Option<&NodeRef> {
        let mut index = index;
        for tree in &self.trees {
            if index < tree.leaves.len() {
                return tree.leaves.get(index);
            }
            index -= tree.leaves.len();
        }
        None
    }

    pub fn leaves(&self) -> impl Iterator<Item = &NodeRef> + '_ {
        self.trees.iter().flat_map(|tree| tree.leaves.iter())
    }

    pub fn position_of(&self, node: &NodeRef) -> Option<usize> {
        self.leaves().position(|leaf| leaf == node)
    }

    pub fn first_leaf(&self) -> Option<usize> {
        (!self.is_empty()).then_some(0)
    }

    pub fn last_leaf(&self) -> Option<usize> {
        self.leaf_count.checked_sub(1)
    }

    pub fn next_leaf(&self, index: usize) -> Option<usize> {
        let next = index.checked_add(1)?;
        (next < self.leaf_count).then_some(next)
    }

    pub fn previous_leaf(&self, index: usize) -> Option<usize> {
        index.checked_sub(1).filter(|&prev| prev < self.leaf_count)
    }
}
