// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{ElementModel, NodeRef};
use crate::search::count::is_eligible;
use crate::search::matcher::Matcher;
use crate::search::settings::{Field, SearchSettings};
use crate::search::split::{split, SplitText};

/// Cached split of the node under the cursor. Match positions run through the text field
/// first, then the comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct NodeSplits {
    node: NodeRef,
    text: Option<SplitText>,
    comment: Option<SplitText>,
}

impl NodeSplits {
    pub(super) fn compute<M: ElementModel + ?Sized>(
        model: &M,
        node: &NodeRef,
        settings: &SearchSettings,
        matcher: &Matcher,
    ) -> Self {
        let eligible = is_eligible(model, node, settings);
        let field_split = |field: Field| {
            settings.field_enabled(field).then(|| {
                let live = field.read(model, node).unwrap_or_default();
                if eligible {
                    split(live, matcher)
                } else {
                    SplitText::unsplit(live)
                }
            })
        };
        Self {
            node: node.clone(),
            text: field_split(Field::Text),
            comment: field_split(Field::Comment),
        }
    }

    pub(super) fn node(&self) -> &NodeRef {
        &self.node
    }

    pub(super) fn field(&self, field: Field) -> Option<&SplitText> {
        match field {
            Field::Text => self.text.as_ref(),
            Field::Comment => self.comment.as_ref(),
        }
    }

    pub(super) fn field_mut(&mut self, field: Field) -> Option<&mut SplitText> {
        match field {
            Field::Text => self.text.as_mut(),
            Field::Comment => self.comment.as_mut(),
        }
    }

    fn count(&self, field: Field) -> usize {
        self.field(field).map_or(0, SplitText::match_count)
    }

    pub(super) fn total(&self) -> usize {
        self.count(Field::Text) + self.count(Field::Comment)
    }

    /// Maps a node-wide match position to its field and field-local index.
    pub(super) fn locate(&self, position: usize) -> Option<(Field, usize)> {
        let in_text = self.count(Field::Text);
        if position < in_text {
            return Some((Field::Text, position));
        }
        let local = position - in_text;
        (local < self.count(Field::Comment)).then_some((Field::Comment, local))
    }

    /// Fields that still contain matches.
    pub(super) fn matching_fields(&self) -> Vec<Field> {
        [Field::Text, Field::Comment]
            .into_iter()
            .filter(|&field| self.count(field) > 0)
            .collect()
    }

    /// Whether every cached field still concatenates to the live text of the node.
    pub(super) fn is_current<M: ElementModel + ?Sized>(&self, model: &M) -> bool {
        [Field::Text, Field::Comment].into_iter().all(|field| {
            self.field(field).map_or(true, |cached| {
                cached.concatenate() == field.read(model, &self.node).unwrap_or_default()
            })
        })
    }
}
