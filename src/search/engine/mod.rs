// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The stateful find/replace session.
//!
//! A [`FindEngine`] owns the search settings, the result forest of the last discovery and
//! a cursor into it. Every action runs to completion on the calling thread; the only
//! outside input is the pool's change notification, which is honoured between actions and
//! ignored while the engine's own replacement is being written back.

mod splits;

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::model::{DiagramPool, ElementModel, NodeRef, PoolSubscription};

use super::count::count_matches;
use super::error::{NodeUpdateFailure, SearchError};
use super::forest::ResultForest;
use super::history::PatternHistory;
use super::matcher::Matcher;
use super::preview::{field_spans, MatchPreview, PreviewSpan};
use super::replace::{replace, ReplaceTarget};
use super::settings::{Direction, Field, Granularity, Scope, SearchPatch, SearchSettings};
use splits::NodeSplits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No forest; the next find starts a new discovery.
    #[default]
    Idle,
    Building,
    Positioned,
    /// A replacement is being written back; pool notifications are dropped.
    Replacing,
}

/// Where the engine currently points: a leaf of the forest and, unless searching
/// elementwise, the index of a match within that node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    leaf: usize,
    node: NodeRef,
    position: Option<usize>,
}

impl Cursor {
    pub fn leaf(&self) -> usize {
        self.leaf
    }

    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// `None` in elementwise mode.
    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceAllSummary {
    /// Individual matches replaced.
    pub replaced: usize,
    /// Distinct nodes rewritten.
    pub nodes: usize,
    pub failures: Vec<NodeUpdateFailure>,
}

#[derive(Debug, Default)]
struct StepOutcome {
    replaced: usize,
    found: bool,
    failure: Option<NodeUpdateFailure>,
}

#[derive(Debug, Default)]
struct ReplaceStep {
    replaced: usize,
    failure: Option<NodeUpdateFailure>,
}

#[derive(Debug, Default)]
pub struct FindEngine {
    settings: SearchSettings,
    search_history: PatternHistory,
    replace_history: PatternHistory,
    matcher: Option<Matcher>,
    forest: Option<ResultForest>,
    cursor: Option<Cursor>,
    splits: Option<NodeSplits>,
    phase: Phase,
    subscription: Option<PoolSubscription>,
}

impl FindEngine {
    pub fn new(settings: SearchSettings) -> Self {
        let mut settings = settings;
        settings.normalize();
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn with_history(mut self, search: PatternHistory, replace: PatternHistory) -> Self {
        self.search_history = search;
        self.replace_history = replace;
        self
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn current_node(&self) -> Option<&NodeRef> {
        self.cursor.as_ref().map(Cursor::node)
    }

    pub fn current_position(&self) -> Option<usize> {
        self.cursor.as_ref().and_then(Cursor::position)
    }

    pub fn forest(&self) -> Option<&ResultForest> {
        self.forest.as_ref()
    }

    pub fn search_history(&self) -> &PatternHistory {
        &self.search_history
    }

    pub fn replace_history(&self) -> &PatternHistory {
        &self.replace_history
    }

    /// Remembers the current search pattern in the recent-patterns list.
    pub fn record_search_pattern(&mut self) {
        self.search_history.record(&self.settings.pattern);
    }

    pub fn record_replace_pattern(&mut self) {
        self.replace_history.record(&self.settings.replacement);
    }

    /// Applies a settings change. Any change discards the current results.
    pub fn update(&mut self, patch: SearchPatch) -> bool {
        let changed = self.settings.apply(patch);
        if changed {
            debug!(pattern = %self.settings.pattern, scope = %self.settings.scope, "search settings changed");
        }
        self.reset_results();
        changed
    }

    pub fn select_all_element_kinds(&mut self, selected: bool) {
        self.settings.set_all_element_kinds(selected);
        self.reset_results();
    }

    /// Returns to [`Phase::Idle`], dropping forest, cursor and cached splits.
    pub fn reset_results(&mut self) {
        self.forest = None;
        self.cursor = None;
        self.splits = None;
        self.phase = Phase::Idle;
    }

    /// Inbound "open diagrams changed" event.
    pub fn handle_pool_changed(&mut self) {
        match self.phase {
            Phase::Positioned => {
                debug!("diagram pool changed; discarding results");
                self.reset_results();
            }
            Phase::Building | Phase::Replacing => {
                debug!(phase = ?self.phase, "ignoring pool change during own update");
            }
            Phase::Idle => {}
        }
    }

    /// Drops the pool subscription, if any.
    pub fn detach<P: DiagramPool + ?Sized>(&mut self, pool: &mut P) {
        if let Some(subscription) = self.subscription.take() {
            pool.unsubscribe(subscription.id());
        }
    }

    /// Moves to the next match, first replacing the current one when `replace` is set.
    /// Returns whether a replacement happened.
    ///
    /// From [`Phase::Idle`] this only discovers and positions on the first match.
    pub fn find_next<P: DiagramPool + ?Sized>(
        &mut self,
        pool: &mut P,
        replace: bool,
    ) -> Result<bool, SearchError> {
        let outcome = self.step(pool, replace)?;
        match outcome.failure {
            Some(failure) => Err(failure.into()),
            None => Ok(outcome.replaced > 0),
        }
    }

    /// Replaces the current match (or, elementwise, every match of the current node)
    /// without moving on, except that a backward search steps to the preceding match.
    /// Returns the number of matches replaced.
    pub fn replace_current<P: DiagramPool + ?Sized>(
        &mut self,
        pool: &mut P,
    ) -> Result<usize, SearchError> {
        let Some(matcher) = self.current_matcher()? else {
            return Ok(0);
        };
        self.reconcile_pool_events();
        if self.cursor.is_none() {
            self.start(pool, &matcher);
            return Ok(0);
        }

        self.refresh_splits(&*pool, &matcher);
        let step = self.replace_at_cursor(pool, &matcher);
        let total = self.splits.as_ref().map_or(0, NodeSplits::total);
        // Backward, the replaced position now holds the following match.
        let stepped_past = step.replaced > 0 && self.settings.direction == Direction::Backward;
        if self
            .current_position()
            .is_some_and(|position| stepped_past || position >= total)
        {
            self.advance(&*pool, &matcher);
        }
        match step.failure {
            Some(failure) => Err(failure.into()),
            None => Ok(step.replaced),
        }
    }

    /// Replaces every remaining match by stepping with replacement until the forest is
    /// exhausted. Write-back failures are collected per node and do not stop the loop.
    pub fn replace_all<P: DiagramPool + ?Sized>(
        &mut self,
        pool: &mut P,
    ) -> Result<ReplaceAllSummary, SearchError> {
        let mut summary = ReplaceAllSummary::default();
        let mut rewritten = BTreeSet::new();
        loop {
            let node = self.current_node().cloned();
            let outcome = self.step(pool, true)?;
            if outcome.replaced > 0 {
                summary.replaced += outcome.replaced;
                rewritten.extend(node);
            }
            if let Some(failure) = outcome.failure {
                warn!(error = %failure, "replacement failed; continuing");
                match summary.failures.last_mut() {
                    Some(last) if last.node == failure.node => last.errors.extend(failure.errors),
                    _ => summary.failures.push(failure),
                }
            }
            if !outcome.found {
                break;
            }
        }
        summary.nodes = rewritten.len();
        info!(
            replaced = summary.replaced,
            nodes = summary.nodes,
            failures = summary.failures.len(),
            "replace all finished"
        );
        Ok(summary)
    }

    /// Highlighted text and comment of the current node.
    ///
    /// Returns `None` when there is no cursor, or when the cached split no longer matches
    /// the live text of the node.
    pub fn current_match_preview<M: ElementModel + ?Sized>(
        &self,
        model: &M,
    ) -> Option<MatchPreview> {
        let cursor = self.cursor.as_ref()?;
        let splits = self.splits.as_ref()?;
        if splits.node() != cursor.node() || !splits.is_current(model) {
            warn!(node = %cursor.node(), "cached matches are out of date; clearing preview");
            return None;
        }

        let current = cursor.position.and_then(|position| splits.locate(position));
        let spans = |field: Field| match splits.field(field) {
            Some(split) => {
                let local = current.and_then(|(f, local)| (f == field).then_some(local));
                field_spans(split, local)
            }
            None => field
                .read(model, cursor.node())
                .filter(|text| !text.is_empty())
                .map(|text| vec![PreviewSpan::plain(text)])
                .unwrap_or_default(),
        };
        Some(MatchPreview {
            node: cursor.node().clone(),
            text: spans(Field::Text),
            comment: spans(Field::Comment),
        })
    }

    fn step<P: DiagramPool + ?Sized>(
        &mut self,
        pool: &mut P,
        replace: bool,
    ) -> Result<StepOutcome, SearchError> {
        let Some(matcher) = self.current_matcher()? else {
            return Ok(StepOutcome::default());
        };
        self.reconcile_pool_events();
        if self.cursor.is_none() {
            return Ok(StepOutcome {
                found: self.start(pool, &matcher),
                ..StepOutcome::default()
            });
        }

        self.refresh_splits(&*pool, &matcher);
        let mut outcome = StepOutcome::default();
        if replace {
            let step = self.replace_at_cursor(pool, &matcher);
            outcome.replaced = step.replaced;
            outcome.failure = step.failure;
            if outcome.replaced > 0 && self.holds_after_replacement() {
                outcome.found = true;
                return Ok(outcome);
            }
        }
        outcome.found = self.advance(&*pool, &matcher);
        Ok(outcome)
    }

    /// After a forward positional replacement the following matches shift down onto the
    /// cursor, so the cursor stays put while any remain.
    fn holds_after_replacement(&self) -> bool {
        let total = self.splits.as_ref().map_or(0, NodeSplits::total);
        self.settings.direction == Direction::Forward
            && self.current_position().is_some_and(|position| position < total)
    }

    fn current_matcher(&mut self) -> Result<Option<Matcher>, SearchError> {
        if let Some(matcher) = &self.matcher {
            if matcher.is_compiled_for(&self.settings) {
                return Ok(Some(matcher.clone()));
            }
        }
        let compiled = Matcher::compile(&self.settings)?;
        self.matcher = compiled.clone();
        Ok(compiled)
    }

    fn reconcile_pool_events(&mut self) {
        let pending = self.subscription.as_ref().and_then(PoolSubscription::drain);
        if pending.is_some() {
            self.handle_pool_changed();
        }
    }

    fn sync_subscription<P: DiagramPool + ?Sized>(&mut self, pool: &mut P) {
        let wanted = self.settings.scope == Scope::AllOpenRoots;
        if wanted && self.subscription.is_none() {
            self.subscription = Some(pool.subscribe());
        } else if !wanted {
            self.detach(pool);
        }
    }

    /// Builds a new forest and positions on its first (or, backward, last) matching leaf.
    fn start<P: DiagramPool + ?Sized>(&mut self, pool: &mut P, matcher: &Matcher) -> bool {
        self.record_search_pattern();
        self.sync_subscription(pool);

        self.phase = Phase::Building;
        let forest = ResultForest::build(&*pool, &self.settings, matcher);
        debug!(
            pattern = %self.settings.pattern,
            scope = %self.settings.scope,
            trees = forest.trees().len(),
            leaves = forest.leaf_count(),
            "built result forest"
        );
        if forest.is_empty() {
            self.reset_results();
            return false;
        }
        let first = match self.settings.direction {
            Direction::Forward => forest.first_leaf(),
            Direction::Backward => forest.last_leaf(),
        };
        self.forest = Some(forest);
        self.seek_leaf(&*pool, matcher, first)
    }

    fn advance<M: ElementModel + ?Sized>(&mut self, model: &M, matcher: &Matcher) -> bool {
        let Some(cursor) = self.cursor.as_mut() else {
            return false;
        };
        let total = self.splits.as_ref().map_or(0, NodeSplits::total);
        if let Some(position) = cursor.position {
            match self.settings.direction {
                Direction::Forward if position + 1 < total => {
                    cursor.position = Some(position + 1);
                    return true;
                }
                Direction::Backward if position > 0 && total > 0 => {
                    cursor.position = Some((position - 1).min(total - 1));
                    return true;
                }
                _ => {}
            }
        }

        let leaf = cursor.leaf;
        let next = self.forest.as_ref().and_then(|forest| match self.settings.direction {
            Direction::Forward => forest.next_leaf(leaf),
            Direction::Backward => forest.previous_leaf(leaf),
        });
        self.seek_leaf(model, matcher, next)
    }

    /// Positions on the first leaf from `candidate` (in search direction) that still has
    /// matches, or tears the results down when there is none.
    fn seek_leaf<M: ElementModel + ?Sized>(
        &mut self,
        model: &M,
        matcher: &Matcher,
        candidate: Option<usize>,
    ) -> bool {
        let mut candidate = candidate;
        while let Some(index) = candidate {
            let Some(forest) = self.forest.as_ref() else {
                break;
            };
            let Some(node) = forest.leaf(index).cloned() else {
                break;
            };
            if count_matches(model, &node, &self.settings, matcher) > 0 {
                let splits = NodeSplits::compute(model, &node, &self.settings, matcher);
                let position = match (self.settings.granularity, self.settings.direction) {
                    (Granularity::Elementwise, _) => None,
                    (Granularity::Positional, Direction::Forward) => Some(0),
                    (Granularity::Positional, Direction::Backward) => {
                        Some(splits.total().saturating_sub(1))
                    }
                };
                self.cursor = Some(Cursor {
                    leaf: index,
                    node,
                    position,
                });
                self.splits = Some(splits);
                self.phase = Phase::Positioned;
                return true;
            }
            debug!(node = %node, "leaf no longer matches; skipping");
            candidate = match self.settings.direction {
                Direction::Forward => forest.next_leaf(index),
                Direction::Backward => forest.previous_leaf(index),
            };
        }
        debug!("search exhausted");
        self.reset_results();
        false
    }

    fn refresh_splits<M: ElementModel + ?Sized>(&mut self, model: &M, matcher: &Matcher) {
        let Some(cursor) = self.cursor.as_ref() else {
            self.splits = None;
            return;
        };
        let fresh = self
            .splits
            .as_ref()
            .is_some_and(|splits| splits.node() == cursor.node() && splits.is_current(model));
        if !fresh {
            debug!(node = %cursor.node(), "re-splitting changed node");
            self.splits = Some(NodeSplits::compute(model, cursor.node(), &self.settings, matcher));
        }
    }

    fn replace_at_cursor<P: DiagramPool + ?Sized>(
        &mut self,
        pool: &mut P,
        matcher: &Matcher,
    ) -> ReplaceStep {
        let Some(node) = self.current_node().cloned() else {
            return ReplaceStep::default();
        };
        if pool.is_locked(&node) {
            debug!(node = %node, "node is locked; not replacing");
            return ReplaceStep::default();
        }
        let Some(splits) = self.splits.as_ref() else {
            return ReplaceStep::default();
        };

        let plan = match self.current_position() {
            None => splits
                .matching_fields()
                .into_iter()
                .map(|field| (field, ReplaceTarget::All))
                .collect::<Vec<_>>(),
            Some(position) => match splits.locate(position) {
                Some((field, local)) => vec![(field, ReplaceTarget::Position(local))],
                None => {
                    debug!(node = %node, position, "match position out of range; skipping");
                    Vec::new()
                }
            },
        };
        if plan.is_empty() {
            return ReplaceStep::default();
        }

        let resume = self.phase;
        self.phase = Phase::Replacing;
        let step = self.write_back(pool, &node, plan, matcher);
        self.release_replace_guard(resume);
        step
    }

    fn write_back<P: DiagramPool + ?Sized>(
        &mut self,
        pool: &mut P,
        node: &NodeRef,
        plan: Vec<(Field, ReplaceTarget)>,
        matcher: &Matcher,
    ) -> ReplaceStep {
        let Some(splits) = self.splits.as_mut() else {
            return ReplaceStep::default();
        };
        if !pool.is_read_only(node.diagram_id()) {
            pool.request_undo_checkpoint(node.diagram_id());
        }

        let mut replaced = 0;
        let mut errors = Vec::new();
        for (field, target) in plan {
            let Some(split) = splits.field_mut(field) else {
                continue;
            };
            let count = match target {
                ReplaceTarget::All => split.match_count(),
                ReplaceTarget::Position(_) => 1,
            };
            let before = split.clone();
            let Some(text) = replace(split, target, matcher, &self.settings.replacement) else {
                continue;
            };
            match field.write(pool, node, text) {
                Ok(()) => replaced += count,
                Err(err) => {
                    // The live text is unchanged; keep the cache in step with it.
                    *split = before;
                    errors.push(err);
                }
            }
        }

        if replaced > 0 {
            pool.notify_structural_change(node);
            self.record_replace_pattern();
            debug!(node = %node, replaced, "replaced matches");
        }
        ReplaceStep {
            replaced,
            failure: (!errors.is_empty()).then(|| NodeUpdateFailure {
                node: node.clone(),
                errors,
            }),
        }
    }

    /// Leaves [`Phase::Replacing`], discarding the notifications our own writes raised.
    fn release_replace_guard(&mut self, resume: Phase) {
        if let Some(event) = self.subscription.as_ref().and_then(PoolSubscription::drain) {
            debug!(generation = event.generation, "dropping pool change raised by replacement");
        }
        if self.phase == Phase::Replacing {
            self.phase = resume;
        }
    }
}
