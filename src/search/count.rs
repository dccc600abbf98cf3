// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{ElementModel, NodeRef};

use super::matcher::Matcher;
use super::settings::SearchSettings;

/// Number of accepted matches in `text`; always equal to the match count of
/// [`super::split::split`] for the same input.
pub fn count_in_text(text: &str, matcher: &Matcher) -> usize {
    if matcher.is_regex() && !matcher.is_whole_word() {
        return matcher.finder().split(text).count() - 1;
    }
    matcher.spans(text).count()
}

/// Whether `node` passes the kind and disabled filters.
pub fn is_eligible<M: ElementModel + ?Sized>(
    model: &M,
    node: &NodeRef,
    settings: &SearchSettings,
) -> bool {
    let Some(kind) = model.kind(node) else {
        return false;
    };
    settings.element_kinds.contains(&kind) && (settings.include_disabled || !model.is_disabled(node))
}

/// Total matches in the enabled fields of `node`, or zero if it is filtered out.
pub fn count_matches<M: ElementModel + ?Sized>(
    model: &M,
    node: &NodeRef,
    settings: &SearchSettings,
    matcher: &Matcher,
) -> usize {
    if !is_eligible(model, node, settings) {
        return 0;
    }
    settings
        .fields()
        .filter_map(|field| field.read(model, node))
        .map(|text| count_in_text(text, matcher))
        .sum()
}
