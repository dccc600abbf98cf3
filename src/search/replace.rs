// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::debug;

use super::matcher::Matcher;
use super::split::{split, SplitText};

/// Which matches of a split field to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceTarget {
    All,
    Position(usize),
}

/// Rewrites `field` and returns the new text, or `None` when there was nothing to replace.
///
/// Literal searches insert `replacement` verbatim. Regex searches expand group references
/// (`$1`, `${name}`); a single match is rewritten by re-running the pattern on the isolated
/// match text, so context-dependent patterns may leave it unchanged.
///
/// `field` is updated to describe the returned text.
pub fn replace(
    field: &mut SplitText,
    target: ReplaceTarget,
    matcher: &Matcher,
    replacement: &str,
) -> Option<String> {
    match target {
        ReplaceTarget::All => {
            if field.match_count() == 0 {
                return None;
            }
            let text = if !matcher.is_regex() {
                rebuild(field, |_| replacement.to_owned())
            } else if !matcher.is_whole_word() {
                matcher
                    .finder()
                    .replace_all(&field.concatenate(), replacement)
                    .into_owned()
            } else {
                rebuild(field, |segment| {
                    matcher.finder().replace(segment, replacement).into_owned()
                })
            };
            *field = split(&text, matcher);
            Some(text)
        }
        ReplaceTarget::Position(position) => {
            let Some(segment) = field.matched(position) else {
                debug!(position, matches = field.match_count(), "replacement position out of range");
                return None;
            };
            let substitute = if matcher.is_regex() {
                matcher.finder().replace(segment, replacement).into_owned()
            } else {
                replacement.to_owned()
            };
            field.replace_match(position, &substitute);
            Some(field.concatenate())
        }
    }
}

fn rebuild(field: &SplitText, mut substitute: impl FnMut(&str) -> String) -> String {
    field
        .segments()
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            if index % 2 == 1 {
                substitute(segment)
            } else {
                segment.clone()
            }
        })
        .collect()
}
