// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::NodeRef;

use super::split::SplitText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Match,
    /// The match the cursor points at.
    Current,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSpan {
    pub text: String,
    pub style: SpanStyle,
}

impl PreviewSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::Plain,
        }
    }
}

/// Highlighted rendering of the node under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPreview {
    pub node: NodeRef,
    pub text: Vec<PreviewSpan>,
    pub comment: Vec<PreviewSpan>,
}

impl MatchPreview {
    /// Renders spans with `[[current]]` and `[match]` markers, e.g. for a terminal.
    pub fn render_marked(spans: &[PreviewSpan]) -> String {
        let mut out = String::new();
        for span in spans {
            match span.style {
                SpanStyle::Plain => out.push_str(&span.text),
                SpanStyle::Match => {
                    out.push('[');
                    out.push_str(&span.text);
                    out.push(']');
                }
                SpanStyle::Current => {
                    out.push_str("[[");
                    out.push_str(&span.text);
                    out.push_str("]]");
                }
            }
        }
        out
    }
}

/// Spans of one split field; `current` is the field-local index of the highlighted match.
pub(crate) fn field_spans(split: &SplitText, current: Option<usize>) -> Vec<PreviewSpan> {
    split
        .segments()
        .iter()
        .enumerate()
        .filter(|(index, segment)| index % 2 == 1 || !segment.is_empty())
        .map(|(index, segment)| {
            let style = if index % 2 == 0 {
                SpanStyle::Plain
            } else if current == Some(index / 2) {
                SpanStyle::Current
            } else {
                SpanStyle::Match
            };
            PreviewSpan {
                text: segment.clone(),
                style,
            }
        })
        .collect()
}
