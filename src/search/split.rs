// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Splitting a field into alternating literal and match segments.

use regex::Regex;
use smallvec::SmallVec;
use tracing::debug;

use super::matcher::{is_word_bounded, Matcher};

/// Alternating segments of one text field: even indices are literal text, odd indices are
/// matches. The sequence always has odd length and concatenates back to the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitText {
    segments: SmallVec<[String; 3]>,
}

impl SplitText {
    /// A text without matches.
    pub fn unsplit(text: impl Into<String>) -> Self {
        let mut segments = SmallVec::new();
        segments.push(text.into());
        Self { segments }
    }

    fn from_segments(segments: SmallVec<[String; 3]>) -> Self {
        debug_assert!(segments.len() % 2 == 1, "split text must have odd length");
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn match_count(&self) -> usize {
        self.segments.len() / 2
    }

    pub fn matched(&self, position: usize) -> Option<&str> {
        self.segments.get(2 * position + 1).map(String::as_str)
    }

    pub fn matches(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().skip(1).step_by(2).map(String::as_str)
    }

    pub fn concatenate(&self) -> String {
        self.segments.concat()
    }

    /// Byte offset of the match at `position` within the concatenated text.
    pub fn match_offset(&self, position: usize) -> Option<usize> {
        let index = 2 * position + 1;
        (index < self.segments.len()).then(|| self.segments[..index].iter().map(String::len).sum())
    }

    /// Replaces the match at `position` and folds it with its neighbouring literals, so the
    /// following matches shift down by one. Returns `false` if there is no such match.
    pub(crate) fn replace_match(&mut self, position: usize, replacement: &str) -> bool {
        let index = 2 * position + 1;
        if index >= self.segments.len() {
            return false;
        }
        let tail = self.segments.remove(index + 1);
        self.segments.remove(index);
        let head = &mut self.segments[index - 1];
        head.push_str(replacement);
        head.push_str(&tail);
        true
    }
}

/// Splits `text` around every accepted match of `matcher`.
///
/// Literal patterns take the matched text straight from the match spans. Regex patterns
/// split first and then recover each matched piece by anchoring the pattern at the gap
/// between two literal pieces; if that recovery cannot be verified the spans are used.
pub fn split(text: &str, matcher: &Matcher) -> SplitText {
    let raw = if matcher.is_regex() {
        let literals = matcher.finder().split(text).collect::<Vec<_>>();
        let matches = recover_matches(text, &literals, matcher.anchored()).unwrap_or_else(|| {
            debug!(
                pattern = matcher.pattern(),
                "anchored match recovery diverged; using match spans"
            );
            matcher
                .finder()
                .find_iter(text)
                .map(|m| m.as_str().to_owned())
                .collect()
        });
        interleave(&literals, matches)
    } else {
        let spans = matcher.finder().find_iter(text).map(|m| (m.start(), m.end()));
        from_spans(text, spans)
    };

    if matcher.is_whole_word() {
        fold_unbounded(text, raw)
    } else {
        SplitText::from_segments(raw)
    }
}

/// Recovers the text of each match between consecutive literal pieces by matching the
/// anchored pattern at the start of the remaining text.
///
/// Returns `None` when the recovered pieces do not reproduce `text` exactly, which happens
/// for context-dependent patterns (look-behind style assertions such as `\B`).
pub fn recover_matches(text: &str, literals: &[&str], anchored: &Regex) -> Option<Vec<String>> {
    let mut offset = 0;
    let mut matches = Vec::with_capacity(literals.len().saturating_sub(1));
    for (index, literal) in literals.iter().enumerate() {
        if !text[offset..].starts_with(literal) {
            return None;
        }
        offset += literal.len();
        if index + 1 == literals.len() {
            break;
        }
        let found = anchored.find(&text[offset..])?;
        matches.push(found.as_str().to_owned());
        offset += found.end();
    }
    (offset == text.len()).then_some(matches)
}

fn interleave(literals: &[&str], matches: Vec<String>) -> SmallVec<[String; 3]> {
    let mut segments = SmallVec::with_capacity(literals.len() + matches.len());
    let mut matches = matches.into_iter();
    for (index, literal) in literals.iter().enumerate() {
        if index > 0 {
            segments.push(matches.next().unwrap_or_default());
        }
        segments.push((*literal).to_owned());
    }
    segments
}

fn from_spans(text: &str, spans: impl Iterator<Item = (usize, usize)>) -> SmallVec<[String; 3]> {
    let mut segments = SmallVec::new();
    let mut offset = 0;
    for (start, end) in spans {
        segments.push(text[offset..start].to_owned());
        segments.push(text[start..end].to_owned());
        offset = end;
    }
    segments.push(text[offset..].to_owned());
    segments
}

/// Folds matches that are not whole words back into the surrounding literal text.
fn fold_unbounded(text: &str, raw: SmallVec<[String; 3]>) -> SplitText {
    let mut raw = raw.into_iter();
    let mut segments: SmallVec<[String; 3]> = SmallVec::new();
    let mut head = raw.next().unwrap_or_default();
    let mut offset = head.len();

    while let (Some(matched), Some(literal)) = (raw.next(), raw.next()) {
        let start = offset;
        let end = start + matched.len();
        offset = end + literal.len();
        if is_word_bounded(text, start, end) {
            segments.push(std::mem::replace(&mut head, literal));
            segments.push(matched);
        } else {
            head.push_str(&matched);
            head.push_str(&literal);
        }
    }
    segments.push(head);
    SplitText::from_segments(segments)
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use rstest::rstest;

    use super::{recover_matches, split, SplitText};
    use crate::search::matcher::Matcher;
    use crate::search::settings::SearchSettings;

    fn matcher(pattern: &str, regex: bool, whole_word: bool) -> Matcher {
        let settings = SearchSettings {
            regex,
            whole_word,
            ..SearchSettings::new(pattern)
        };
        Matcher::compile(&settings)
            .expect("valid pattern")
            .expect("non-empty pattern")
    }

    #[rstest]
    #[case("cat", false, false, "concatenate cat scatter", 3)]
    #[case("cat", false, true, "concatenate cat scatter", 1)]
    #[case("abc", false, false, "abcabc", 2)]
    #[case("a.c", true, false, "abcadc", 2)]
    #[case(r"\d+", true, false, "", 0)]
    #[case("ä", false, false, "Ää ä", 3)]
    fn split_is_lossless(
        #[case] pattern: &str,
        #[case] regex: bool,
        #[case] whole_word: bool,
        #[case] text: &str,
        #[case] expected_matches: usize,
    ) {
        let m = matcher(pattern, regex, whole_word);
        let split = split(text, &m);
        assert_eq!(split.concatenate(), text);
        assert_eq!(split.segments().len() % 2, 1);
        assert_eq!(split.match_count(), expected_matches);
        assert_eq!(m.spans(text).count(), expected_matches);
    }

    #[test]
    fn empty_regex_matches_split_and_count_alike() {
        let m = matcher("x*", true, false);
        let split = split("axbxx", &m);
        assert_eq!(split.concatenate(), "axbxx");
        assert_eq!(split.match_count(), m.spans("axbxx").count());
        assert!(split.matches().any(str::is_empty));
    }

    #[test]
    fn whole_word_keeps_only_the_standalone_match() {
        let split = split("concatenate cat scatter", &matcher("cat", false, true));
        assert_eq!(
            split.segments(),
            ["concatenate ", "cat", " scatter"].map(str::to_owned)
        );
    }

    #[test]
    fn regex_matches_keep_their_matched_text() {
        let split = split("abcadc", &matcher("a.c", true, false));
        assert_eq!(split.matches().collect::<Vec<_>>(), vec!["abc", "adc"]);
        assert_eq!(split.match_offset(1), Some(3));
        assert_eq!(split.match_offset(2), None);
    }

    #[test]
    fn context_dependent_pattern_defeats_anchored_recovery() {
        // `\Ba` matches the `a` in "ba", but not once the remainder starts at that `a`.
        let finder = Regex::new(r"\Ba").expect("regex");
        let anchored = Regex::new(r"\A(?:\Ba)").expect("regex");
        let literals = finder.split("ba").collect::<Vec<_>>();
        assert_eq!(literals, vec!["b", ""]);
        assert_eq!(recover_matches("ba", &literals, &anchored), None);

        let split = split("ba", &matcher(r"\Ba", true, false));
        assert_eq!(split.segments(), ["b", "a", ""].map(str::to_owned));
    }

    #[test]
    fn replacing_a_match_folds_it_into_the_literals() {
        let mut split = split("abcabc", &matcher("abc", false, false));
        assert!(split.replace_match(0, "X"));
        assert_eq!(split.segments(), ["X", "abc", ""].map(str::to_owned));
        assert!(!split.replace_match(1, "X"));
        assert!(split.replace_match(0, "X"));
        assert_eq!(split, SplitText::unsplit("XX"));
    }
}
