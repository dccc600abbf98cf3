// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Find and replace over the text and comment fields of diagram elements.
//!
//! Patterns are compiled by [`Matcher`], fields are cut into literal/match segments by
//! [`split()`], and [`FindEngine`] walks a [`ResultForest`] of matching nodes, optionally
//! rewriting matches as it goes.

pub mod command;
pub mod count;
pub mod engine;
pub mod error;
pub mod forest;
pub mod history;
pub mod matcher;
pub mod preview;
pub mod replace;
pub mod settings;
pub mod split;

pub use command::{Command, CommandOutcome};
pub use count::{count_in_text, count_matches};
pub use engine::{Cursor, FindEngine, Phase, ReplaceAllSummary};
pub use error::{NodeUpdateFailure, SearchError};
pub use forest::{ResultForest, ResultTree};
pub use history::{PatternHistory, MAX_RECENT_PATTERNS};
pub use matcher::Matcher;
pub use preview::{MatchPreview, PreviewSpan, SpanStyle};
pub use replace::{replace, ReplaceTarget};
pub use settings::{
    is_identifier, Direction, Field, Granularity, ParseScopeError, Scope, SearchPatch,
    SearchSettings,
};
pub use split::{recover_matches, split, SplitText};
