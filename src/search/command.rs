// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Front-end actions routed through one entry point.

use crate::model::DiagramPool;

use super::engine::{FindEngine, ReplaceAllSummary};
use super::error::SearchError;
use super::settings::SearchPatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FindNext,
    ReplaceAndFindNext,
    Replace,
    ReplaceAll,
    Reset,
    Update(SearchPatch),
    SelectAllElementKinds(bool),
    RecordSearchPattern,
    RecordReplacePattern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The cursor moved (or the search finished); `replaced` tells whether a match was
    /// rewritten first.
    Stepped { replaced: bool },
    Replaced(usize),
    ReplacedAll(ReplaceAllSummary),
    Reset,
    Updated { changed: bool },
    Recorded,
}

impl FindEngine {
    pub fn dispatch<P: DiagramPool + ?Sized>(
        &mut self,
        pool: &mut P,
        command: Command,
    ) -> Result<CommandOutcome, SearchError> {
        match command {
            Command::FindNext => Ok(CommandOutcome::Stepped {
                replaced: self.find_next(pool, false)?,
            }),
            Command::ReplaceAndFindNext => Ok(CommandOutcome::Stepped {
                replaced: self.find_next(pool, true)?,
            }),
            Command::Replace => Ok(CommandOutcome::Replaced(self.replace_current(pool)?)),
            Command::ReplaceAll => Ok(CommandOutcome::ReplacedAll(self.replace_all(pool)?)),
            Command::Reset => {
                self.reset_results();
                Ok(CommandOutcome::Reset)
            }
            Command::Update(patch) => Ok(CommandOutcome::Updated {
                changed: self.update(patch),
            }),
            Command::SelectAllElementKinds(selected) => {
                let before = self.settings().element_kinds.len();
                self.select_all_element_kinds(selected);
                Ok(CommandOutcome::Updated {
                    changed: before != self.settings().element_kinds.len(),
                })
            }
            Command::RecordSearchPattern => {
                self.record_search_pattern();
                Ok(CommandOutcome::Recorded)
            }
            Command::RecordReplacePattern => {
                self.record_replace_pattern();
                Ok(CommandOutcome::Recorded)
            }
        }
    }
}
