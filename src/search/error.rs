// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{ModelError, NodeRef};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid search pattern '{pattern}': {diagnostic}")]
    InvalidPattern { pattern: String, diagnostic: String },
    #[error(transparent)]
    NodeUpdate(#[from] NodeUpdateFailure),
}

/// Every write-back failure collected while rewriting one node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct NodeUpdateFailure {
    pub node: NodeRef,
    pub errors: Vec<ModelError>,
}

impl fmt::Display for NodeUpdateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to update {}", self.node)?;
        for (index, error) in self.errors.iter().enumerate() {
            let sep = if index == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}
