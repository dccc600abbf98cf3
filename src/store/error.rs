// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io;
use std::path::PathBuf;

use crate::model::{DiagramId, IdError, ParseDiagramTypeError, ParseElementKindError, RootKindMismatch};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid {field} '{value}': {source}")]
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
    #[error("invalid element kind: {0}")]
    InvalidElementKind(#[from] ParseElementKindError),
    #[error("invalid diagram type: {0}")]
    InvalidDiagramType(#[from] ParseDiagramTypeError),
    #[error("diagram {diagram_id} has no root element: {source}")]
    InvalidRoot {
        diagram_id: DiagramId,
        source: RootKindMismatch,
    },
    #[error("refusing to write through symlink {path:?}")]
    SymlinkRefused { path: PathBuf },
}
