// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence on disk.
//!
//! Workspace snapshots and finder preferences are JSON files written atomically through a
//! temp file in the target directory.

mod atomic;
pub mod error;
pub mod preferences;
pub mod workspace_file;

pub use atomic::WriteDurability;
pub use error::StoreError;
pub use preferences::{FinderPreferences, PreferencesFile};
pub use workspace_file::WorkspaceFile;

#[cfg(test)]
mod tests;
