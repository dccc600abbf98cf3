// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galene: pattern search and replace across the elements of open structure diagrams.
//!
//! [`model`] holds the diagrams, [`search`] the find engine, [`store`] persisted finder
//! preferences and workspace files.

pub mod model;
pub mod search;
pub mod store;
