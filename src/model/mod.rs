// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram model consumed by the find engine.
//!
//! A workspace holds open diagrams; each diagram is a tree of elements carrying a main text
//! and a comment.

pub mod diagram;
pub mod element;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod node_ref;
pub mod pool;
pub mod workspace;

pub use diagram::{Diagram, DiagramType, ParseDiagramTypeError, RootKindMismatch};
pub use element::{Element, ElementKind, ForHeader, ParseElementKindError};
pub use ids::{DiagramId, ElementId, Id, IdError};
pub use node_ref::{NodeRef, ParseNodeRefError, Selection};
pub use pool::{
    DiagramPool, ElementModel, ModelError, PoolChanged, PoolSubscription, RootRegistry,
    SubscriptionId,
};
pub use workspace::Workspace;
