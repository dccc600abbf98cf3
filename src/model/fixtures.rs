// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::diagram::{Diagram, DiagramType};
use super::element::{Element, ElementKind};
use super::ids::{DiagramId, ElementId};
use super::node_ref::NodeRef;
use super::workspace::Workspace;

pub(crate) fn did(value: &str) -> DiagramId {
    DiagramId::new(value).expect("diagram id")
}

pub(crate) fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

pub(crate) fn node(diagram_id: &str, element_id: &str) -> NodeRef {
    NodeRef::new(did(diagram_id), eid(element_id))
}

pub(crate) fn element(id: &str, kind: ElementKind, text: &str) -> Element {
    Element::new(eid(id), kind, text)
}

pub(crate) fn diagram(id: &str, diagram_type: DiagramType, root: Element) -> Diagram {
    Diagram::new(did(id), id, diagram_type, root).expect("diagram root")
}

/// `main` (active) sums a counter in a loop; `lib` is a small swap routine.
pub(crate) fn two_diagram_workspace() -> Workspace {
    let main_root = element("m:root", ElementKind::Root, "main")
        .with_comment("count the numbers")
        .with_children([
            element("m:init", ElementKind::Instruction, "count <- 0")
                .with_comment("initialise count"),
            element("m:loop", ElementKind::For, "for i <- 1 to 10").with_children([element(
                "m:body",
                ElementKind::Instruction,
                "count <- count + i",
            )]),
            element("m:out", ElementKind::Call, "print(count)"),
        ]);

    let lib_root = element("l:root", ElementKind::Root, "swap(a, b)")
        .with_comment("exchange two values")
        .with_children([
            element("l:swap", ElementKind::Instruction, "tmp <- a\na <- b\nb <- tmp"),
            element("l:done", ElementKind::Jump, "return"),
        ]);

    let mut workspace = Workspace::new();
    workspace.open(diagram("main", DiagramType::Main, main_root));
    workspace.open(diagram("lib", DiagramType::Sub, lib_root));
    workspace
}

/// One `Main` diagram `d` whose empty root holds a single instruction `d:n`.
pub(crate) fn single_node_workspace(text: &str) -> Workspace {
    let root = element("d:root", ElementKind::Root, "")
        .with_children([element("d:n", ElementKind::Instruction, text)]);
    let mut workspace = Workspace::new();
    workspace.open(diagram("d", DiagramType::Main, root));
    workspace
}
