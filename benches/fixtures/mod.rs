// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use galene::model::{Diagram, DiagramId, DiagramType, Element, ElementId, ElementKind, Workspace};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("galene_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// 4 diagrams, 3 blocks of 8 statements each.
    Small,
    /// 16 diagrams, 12 blocks of 16 statements each.
    Medium,
}

impl Case {
    fn shape(self) -> (usize, usize, usize) {
        match self {
            Self::Small => (4, 3, 8),
            Self::Medium => (16, 12, 16),
        }
    }
}

const STATEMENTS: [&str; 6] = [
    "count <- count + i",
    "total <- total + count * 2",
    "print(count, total)",
    "tmp <- a; a <- b; b <- tmp",
    "counter <- counter - 1",
    "read(value)",
];

fn element(id: String, kind: ElementKind, text: String) -> Element {
    Element::new(ElementId::new(id).expect("element id"), kind, text)
}

fn block(diagram: usize, block: usize, statements: usize) -> Element {
    let kind = match block % 3 {
        0 => ElementKind::For,
        1 => ElementKind::While,
        _ => ElementKind::Alternative,
    };
    let header = match kind {
        ElementKind::For => format!("for i <- 1 to {}", block + 2),
        ElementKind::While => format!("while count < {}", block * 10),
        _ => format!("count > {block}"),
    };
    let children = (0..statements).map(|n| {
        let text = STATEMENTS[(diagram + block + n) % STATEMENTS.len()].to_owned();
        let kind = if n % 5 == 4 {
            ElementKind::Call
        } else {
            ElementKind::Instruction
        };
        let child = element(format!("s{block}_{n}"), kind, text);
        if n % 4 == 0 {
            child.with_comment(format!("step {n}: update count"))
        } else {
            child
        }
    });
    element(format!("b{block}"), kind, header).with_children(children.collect::<Vec<_>>())
}

pub fn workspace(case: Case) -> Workspace {
    let (diagrams, blocks, statements) = case.shape();
    let mut workspace = Workspace::new();
    for d in 0..diagrams {
        let diagram_type = if d == 0 {
            DiagramType::Main
        } else {
            DiagramType::Sub
        };
        let root = element("root".to_owned(), ElementKind::Root, format!("routine{d}(count)"))
            .with_comment("count things")
            .with_children((0..blocks).map(|b| block(d, b, statements)).collect::<Vec<_>>());
        let diagram_id = DiagramId::new(format!("d{d}")).expect("diagram id");
        let diagram = Diagram::new(diagram_id, format!("routine{d}"), diagram_type, root)
            .expect("diagram root");
        workspace.open(diagram);
    }
    workspace
}

pub fn long_text(lines: usize) -> String {
    (0..lines)
        .map(|n| STATEMENTS[n % STATEMENTS.len()])
        .collect::<Vec<_>>()
        .join("\n")
}
