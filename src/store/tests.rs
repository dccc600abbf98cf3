// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{FinderPreferences, PreferencesFile, StoreError, WorkspaceFile, WriteDurability};
use crate::model::fixtures::{did, eid, node, two_diagram_workspace};
use crate::model::{DiagramType, ElementKind, ElementModel, RootRegistry, Selection};
use crate::search::{Direction, Scope};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("galene-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[fixture]
fn tmp() -> TempDir {
    TempDir::new("store")
}

fn leftover_temp_files(dir: &std::path::Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".galene.tmp."))
        .collect()
}

#[rstest]
fn workspace_round_trips_through_json(tmp: TempDir) {
    let mut workspace = two_diagram_workspace();
    workspace.set_active_diagram_id(Some(did("lib")));
    workspace.select(Some(Selection::single(did("lib"), eid("l:swap"))));
    workspace
        .edit_element(&node("main", "m:out"), |element| element.set_disabled(true))
        .unwrap();

    let file = WorkspaceFile::new(tmp.path().join("nested").join("workspace.json"));
    file.save(&workspace).unwrap();
    let loaded = file.load().unwrap();

    assert_eq!(loaded.diagrams().len(), 2);
    assert_eq!(loaded.active_root(), Some(&did("lib")));
    assert_eq!(
        loaded.selection(),
        Some(&Selection::single(did("lib"), eid("l:swap")))
    );
    assert_eq!(loaded.root_type(&did("lib")), Some(DiagramType::Sub));
    assert_eq!(
        loaded.text(&node("main", "m:body")),
        Some("count <- count + i")
    );
    assert_eq!(
        loaded.comment(&node("main", "m:init")),
        Some("initialise count")
    );
    assert_eq!(loaded.kind(&node("main", "m:loop")), Some(ElementKind::For));
    assert!(loaded.is_disabled(&node("main", "m:out")));
    assert!(leftover_temp_files(&tmp.path().join("nested")).is_empty());
}

#[rstest]
fn workspace_load_reports_unknown_element_kinds(tmp: TempDir) {
    let path = tmp.path().join("workspace.json");
    std::fs::write(
        &path,
        r#"{"diagrams":[{"diagram_id":"d","diagram_type":"main","root":{"id":"r","kind":"flowchart"}}]}"#,
    )
    .unwrap();

    let err = WorkspaceFile::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::InvalidElementKind(_)), "{err}");
}

#[rstest]
fn workspace_load_rejects_non_root_top_element(tmp: TempDir) {
    let path = tmp.path().join("workspace.json");
    std::fs::write(
        &path,
        r#"{"diagrams":[{"diagram_id":"d","diagram_type":"sub","root":{"id":"r","kind":"instruction"}}]}"#,
    )
    .unwrap();

    let err = WorkspaceFile::new(&path).load().unwrap_err();
    match err {
        StoreError::InvalidRoot { diagram_id, source } => {
            assert_eq!(diagram_id, did("d"));
            assert_eq!(source.found(), ElementKind::Instruction);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case(
    r#"{"diagrams":[{"diagram_id":"a/b","diagram_type":"main","root":{"id":"r","kind":"root"}}]}"#,
    "diagram_id",
    "a/b"
)]
#[case(
    r#"{"diagrams":[{"diagram_id":"d","diagram_type":"main","root":{"id":" r","kind":"root"}}]}"#,
    "element id",
    " r"
)]
#[case(
    r#"{"selection":{"diagram_id":"d","first":"","last":"r"},"diagrams":[]}"#,
    "selection.first",
    ""
)]
fn workspace_load_names_the_invalid_id_field(
    tmp: TempDir,
    #[case] contents: &str,
    #[case] expected_field: &str,
    #[case] expected_value: &str,
) {
    let path = tmp.path().join("workspace.json");
    std::fs::write(&path, contents).unwrap();

    let err = WorkspaceFile::new(&path).load().unwrap_err();
    match err {
        StoreError::InvalidId { field, value, .. } => {
            assert_eq!(field, expected_field);
            assert_eq!(value, expected_value);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn workspace_load_reports_malformed_json_with_path(tmp: TempDir) {
    let path = tmp.path().join("workspace.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = WorkspaceFile::new(&path).load().unwrap_err();
    match err {
        StoreError::Json { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn missing_preferences_file_yields_defaults(tmp: TempDir) {
    let prefs = PreferencesFile::new(tmp.path().join("finder.json"))
        .load()
        .unwrap();
    assert_eq!(prefs, FinderPreferences::default());
}

#[rstest]
fn preferences_round_trip_durably(tmp: TempDir) {
    let file = PreferencesFile::new(tmp.path().join("finder.json"))
        .with_durability(WriteDurability::Durable);
    let mut prefs = FinderPreferences {
        search_patterns: vec!["count".to_owned()],
        whole_word: true,
        direction: Direction::Backward,
        scope: Scope::AllOpenRoots,
        ..FinderPreferences::default()
    };
    prefs.element_kinds.remove(&ElementKind::Jump);

    file.save(&prefs).unwrap();
    let contents = std::fs::read_to_string(file.path()).unwrap();
    assert!(contents.ends_with('\n'));
    assert!(contents.contains("\"all_open_roots\""));

    assert_eq!(file.load().unwrap(), prefs);
    assert!(leftover_temp_files(tmp.path()).is_empty());
}

#[rstest]
fn partial_preferences_fill_in_defaults(tmp: TempDir) {
    let path = tmp.path().join("finder.json");
    std::fs::write(&path, r#"{"regex":true,"search_patterns":["a.c"]}"#).unwrap();

    let prefs = PreferencesFile::new(&path).load().unwrap();
    assert!(prefs.regex);
    assert!(prefs.in_text && prefs.in_comment);
    assert_eq!(prefs.element_kinds.len(), ElementKind::ALL.len());
    assert_eq!(prefs.search_settings().pattern, "a.c");
}

#[cfg(unix)]
#[rstest]
fn refuses_to_write_through_symlinks(tmp: TempDir) {
    let target = tmp.path().join("target.json");
    std::fs::write(&target, "{}").unwrap();
    let link = tmp.path().join("finder.json");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let err = PreferencesFile::new(&link)
        .save(&FinderPreferences::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::SymlinkRefused { .. }), "{err}");
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "{}");
}
