// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use galene::search::{
    count_in_text, split, FindEngine, Matcher, ResultForest, Scope, SearchSettings,
};
use galene::store::WorkspaceFile;

mod fixtures;
mod profiler;

use fixtures::{Case, TempDir};

fn settings(pattern: &str, configure: impl FnOnce(&mut SearchSettings)) -> SearchSettings {
    let mut settings = SearchSettings {
        scope: Scope::AllOpenRoots,
        ..SearchSettings::new(pattern)
    };
    configure(&mut settings);
    settings
}

fn matcher(settings: &SearchSettings) -> Matcher {
    Matcher::compile(settings)
        .expect("compile pattern")
        .expect("non-empty pattern")
}

// Benchmark identity (keep stable):
// - Groups: `search.text`, `search.forest`, `search.engine`, `store.workspace`.
// - Case IDs after the `/` must remain stable so results stay comparable over time.
fn benches_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("search.text");
    let text = fixtures::long_text(200);

    let cases = [
        ("literal", settings("count", |_| {})),
        ("literal_whole_word", settings("count", |s| s.whole_word = true)),
        ("regex", settings(r"count\s*[<+-]", |s| s.regex = true)),
        ("regex_groups", settings(r"(\w+) <- (\w+)", |s| s.regex = true)),
    ];
    for (id, settings) in &cases {
        let matcher = matcher(settings);
        group.bench_function(format!("count_{id}"), |b| {
            b.iter(|| black_box(count_in_text(black_box(&text), &matcher)))
        });
        group.bench_function(format!("split_{id}"), |b| {
            b.iter(|| black_box(split(black_box(&text), &matcher).match_count()))
        });
    }
    group.finish();
}

fn benches_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("search.forest");
    for (id, case) in [("small", Case::Small), ("medium", Case::Medium)] {
        let workspace = fixtures::workspace(case);
        let settings = settings("count", |_| {});
        let matcher = matcher(&settings);
        group.bench_function(format!("build_{id}"), |b| {
            b.iter(|| {
                let forest = ResultForest::build(black_box(&workspace), &settings, &matcher);
                black_box(forest.leaf_count())
            })
        });
    }
    group.finish();
}

fn benches_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("search.engine");
    for (id, case) in [("small", Case::Small), ("medium", Case::Medium)] {
        group.bench_function(format!("walk_{id}"), |b| {
            b.iter_batched_ref(
                || (fixtures::workspace(case), FindEngine::new(settings("count", |_| {}))),
                |(workspace, engine)| {
                    let mut stops = 0usize;
                    loop {
                        engine.find_next(workspace, false).expect("find_next");
                        if engine.cursor().is_none() {
                            break;
                        }
                        stops += 1;
                    }
                    black_box(stops)
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("replace_all_{id}"), |b| {
            b.iter_batched_ref(
                || {
                    let settings = settings("count", |s| s.replacement = "n".to_owned());
                    (fixtures::workspace(case), FindEngine::new(settings))
                },
                |(workspace, engine)| {
                    black_box(engine.replace_all(workspace).expect("replace_all").replaced)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn benches_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store.workspace");
    let workspace = fixtures::workspace(Case::Medium);
    group.bench_function("save_load_medium", |b| {
        b.iter_batched_ref(
            || TempDir::new("store_workspace_medium"),
            |tmp| {
                let file = WorkspaceFile::new(tmp.path().join("workspace.json"));
                file.save(black_box(&workspace)).expect("save workspace");
                black_box(file.load().expect("load workspace").diagrams().len())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_text, benches_forest, benches_engine, benches_store
}
criterion_main!(benches);
