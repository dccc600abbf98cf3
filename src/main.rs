// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galene CLI entrypoint.
//!
//! Lists every match of a pattern in a workspace file, or replaces them all with
//! `--replace`. Rewritten workspaces are only saved back with `--write`.
//!
//! Logging goes to stderr and is filtered through `GALENE_LOG` (default `galene=info`).

use std::error::Error;

use galene::model::Workspace;
use galene::search::{Direction, FindEngine, Granularity, MatchPreview, Scope, SearchPatch};
use galene::store::{FinderPreferences, PreferencesFile, WorkspaceFile, WriteDurability};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [options] <pattern> <workspace.json>\n\nOptions:\n  --regex              treat <pattern> as a regular expression\n  --case-sensitive     match case exactly\n  --whole-word         only match whole words\n  --texts-only         search element texts only\n  --comments-only      search element comments only\n  --backward           walk the results backwards\n  --elementwise        step node by node instead of match by match\n  --scope <scope>      CURRENT_SELECTION, CURRENT_DIAGRAM or OPENED_DIAGRAMS\n  --replace <text>     replace every match with <text>\n  --write              save the rewritten workspace (requires --replace)\n  --prefs <file>       load and update finder preferences stored in <file>\n  --durable-writes     fsync files written to disk\n\nSet GALENE_LOG to adjust logging (e.g. GALENE_LOG=galene=debug)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    pattern: String,
    workspace: String,
    regex: bool,
    case_sensitive: bool,
    whole_word: bool,
    texts_only: bool,
    comments_only: bool,
    backward: bool,
    elementwise: bool,
    scope: Option<Scope>,
    replacement: Option<String>,
    write: bool,
    prefs: Option<String>,
    durable_writes: bool,
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--regex" => set_flag(&mut options.regex)?,
            "--case-sensitive" => set_flag(&mut options.case_sensitive)?,
            "--whole-word" => set_flag(&mut options.whole_word)?,
            "--texts-only" => set_flag(&mut options.texts_only)?,
            "--comments-only" => set_flag(&mut options.comments_only)?,
            "--backward" => set_flag(&mut options.backward)?,
            "--elementwise" => set_flag(&mut options.elementwise)?,
            "--write" => set_flag(&mut options.write)?,
            "--durable-writes" => set_flag(&mut options.durable_writes)?,
            "--scope" => {
                if options.scope.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.scope = Some(raw.parse().map_err(|_| ())?);
            }
            "--replace" => {
                if options.replacement.is_some() {
                    return Err(());
                }
                options.replacement = Some(args.next().ok_or(())?);
            }
            "--prefs" => {
                if options.prefs.is_some() {
                    return Err(());
                }
                options.prefs = Some(args.next().ok_or(())?);
            }
            "--" => positional.extend(args.by_ref()),
            _ if arg.starts_with("--") => return Err(()),
            _ => positional.push(arg),
        }
    }

    let [pattern, workspace] = <[String; 2]>::try_from(positional).map_err(|_| ())?;
    options.pattern = pattern;
    options.workspace = workspace;

    if options.texts_only && options.comments_only {
        return Err(());
    }
    if options.write && options.replacement.is_none() {
        return Err(());
    }

    Ok(options)
}

impl CliOptions {
    /// Settings requested on the command line; flags that are not given keep the stored
    /// preference.
    fn patch(&self) -> SearchPatch {
        let on = |flag: bool| flag.then_some(true);
        SearchPatch {
            pattern: Some(self.pattern.clone()),
            replacement: self.replacement.clone(),
            case_sensitive: on(self.case_sensitive),
            whole_word: on(self.whole_word),
            regex: on(self.regex),
            direction: self.backward.then_some(Direction::Backward),
            granularity: self.elementwise.then_some(Granularity::Elementwise),
            in_text: (self.texts_only || self.comments_only).then_some(self.texts_only),
            in_comment: (self.texts_only || self.comments_only).then_some(self.comments_only),
            scope: self.scope,
            ..SearchPatch::default()
        }
    }

    fn durability(&self) -> WriteDurability {
        if self.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        }
    }
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_env("GALENE_LOG").unwrap_or_else(|_| EnvFilter::new("galene=info"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init();
}

fn print_preview(preview: &MatchPreview) {
    let text = MatchPreview::render_marked(&preview.text);
    let comment = MatchPreview::render_marked(&preview.comment);
    println!("{}", preview.node);
    for line in text.lines() {
        println!("    {line}");
    }
    if !comment.is_empty() {
        for line in comment.lines() {
            println!("  # {line}");
        }
    }
}

fn list_matches(
    engine: &mut FindEngine,
    workspace: &mut Workspace,
) -> Result<usize, Box<dyn Error>> {
    let mut stops = 0;
    loop {
        engine.find_next(workspace, false)?;
        if engine.cursor().is_none() {
            break;
        }
        stops += 1;
        if let Some(preview) = engine.current_match_preview(&*workspace) {
            print_preview(&preview);
        }
    }
    Ok(stops)
}

fn main() {
    init_tracing();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "galene".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let prefs_file = options
            .prefs
            .as_ref()
            .map(|path| PreferencesFile::new(path).with_durability(options.durability()));
        let prefs = match &prefs_file {
            Some(file) => file.load()?,
            None => FinderPreferences::default(),
        };
        let mut engine = prefs.into_engine();
        engine.update(options.patch());

        let workspace_file =
            WorkspaceFile::new(&options.workspace).with_durability(options.durability());
        let mut workspace = workspace_file.load()?;

        match &options.replacement {
            Some(_) => {
                let summary = engine.replace_all(&mut workspace)?;
                for failure in &summary.failures {
                    eprintln!("galene: {failure}");
                }
                println!(
                    "replaced {} match(es) in {} node(s)",
                    summary.replaced, summary.nodes
                );
                if options.write && summary.replaced > 0 {
                    workspace_file.save(&workspace)?;
                } else if !options.write {
                    println!("dry run; pass --write to save {}", options.workspace);
                }
            }
            None => {
                let stops = list_matches(&mut engine, &mut workspace)?;
                let unit = match engine.settings().granularity {
                    Granularity::Elementwise => "node(s)",
                    Granularity::Positional => "match(es)",
                };
                println!("{stops} {unit}");
            }
        }

        if let Some(file) = &prefs_file {
            file.save(&FinderPreferences::from_engine(&engine))?;
        }
        engine.detach(&mut workspace);

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("galene: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use galene::search::{Direction, Granularity, Scope};

    use super::{parse_options, CliOptions};

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|value| (*value).to_owned())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_pattern_and_workspace() {
        let options = parse_options(args(&["count", "ws.json"])).expect("parse options");
        assert_eq!(
            options,
            CliOptions {
                pattern: "count".to_owned(),
                workspace: "ws.json".to_owned(),
                ..CliOptions::default()
            }
        );
        let patch = options.patch();
        assert_eq!(patch.pattern.as_deref(), Some("count"));
        assert_eq!(patch.regex, None);
        assert_eq!(patch.in_text, None);
    }

    #[test]
    fn parses_search_flags_into_a_patch() {
        let options = parse_options(args(&[
            "--regex",
            "--backward",
            "--elementwise",
            "--comments-only",
            "--scope",
            "opened_diagrams",
            "a.c",
            "ws.json",
        ]))
        .expect("parse options");
        let patch = options.patch();
        assert_eq!(patch.regex, Some(true));
        assert_eq!(patch.direction, Some(Direction::Backward));
        assert_eq!(patch.granularity, Some(Granularity::Elementwise));
        assert_eq!(patch.in_text, Some(false));
        assert_eq!(patch.in_comment, Some(true));
        assert_eq!(patch.scope, Some(Scope::AllOpenRoots));
    }

    #[test]
    fn parses_replacement_with_write() {
        let options = parse_options(args(&["--replace", "n", "--write", "count", "ws.json"]))
            .expect("parse options");
        assert_eq!(options.replacement.as_deref(), Some("n"));
        assert!(options.write);
    }

    #[test]
    fn double_dash_allows_patterns_starting_with_dashes() {
        let options =
            parse_options(args(&["--", "--verbose", "ws.json"])).expect("parse options");
        assert_eq!(options.pattern, "--verbose");
    }

    #[test]
    fn rejects_write_without_replacement() {
        parse_options(args(&["--write", "count", "ws.json"])).unwrap_err();
    }

    #[test]
    fn rejects_conflicting_field_filters() {
        parse_options(args(&["--texts-only", "--comments-only", "x", "ws.json"])).unwrap_err();
    }

    #[test]
    fn rejects_unknown_scope_and_flags() {
        parse_options(args(&["--scope", "everywhere", "x", "ws.json"])).unwrap_err();
        parse_options(args(&["--nope", "x", "ws.json"])).unwrap_err();
    }

    #[test]
    fn rejects_wrong_positional_count() {
        parse_options(args(&["x"])).unwrap_err();
        parse_options(args(&["x", "ws.json", "extra"])).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(args(&["--regex", "--regex", "x", "ws.json"])).unwrap_err();
        parse_options(args(&["--replace", "a", "--replace", "b", "x", "ws.json"])).unwrap_err();
    }
}
