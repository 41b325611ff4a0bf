#![cfg(unix)]
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for absorbing real files from the target tree.

mod common;

use common::TestEnvBuilder;
use extsync::{Category, ExtensionError};

/// A library item wins over a same-named real file in the target tree.
#[test]
fn import_reconciles_duplicate_with_library() {
    let env = TestEnvBuilder::new()
        .with_library_content(Category::Commands, "deploy.md", "library version")
        .with_target_file(Category::Commands, "deploy.md", "dropped version")
        .build();

    let outcome = env.manager().import(Category::Commands, &["deploy"]).unwrap();
    assert!(outcome.imported.is_empty());
    assert_eq!(outcome.skipped, vec!["deploy.md"]);

    assert_eq!(
        std::fs::read_to_string(env.library(Category::Commands, "deploy.md")).unwrap(),
        "library version"
    );
    assert!(env.is_link(Category::Commands, "deploy.md"));
    assert_eq!(
        std::fs::read_to_string(env.target(Category::Commands, "deploy.md")).unwrap(),
        "library version"
    );
}

/// New files move into the library and come back as links.
#[test]
fn import_moves_new_files_into_library() {
    let env = TestEnvBuilder::new()
        .with_target_file(Category::Agents, "frontend/reviewer.md", "review")
        .with_target_file(Category::Agents, "writer.md", "write")
        .build();

    let outcome = env.manager().import(Category::Agents, &["*"]).unwrap();
    assert_eq!(outcome.imported, vec!["frontend/reviewer.md", "writer.md"]);
    assert_eq!(
        env.links(Category::Agents),
        vec!["frontend/reviewer.md", "writer.md"]
    );
    assert_eq!(
        std::fs::read_to_string(env.library(Category::Agents, "frontend/reviewer.md")).unwrap(),
        "review"
    );
    let config = env.config();
    assert!(config.is_enabled(Category::Agents, "frontend/reviewer.md"));
    assert!(config.is_enabled(Category::Agents, "writer.md"));
}

/// A directory pattern imports every file under it.
#[test]
fn import_directory_pattern() {
    let env = TestEnvBuilder::new()
        .with_target_file(Category::Commands, "tools/a.md", "a")
        .with_target_file(Category::Commands, "tools/b.md", "b")
        .with_target_file(Category::Commands, "other.md", "o")
        .build();

    let outcome = env.manager().import(Category::Commands, &["tools"]).unwrap();
    assert_eq!(outcome.imported, vec!["tools/a.md", "tools/b.md"]);
    assert!(env.target(Category::Commands, "other.md").is_file());
    assert!(!env.is_link(Category::Commands, "other.md"));
}

/// Import-all sweeps every category, leaving dotfiles and README alone.
#[test]
fn import_all_sweeps_every_category() {
    let env = TestEnvBuilder::new()
        .with_target_file(Category::Rules, "style.md", "s")
        .with_target_file(Category::Rules, "README.md", "docs")
        .with_target_file(Category::Rules, ".hidden.md", "h")
        .with_target_file(Category::Skills, "pdf/SKILL.md", "skill")
        .build();

    let results = env.manager().import_all::<&str>(&[]).unwrap();
    let lines: Vec<String> = results
        .iter()
        .filter(|(_, o)| !o.is_empty())
        .map(|(c, o)| format!("{c}: {:?}", o.imported))
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r#"
    skills: ["pdf"]
    rules: ["style.md"]
    "#);
    assert!(env.target(Category::Rules, "README.md").is_file());
    assert!(env.target(Category::Rules, ".hidden.md").is_file());
}

/// Patterns matching nothing are reported, not errors.
#[test]
fn import_reports_not_found() {
    let env = TestEnvBuilder::new().build();
    let outcome = env.manager().import(Category::Hooks, &["ghost"]).unwrap();
    assert!(outcome.is_empty());
    assert_eq!(outcome.not_found, vec!["ghost"]);
    assert!(!env.state_file().exists());
}

/// An unsafe entry already in the state file aborts before the target copy
/// is moved or discarded.
#[test]
fn import_with_unsafe_state_entry_touches_nothing() {
    let env = TestEnvBuilder::new()
        .with_library_content(Category::Rules, "style.md", "library version")
        .with_target_file(Category::Rules, "style.md", "dropped version")
        .with_target_file(Category::Rules, "new.md", "new")
        .with_state(r#"{"rules": {"/etc/x": true}}"#)
        .build();

    let err = env.manager().import(Category::Rules, &["style", "new"]).unwrap_err();
    assert!(matches!(err, ExtensionError::UnsafeItemId { .. }));
    assert_eq!(
        std::fs::read_to_string(env.target(Category::Rules, "style.md")).unwrap(),
        "dropped version"
    );
    assert!(env.target(Category::Rules, "new.md").is_file());
    assert!(!env.library(Category::Rules, "new.md").exists());
}
