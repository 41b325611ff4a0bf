#![cfg(unix)]
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for uninstalling and copying library items.

mod common;

use common::TestEnvBuilder;
use extsync::{Category, ExtensionError};

/// Uninstall deletes library content, its state entry and its link.
#[test]
fn uninstall_removes_everything_about_an_item() {
    let env = TestEnvBuilder::new()
        .with_library_file(Category::Agents, "frontend/reviewer.md")
        .with_library_file(Category::Agents, "frontend/stylist.md")
        .build();
    env.manager().enable(Category::Agents, &["frontend"]).unwrap();

    let outcome = env
        .manager()
        .uninstall(Category::Agents, &["frontend/reviewer"])
        .unwrap();
    assert_eq!(outcome.removed, vec!["frontend/reviewer.md"]);
    assert!(!env.library(Category::Agents, "frontend/reviewer.md").exists());
    assert!(!env.config().contains(Category::Agents, "frontend/reviewer.md"));
    assert_eq!(env.links(Category::Agents), vec!["frontend/stylist.md"]);
}

/// Overlapping patterns remove each item once and the group directory
/// disappears with its last item.
#[test]
fn uninstall_overlapping_patterns() {
    let env = TestEnvBuilder::new()
        .with_library_file(Category::Commands, "tools/a.md")
        .with_library_file(Category::Commands, "tools/b.md")
        .with_library_file(Category::Commands, "deploy.md")
        .build();
    env.manager().enable(Category::Commands, &["*"]).unwrap();

    let outcome = env
        .manager()
        .uninstall(Category::Commands, &["tools/*", "tools", "tools/a"])
        .unwrap();
    assert_eq!(outcome.removed, vec!["tools/a.md", "tools/b.md"]);
    assert!(!env.library(Category::Commands, "tools").exists());
    assert_eq!(env.links(Category::Commands), vec!["deploy.md"]);
    assert_eq!(
        env.config().entries(Category::Commands),
        vec![("deploy.md".to_string(), true)]
    );
}

/// Traversal patterns are rejected before anything is deleted.
#[test]
fn uninstall_rejects_traversal() {
    let env = TestEnvBuilder::new()
        .with_library_file(Category::Rules, "style.md")
        .build();

    let err = env
        .manager()
        .uninstall(Category::Rules, &["style", "../commands"])
        .unwrap_err();
    assert!(matches!(err, ExtensionError::UnsafeItemId { .. }));
    assert!(env.library(Category::Rules, "style.md").is_file());
}

/// An unsafe entry already in the state file aborts before any library
/// content is deleted.
#[test]
fn uninstall_with_unsafe_state_entry_deletes_nothing() {
    let env = TestEnvBuilder::new()
        .with_library_file(Category::Rules, "style.md")
        .with_state(r#"{"rules": {"/etc/x": true, "style.md": true}}"#)
        .build();

    let err = env.manager().uninstall(Category::Rules, &["style"]).unwrap_err();
    assert!(matches!(err, ExtensionError::UnsafeItemId { .. }));
    assert!(env.library(Category::Rules, "style.md").is_file());
    assert!(env.config().is_enabled(Category::Rules, "style.md"));
}

/// Copying materialises real content and never overwrites.
#[test]
fn copy_to_project_creates_real_content_once() {
    let env = TestEnvBuilder::new()
        .with_bundle(Category::Skills, "pdf", &["scripts/extract.py"])
        .build();
    let project = env.root_path().join("project");

    let dest = env
        .manager()
        .copy_to_project(Category::Skills, "pdf", &project)
        .unwrap();
    assert!(!std::fs::symlink_metadata(&dest).unwrap().is_symlink());
    assert_eq!(
        std::fs::read_to_string(dest.join("scripts/extract.py")).unwrap(),
        "library pdf/scripts/extract.py"
    );

    let err = env
        .manager()
        .copy_to_project(Category::Skills, "pdf", &project)
        .unwrap_err();
    assert!(matches!(err, ExtensionError::DestinationExists(_)));
}
