// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed library/target/state layout and a
// fluent builder so each integration test can set up an isolated
// environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use extsync::Category;
use extsync::config::{ExtensionConfig, Paths};
use extsync::manager::Manager;

/// An isolated engine environment backed by a [`tempfile::TempDir`].
///
/// Layout under the (canonicalised) temporary root:
/// - `library/<category>/...` library storage
/// - `target/<category>/...`  consumer-facing tree
/// - `state/extensions.json`  declarative state
pub struct TestEnv {
    root: tempfile::TempDir,
    paths: Paths,
}

impl TestEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let base = dunce::canonicalize(root.path()).expect("canonicalize temp dir");
        let paths = Paths::new(
            base.join("library"),
            base.join("target"),
            base.join("state").join("extensions.json"),
        );
        Self { root, paths }
    }

    /// Temporary root holding every tree.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// A manager over this environment.
    pub fn manager(&self) -> Manager {
        Manager::new(self.paths.clone())
    }

    /// Path of `rel` in the library tree of `category`.
    pub fn library(&self, category: Category, rel: &str) -> PathBuf {
        self.paths.library_category(category).join(rel)
    }

    /// Path of `rel` in the target tree of `category`.
    pub fn target(&self, category: Category, rel: &str) -> PathBuf {
        self.paths.target_category(category).join(rel)
    }

    /// The state file.
    pub fn state_file(&self) -> &Path {
        &self.paths.state_file
    }

    /// Load the current state.
    pub fn config(&self) -> ExtensionConfig {
        ExtensionConfig::load(&self.paths.state_file).expect("load state")
    }

    /// Whether `rel` in the target tree is a symlink.
    pub fn is_link(&self, category: Category, rel: &str) -> bool {
        std::fs::symlink_metadata(self.target(category, rel)).is_ok_and(|m| m.is_symlink())
    }

    /// Every symlink under the target tree of `category`, relative and sorted.
    pub fn links(&self, category: Category) -> Vec<String> {
        let root = self.paths.target_category(category);
        let mut out = Vec::new();
        collect_links(&root, &root, &mut out);
        out.sort();
        out
    }

    /// Every entry (file, directory or link) under the target tree, relative
    /// and sorted.
    pub fn target_entries(&self) -> Vec<String> {
        let root = &self.paths.target_dir;
        let mut out = Vec::new();
        collect_entries(root, root, &mut out);
        out.sort();
        out
    }
}

fn collect_links(root: &Path, dir: &Path, out: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let file_type = entry.file_type().expect("file type");
        if file_type.is_symlink() {
            out.push(relative(root, &path));
        } else if file_type.is_dir() {
            collect_links(root, &path, out);
        }
    }
}

fn collect_entries(root: &Path, dir: &Path, out: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        out.push(relative(root, &path));
        if entry.file_type().expect("file type").is_dir() {
            collect_entries(root, &path, out);
        }
    }
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .expect("path under root")
        .to_string_lossy()
        .replace('\\', "/")
}

/// Fluent builder for [`TestEnv`].
pub struct TestEnvBuilder {
    env: TestEnv,
}

impl TestEnvBuilder {
    /// Begin building an empty environment.
    pub fn new() -> Self {
        Self { env: TestEnv::new() }
    }

    /// Add a library file `rel` whose content is `library <rel>`.
    pub fn with_library_file(self, category: Category, rel: &str) -> Self {
        let content = format!("library {rel}");
        self.with_library_content(category, rel, &content)
    }

    /// Add a library file with explicit content.
    pub fn with_library_content(self, category: Category, rel: &str, content: &str) -> Self {
        write(&self.env.library(category, rel), content);
        self
    }

    /// Add a skill-style bundle directory holding the marker and `extra` files.
    pub fn with_bundle(self, category: Category, name: &str, extra: &[&str]) -> Self {
        let mut builder = self.with_library_file(category, &format!("{name}/SKILL.md"));
        for file in extra {
            builder = builder.with_library_file(category, &format!("{name}/{file}"));
        }
        builder
    }

    /// Add a real (non-symlink) file to the target tree.
    pub fn with_target_file(self, category: Category, rel: &str, content: &str) -> Self {
        write(&self.env.target(category, rel), content);
        self
    }

    /// Write the state file verbatim.
    pub fn with_state(self, json: &str) -> Self {
        write(&self.env.paths.state_file, json);
        self
    }

    /// Finalise the environment.
    pub fn build(self) -> TestEnv {
        self.env
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
    std::fs::write(path, content).expect("write file");
}
