// Shared helpers for integration tests.
//
// Provides a temporary directory holding raw data frames and pyphot files,
// and a fluent builder so each integration test can lay out an isolated
// reduction directory without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use pyphot_file::parse::{ParseOptions, PyphotFile, parse_pyphot_file};

/// Options for parsing without touching data files.
pub const NO_FILE_CHECK: ParseOptions = ParseOptions {
    file_check: false,
    runtime: false,
};

/// An isolated reduction directory backed by a [`tempfile::TempDir`].
///
/// Raw frames live under `raw/`; pyphot files are written at the root.
pub struct IntegrationTestContext {
    /// Temporary directory deleted on drop.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with an empty `raw/` directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("raw")).expect("create raw dir");
        Self { root }
    }

    /// Path to the context root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the `raw/` directory.
    pub fn raw_dir(&self) -> PathBuf {
        self.root.path().join("raw")
    }

    /// Path of a file at the context root.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Parse the pyphot file `name` with `options`.
    pub fn parse(&self, name: &str, options: ParseOptions) -> pyphot_file::Result<PyphotFile> {
        parse_pyphot_file(&self.path(name), options)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Create empty raw frames under `raw/`.
    pub fn with_raw_frames(self, names: &[&str]) -> Self {
        for name in names {
            let path = self.ctx.raw_dir().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("create frame parent");
            }
            std::fs::write(&path, "").expect("write raw frame");
        }
        self
    }

    /// Write a pyphot file at the context root.
    ///
    /// Every `{raw}` in `content` is replaced by the absolute `raw/` path.
    pub fn with_pyphot_file(self, name: &str, content: &str) -> Self {
        let raw = self.ctx.raw_dir();
        let content = content.replace("{raw}", &raw.to_string_lossy());
        std::fs::write(self.ctx.path(name), content).expect("write pyphot file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
