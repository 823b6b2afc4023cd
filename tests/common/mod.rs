//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(manifests::VALID);
//!     fixture.command().arg("sync").assert().success();
//! }
//! ```

use assert_cmd::Command;
use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
    #[allow(unused_imports)]
    pub use super::UNREACHABLE_API;
}

/// An API base URL nothing listens on. Any request sent to it fails fast,
/// so a test that reaches the network shows up as an HTTP error.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Manifest snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    pub const VALID: &str = r#"{"teamName": "squad", "collaborators": ["alice", "bob"]}"#;

    pub const MISSING_TEAM_NAME: &str = r#"{"collaborators": ["alice"]}"#;

    pub const COLLABORATORS_NOT_A_LIST: &str = r#"{"teamName": "squad", "collaborators": "alice"}"#;

    pub const INVALID_JSON: &str = r#"{"teamName": "#;

    pub const VALID_YAML: &str = "teamName: squad\ncollaborators:\n  - alice\n";
}

/// A temporary directory holding a manifest file.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    manifest: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let manifest = temp_dir.path().join("team.json");
        Self { temp_dir, manifest }
    }

    /// Write `team.json` with the given content.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_manifest_named("team.json", content)
    }

    /// Write a manifest under a custom file name and use it from now on.
    #[allow(dead_code)]
    pub fn with_manifest_named(mut self, name: &str, content: &str) -> Self {
        self.temp_dir
            .child(name)
            .write_str(content)
            .expect("Failed to write manifest");
        self.manifest = self.temp_dir.path().join(name);
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    /// The `collab-sync` binary with a clean GitHub environment, running in
    /// the fixture directory and pointed at [`UNREACHABLE_API`].
    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("collab-sync");
        cmd.current_dir(self.path())
            .env_remove("GITHUB_TOKEN")
            .env_remove("COLLAB_SYNC_MANIFEST")
            .env("GITHUB_API_URL", UNREACHABLE_API)
            .env("NO_COLOR", "1");
        cmd
    }

    /// Like [`TestFixture::command`] with a token set.
    pub fn authenticated_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.env("GITHUB_TOKEN", "test-token");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
