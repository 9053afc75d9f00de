//! Shared test utilities for E2E tests.
//!
//! This module provides a fixture that builds a throwaway Subversion
//! repository on local disk with `svnadmin`, plus helpers to detect whether
//! the Subversion tools are installed at all.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let Some(repo) = SvnFixture::new() else {
//!         return;
//!     };
//!     repo.mkdir(&["team1", "team1/trunk", "team1/branches"]);
//!     // ... test code
//! }
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::svn_tools_available;
    #[allow(unused_imports)]
    pub use super::SvnFixture;
}

/// Check whether `svn` and `svnadmin` can be run.
///
/// Tests that need a real repository return early when this is false:
///
/// ```rust,ignore
/// if !svn_tools_available() {
///     println!("Skipping: Subversion tools not installed");
///     return;
/// }
/// ```
pub fn svn_tools_available() -> bool {
    ["svn", "svnadmin"].iter().all(|tool| {
        Command::new(tool)
            .arg("--version")
            .arg("--quiet")
            .output()
            .is_ok_and(|output| output.status.success())
    })
}

/// A local `file://` repository in a temporary directory.
///
/// The directory also holds a `work` area that tests use as the mirror
/// destination.
pub struct SvnFixture {
    temp_dir: assert_fs::TempDir,
    url: String,
}

#[allow(dead_code)]
impl SvnFixture {
    /// Create an empty repository, or `None` when the tools are missing.
    pub fn new() -> Option<Self> {
        if !svn_tools_available() {
            println!("Skipping: Subversion tools not installed");
            return None;
        }

        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let repo_path = temp_dir.path().join("repo");

        run(Command::new("svnadmin").arg("create").arg(&repo_path));

        let url = url::Url::from_file_path(&repo_path)
            .expect("Repository path is absolute")
            .to_string();

        Some(Self { temp_dir, url })
    }

    /// URL of the repository root.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL of a path inside the repository.
    pub fn url_of(&self, path: &str) -> String {
        format!("{}/{}", self.url, path)
    }

    /// Create directories in one commit. Parents must be listed before
    /// their children.
    pub fn mkdir(&self, paths: &[&str]) {
        let mut cmd = Command::new("svn");
        cmd.args(["mkdir", "-m", "layout"]);
        for path in paths {
            cmd.arg(self.url_of(path));
        }
        run(&mut cmd);
    }

    /// Commit a single file at `path` with the given content.
    pub fn add_file(&self, path: &str, content: &str) {
        let staging = self.temp_dir.child("staging.txt");
        staging
            .write_str(content)
            .expect("Failed to write staging file");

        run(Command::new("svn")
            .args(["import", "-m", "add file"])
            .arg(staging.path())
            .arg(self.url_of(path)));
    }

    /// Destination directory for the mirror (not created).
    pub fn work_dir(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

fn run(cmd: &mut Command) {
    let output = cmd.output().expect("Failed to run Subversion tool");
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        cmd,
        String::from_utf8_lossy(&output.stderr)
    );
}
