//! # Tree Walk
//!
//! The walk starts at the repository root and classifies each listing it
//! reads:
//!
//! - **Project boundary** (the listing has `trunk`, `branches` or `tags`):
//!   every child except `branches` and `tags` is materialized. A child whose
//!   destination does not exist yet is checked out; one that exists is
//!   updated. Nothing below a boundary is listed.
//!
//! - **Namespace directory**: the walk descends into every child directory
//!   except `branches` and `tags`. Files at this level are left alone.
//!
//! The walk is sequential and depth-first, with the repository-relative path
//! as its only state. Any listing or transfer failure aborts the whole walk.
//!
//! Checking whether a destination exists and then acting on it is not atomic.
//! Another process creating or removing the path in between is not handled.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::classify::{is_excluded_name, is_project_boundary};
use crate::error::Result;
use crate::repository::{CheckoutOperations, DirectoryLister, RepositoryEntry, Revision};

/// Whether a child was freshly checked out or updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Checkout,
    Update,
}

/// One checkout or update performed by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    /// Repository-relative path of the materialized child.
    pub path: String,
    pub destination: PathBuf,
    pub revision: Revision,
}

/// Everything a walk did, in the order it happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkReport {
    actions: Vec<Action>,
}

impl WalkReport {
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn checkouts(&self) -> impl Iterator<Item = &Action> {
        self.actions
            .iter()
            .filter(|a| a.kind == ActionKind::Checkout)
    }

    pub fn updates(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|a| a.kind == ActionKind::Update)
    }

    /// Repository paths acted on, in order.
    pub fn paths(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.path.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Extends a repository-relative path by one entry name.
pub fn child_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", path, name)
    }
}

/// Local destination of `name` under the repository path `path`.
pub fn destination(dest_root: &Path, path: &str, name: &str) -> PathBuf {
    let mut dest = dest_root.to_path_buf();
    dest.extend(path.split('/').filter(|segment| !segment.is_empty()));
    dest.push(name);
    dest
}

/// Recursive descent over a remote tree.
pub struct TreeWalker<'a> {
    lister: &'a dyn DirectoryLister,
    ops: &'a dyn CheckoutOperations,
    dest_root: PathBuf,
}

impl<'a> TreeWalker<'a> {
    pub fn new(
        lister: &'a dyn DirectoryLister,
        ops: &'a dyn CheckoutOperations,
        dest_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            lister,
            ops,
            dest_root: dest_root.into(),
        }
    }

    /// Walks the whole repository, writing one progress line per action to
    /// `out`.
    pub fn walk(&self, out: &mut dyn Write) -> Result<WalkReport> {
        self.walk_from("", out)
    }

    /// Walks the subtree at `path`.
    pub fn walk_from(&self, path: &str, out: &mut dyn Write) -> Result<WalkReport> {
        let mut report = WalkReport::default();
        self.visit(path, out, &mut report)?;
        Ok(report)
    }

    fn visit(&self, path: &str, out: &mut dyn Write, report: &mut WalkReport) -> Result<()> {
        let entries = self.lister.list(path)?;

        if is_project_boundary(&entries) {
            debug!("'{}' is a project boundary", path);
            for entry in entries.iter().filter(|e| !is_excluded_name(e)) {
                self.materialize(path, entry, out, report)?;
            }
        } else {
            debug!("'{}' is a namespace, descending", path);
            for entry in entries
                .iter()
                .filter(|e| e.is_directory() && !is_excluded_name(e))
            {
                self.visit(&child_path(path, &entry.name), out, report)?;
            }
        }

        Ok(())
    }

    fn materialize(
        &self,
        path: &str,
        entry: &RepositoryEntry,
        out: &mut dyn Write,
        report: &mut WalkReport,
    ) -> Result<()> {
        let entry_path = child_path(path, &entry.name);
        let dest = destination(&self.dest_root, path, &entry.name);

        let (kind, revision) = if !dest.exists() {
            let url = self.lister.url_for(&entry_path)?;
            let revision = self.ops.checkout(&url, &dest)?;
            writeln!(out, "checkout: {} to revision @{}", path, revision)?;
            info!("checked out {} into {}", url, dest.display());
            (ActionKind::Checkout, revision)
        } else {
            let revision = self.ops.update(&dest)?;
            writeln!(out, "update  : {} to revision @{}", path, revision)?;
            info!("updated {}", dest.display());
            (ActionKind::Update, revision)
        };

        report.actions.push(Action {
            kind,
            path: entry_path,
            destination: dest,
            revision,
        });
        Ok(())
    }
}
