//! # svn-trunks Library
//!
//! This library mirrors the trunks of a Subversion repository onto local disk.
//! It walks the remote tree, finds every project root (a directory laid out
//! with `trunk`, `branches` and `tags`), and checks out or updates everything
//! in it except `branches` and `tags`. It is used by the `svn-trunks`
//! command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use svn_trunks::classify::{is_excluded_name, is_project_boundary};
//! use svn_trunks::repository::RepositoryEntry;
//!
//! let project = vec![
//!     RepositoryEntry::directory("trunk"),
//!     RepositoryEntry::directory("Tags"),
//!     RepositoryEntry::file("README"),
//! ];
//! assert!(is_project_boundary(&project));
//! assert!(is_excluded_name(&project[1]));
//!
//! let namespace = vec![
//!     RepositoryEntry::directory("lib"),
//!     RepositoryEntry::directory("docs"),
//! ];
//! assert!(!is_project_boundary(&namespace));
//! ```
//!
//! ## Core Concepts
//!
//! - **Classification (`classify`)**: decides whether a listing is a project
//!   root and which entries are never touched.
//! - **Repository access (`repository`)**: the `DirectoryLister` and
//!   `CheckoutOperations` traits the walk is written against.
//! - **Subversion client (`svn`)**: drives the system `svn` binary and parses
//!   its output.
//! - **Tree walk (`walker`)**: the recursive descent that acts at project
//!   roots and descends through everything else.
//! - **Mirror run (`mirror`)**: checks the root, runs the walk, and prints the
//!   summary lines.

pub mod classify;
pub mod defaults;
pub mod error;
pub mod mirror;
pub mod repository;
pub mod suggestions;
pub mod svn;
pub mod walker;

#[cfg(test)]
mod classify_proptest;
