//! # Remote Repository Access
//!
//! This module defines the seams between the tree walk and the version
//! control client. The walk never talks to `svn` directly; it goes through two
//! traits:
//!
//! - **`DirectoryLister`**: answers questions about the remote tree. It lists
//!   the children of a repository-relative path, checks what kind of node sits
//!   at a path, reports the latest revision, and builds the URL of a path.
//!
//! - **`CheckoutOperations`**: materializes a remote subtree on local disk,
//!   either as a fresh checkout or as an update of an existing working copy.
//!
//! `SvnRepository` and `SvnClient` are the implementations backed by the
//! system `svn` binary. Tests swap in mocks that record calls and serve canned
//! listings, so the traversal logic can be exercised without a server.

use std::path::Path;

use url::Url;

use crate::error::Result;
use crate::svn::SvnClient;

/// Repository revision number.
pub type Revision = u64;

/// Kind of a child returned by a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// What, if anything, exists at a remote path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    None,
    File,
    Directory,
}

/// One child of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl RepositoryEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::Directory)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, EntryKind::File)
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Read access to the remote tree, always at the latest revision.
pub trait DirectoryLister {
    /// Lists the immediate children of `path` (empty means the root).
    ///
    /// Fails with [`Error::Listing`](crate::error::Error::Listing) when the
    /// path is unreachable or not a directory.
    fn list(&self, path: &str) -> Result<Vec<RepositoryEntry>>;

    /// Reports the kind of node at `path`, or [`NodeKind::None`].
    fn check_path(&self, path: &str) -> Result<NodeKind>;

    /// The repository's latest revision.
    fn latest_revision(&self) -> Result<Revision>;

    /// The URL of a repository-relative path.
    fn url_for(&self, path: &str) -> Result<Url>;
}

/// Transfer of remote subtrees into local working copies.
pub trait CheckoutOperations {
    /// Recursive checkout of `url` into `dest` at HEAD, externals included.
    fn checkout(&self, url: &Url, dest: &Path) -> Result<Revision>;

    /// Recursive, forced update of the working copy at `dest` to HEAD.
    fn update(&self, dest: &Path) -> Result<Revision>;
}

/// Appends the segments of a repository-relative path to `root`.
///
/// Each segment is percent-encoded by `url`, so names with spaces or other
/// reserved characters produce valid URLs.
pub fn join_url(root: &Url, path: &str) -> Result<Url> {
    let mut url = root.clone();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Ok(url);
    }

    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// A remote repository rooted at a URL, queried through the `svn` binary.
pub struct SvnRepository<'a> {
    root: Url,
    client: &'a SvnClient,
}

impl<'a> SvnRepository<'a> {
    pub fn new(root: Url, client: &'a SvnClient) -> Self {
        Self { root, client }
    }

    pub fn root(&self) -> &Url {
        &self.root
    }
}

impl DirectoryLister for SvnRepository<'_> {
    fn list(&self, path: &str) -> Result<Vec<RepositoryEntry>> {
        self.client.list(&self.url_for(path)?)
    }

    fn check_path(&self, path: &str) -> Result<NodeKind> {
        Ok(self.client.info(&self.url_for(path)?)?.kind)
    }

    fn latest_revision(&self) -> Result<Revision> {
        Ok(self.client.info(&self.root)?.revision)
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        join_url(&self.root, path)
    }
}
