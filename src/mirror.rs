//! Top-level mirror run.
//!
//! Verifies that the repository URL names a directory, echoes the source and
//! destination, walks the tree and finishes with the repository's latest
//! revision. All of it is written to the given output; the binary passes
//! stdout.

use std::io::Write;
use std::path::PathBuf;

use log::info;
use url::Url;

use crate::error::{Error, Result};
use crate::repository::{CheckoutOperations, DirectoryLister, NodeKind, Revision, SvnRepository};
use crate::svn::{Credentials, SvnClient};
use crate::walker::{TreeWalker, WalkReport};

/// Everything a run needs, as resolved from the command line.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Repository URL exactly as given, used in messages.
    pub source: String,
    pub url: Url,
    pub destination: PathBuf,
    pub credentials: Credentials,
    pub svn_binary: PathBuf,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSummary {
    pub report: WalkReport,
    pub latest_revision: Revision,
}

/// Runs the mirror against the system `svn` client.
pub fn execute(config: &MirrorConfig, out: &mut dyn Write) -> Result<MirrorSummary> {
    let client = SvnClient::new(&config.svn_binary, config.credentials.clone());
    let repository = SvnRepository::new(config.url.clone(), &client);
    info!("mirroring {} into {}", repository.root(), config.destination.display());
    run(config, &repository, &client, out)
}

/// Runs the mirror with explicit collaborators.
pub fn run(
    config: &MirrorConfig,
    lister: &dyn DirectoryLister,
    ops: &dyn CheckoutOperations,
    out: &mut dyn Write,
) -> Result<MirrorSummary> {
    match lister.check_path("")? {
        NodeKind::None => {
            return Err(Error::PathNotFound {
                url: config.source.clone(),
            })
        }
        NodeKind::File => {
            return Err(Error::PathIsFile {
                url: config.source.clone(),
            })
        }
        NodeKind::Directory => {}
    }

    writeln!(out, "Checkout source: {}", config.source)?;
    writeln!(out, "Checkout destination: {}", config.destination.display())?;

    let report = TreeWalker::new(lister, ops, &config.destination).walk(out)?;

    let latest_revision = lister.latest_revision()?;
    writeln!(out, "Repository latest revision: {}", latest_revision)?;

    Ok(MirrorSummary {
        report,
        latest_revision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{join_url, RepositoryEntry};
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::TempDir;

    struct FakeRepository {
        root: Url,
        kind: NodeKind,
        revision: Revision,
        listed: RefCell<usize>,
    }

    impl FakeRepository {
        fn new(kind: NodeKind) -> Self {
            Self {
                root: Url::parse("svn://svn.example.com/repos").unwrap(),
                kind,
                revision: 31,
                listed: RefCell::new(0),
            }
        }
    }

    impl DirectoryLister for FakeRepository {
        fn list(&self, path: &str) -> Result<Vec<RepositoryEntry>> {
            *self.listed.borrow_mut() += 1;
            Ok(match path {
                "" => vec![
                    RepositoryEntry::directory("branches"),
                    RepositoryEntry::directory("trunk"),
                ],
                _ => Vec::new(),
            })
        }

        fn check_path(&self, _path: &str) -> Result<NodeKind> {
            Ok(self.kind)
        }

        fn latest_revision(&self) -> Result<Revision> {
            Ok(self.revision)
        }

        fn url_for(&self, path: &str) -> Result<Url> {
            join_url(&self.root, path)
        }
    }

    struct NoopOps;

    impl CheckoutOperations for NoopOps {
        fn checkout(&self, _url: &Url, _dest: &Path) -> Result<Revision> {
            Ok(31)
        }

        fn update(&self, _dest: &Path) -> Result<Revision> {
            Ok(31)
        }
    }

    fn config(destination: &Path) -> MirrorConfig {
        MirrorConfig {
            source: "svn://svn.example.com/repos".to_string(),
            url: Url::parse("svn://svn.example.com/repos").unwrap(),
            destination: destination.to_path_buf(),
            credentials: Credentials::new("alice", "secret"),
            svn_binary: PathBuf::from("svn"),
        }
    }

    #[test]
    fn test_run_prints_header_progress_and_revision() {
        let temp = TempDir::new().unwrap();
        let repository = FakeRepository::new(NodeKind::Directory);
        let mut out = Vec::new();

        let summary = run(&config(temp.path()), &repository, &NoopOps, &mut out).unwrap();

        let expected = format!(
            "Checkout source: svn://svn.example.com/repos\n\
             Checkout destination: {}\n\
             checkout:  to revision @31\n\
             Repository latest revision: 31\n",
            temp.path().display()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(summary.latest_revision, 31);
        assert_eq!(summary.report.paths(), vec!["trunk"]);
    }

    #[test]
    fn test_run_missing_root() {
        let temp = TempDir::new().unwrap();
        let repository = FakeRepository::new(NodeKind::None);
        let mut out = Vec::new();

        let err = run(&config(temp.path()), &repository, &NoopOps, &mut out).unwrap_err();

        assert_eq!(
            err.to_string(),
            "There is no entry at 'svn://svn.example.com/repos'."
        );
        assert!(out.is_empty());
        assert_eq!(*repository.listed.borrow(), 0);
    }

    #[test]
    fn test_run_root_is_file() {
        let temp = TempDir::new().unwrap();
        let repository = FakeRepository::new(NodeKind::File);

        let err = run(
            &config(temp.path()),
            &repository,
            &NoopOps,
            &mut std::io::sink(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::PathIsFile { .. }));
        assert_eq!(*repository.listed.borrow(), 0);
    }
}
