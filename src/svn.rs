//! Thin wrapper around the system `svn` command-line client.
//!
//! Every call goes through [`SvnClient`], which carries the binary to run and
//! the credentials to pass. Output is requested in XML where `svn` offers it
//! and parsed with `xot`; checkout and update report their revision on a plain
//! text status line which is picked out with a regex.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use url::Url;
use xot::Xot;

use crate::error::{Error, Result};
use crate::repository::{CheckoutOperations, EntryKind, NodeKind, RepositoryEntry, Revision};

/// Error codes `svn info` reports when the target does not exist.
///
/// `E170000` is left out: `svn` also uses it when the repository itself
/// cannot be opened.
const MISSING_TARGET_CODES: [&str; 2] = ["W170000", "E200009"];

/// Status line printed last by `svn checkout` and `svn update`.
static REVISION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:Checked out|Updated to|At) revision (\d+)\.")
        .expect("revision pattern is valid")
});

/// Username and password handed to every `svn` invocation.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Node kind and HEAD revision reported by `svn info` for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteInfo {
    pub kind: NodeKind,
    pub revision: Revision,
}

/// Connection and authentication context for the `svn` binary.
#[derive(Debug, Clone)]
pub struct SvnClient {
    binary: PathBuf,
    credentials: Credentials,
}

impl SvnClient {
    pub fn new(binary: impl Into<PathBuf>, credentials: Credentials) -> Self {
        Self {
            binary: binary.into(),
            credentials,
        }
    }

    /// Build a command with the global options every subcommand needs.
    ///
    /// `LC_ALL=C` keeps the status lines in English so the revision regex
    /// can find them.
    fn command(&self, subcommand: &str) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.env("LC_ALL", "C")
            .arg(subcommand)
            .args(["--non-interactive", "--no-auth-cache"])
            .arg("--username")
            .arg(&self.credentials.username)
            .arg("--password")
            .arg(&self.credentials.password);
        cmd
    }

    fn info_command(&self, url: &Url) -> Command {
        let mut cmd = self.command("info");
        cmd.arg("--xml").arg(url_target(url));
        cmd
    }

    fn list_command(&self, url: &Url) -> Command {
        let mut cmd = self.command("list");
        cmd.arg("--xml").arg(url_target(url));
        cmd
    }

    fn checkout_command(&self, url: &Url, dest: &Path) -> Command {
        let mut cmd = self.command("checkout");
        cmd.args(["--depth", "infinity"])
            .arg(url_target(url))
            .arg(path_target(dest));
        cmd
    }

    fn update_command(&self, dest: &Path) -> Command {
        let mut cmd = self.command("update");
        cmd.args(["--depth", "infinity", "--force"])
            .arg(path_target(dest));
        cmd
    }

    fn run(&self, mut cmd: Command, description: &str) -> Result<Output> {
        debug!("running svn {}", description);
        cmd.output().map_err(|e| Error::SvnCommand {
            command: description.to_string(),
            stderr: e.to_string(),
            hint: crate::suggestions::svn_spawn_hint(&self.binary, &e),
        })
    }

    /// Query the kind and HEAD revision of `url`.
    ///
    /// A missing target is not an error here; it comes back as
    /// [`NodeKind::None`] so the caller can report it.
    pub fn info(&self, url: &Url) -> Result<RemoteInfo> {
        let output = self.run(self.info_command(url), &format!("info {}", url))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if MISSING_TARGET_CODES.iter().any(|code| stderr.contains(code)) {
                return Ok(RemoteInfo {
                    kind: NodeKind::None,
                    revision: 0,
                });
            }
            return Err(Error::SvnCommand {
                command: format!("info {}", url),
                stderr: stderr.trim().to_string(),
                hint: crate::suggestions::svn_stderr_hint(&stderr),
            });
        }

        parse_info_xml(&String::from_utf8_lossy(&output.stdout))
    }

    /// List the immediate children of `url` at HEAD.
    pub fn list(&self, url: &Url) -> Result<Vec<RepositoryEntry>> {
        let output = self.run(self.list_command(url), &format!("list {}", url))?;

        if !output.status.success() {
            return Err(Error::Listing {
                url: url.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_list_xml(&String::from_utf8_lossy(&output.stdout)).map_err(|e| Error::Listing {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Check out `url` into `dest`, following externals, at HEAD.
    pub fn checkout(&self, url: &Url, dest: &Path) -> Result<Revision> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let output = self.run(self.checkout_command(url, dest), &format!("checkout {}", url))?;
        transfer_revision(&output, "checkout", &dest.display().to_string())
    }

    /// Update the working copy at `dest` to HEAD, overwriting obstructions.
    pub fn update(&self, dest: &Path) -> Result<Revision> {
        let output = self.run(self.update_command(dest), &format!("update {}", dest.display()))?;
        transfer_revision(&output, "update", &dest.display().to_string())
    }
}

impl CheckoutOperations for SvnClient {
    fn checkout(&self, url: &Url, dest: &Path) -> Result<Revision> {
        SvnClient::checkout(self, url, dest)
    }

    fn update(&self, dest: &Path) -> Result<Revision> {
        SvnClient::update(self, dest)
    }
}

/// `svn` reads everything after the last `@` of a target as a peg revision.
/// A trailing `@` pins an empty peg so names like `user@corp` pass through.
fn url_target(url: &Url) -> String {
    format!("{}@", url)
}

fn path_target(path: &Path) -> OsString {
    let mut target = path.as_os_str().to_os_string();
    target.push("@");
    target
}

fn transfer_revision(output: &Output, operation: &str, target: &str) -> Result<Revision> {
    let stdout = String::from_utf8_lossy(&output.stdout);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Transfer {
            operation: operation.to_string(),
            target: target.to_string(),
            message: stderr.trim().to_string(),
        });
    }

    parse_revision(&stdout).ok_or_else(|| Error::Transfer {
        operation: operation.to_string(),
        target: target.to_string(),
        message: format!("no revision reported in output:\n{}", stdout.trim()),
    })
}

/// Extract the final revision from `svn checkout` / `svn update` output.
///
/// Only lines that start with the status phrase count, so the
/// `External at revision N.` lines printed for externals are skipped and the
/// last top-level line wins.
pub fn parse_revision(output: &str) -> Option<Revision> {
    REVISION_LINE
        .captures_iter(output)
        .last()
        .and_then(|caps| caps[1].parse().ok())
}

fn xml_error(message: impl Into<String>) -> Error {
    Error::XmlParse {
        message: message.into(),
    }
}

/// Parse `svn info --xml` output for a single target.
pub fn parse_info_xml(xml: &str) -> Result<RemoteInfo> {
    let mut xot = Xot::new();
    let root = xot.parse(xml).map_err(|e| xml_error(e.to_string()))?;

    let entry_name = xot
        .name("entry")
        .ok_or_else(|| xml_error("svn info output has no <entry> element"))?;
    let kind_name = xot.name("kind");
    let revision_name = xot.name("revision");

    let entry = xot
        .descendants(root)
        .find(|node| {
            xot.element(*node)
                .is_some_and(|element| element.name() == entry_name)
        })
        .ok_or_else(|| xml_error("svn info output has no <entry> element"))?;

    let kind = kind_name
        .and_then(|name| xot.get_attribute(entry, name))
        .ok_or_else(|| xml_error("<entry> is missing the kind attribute"))?;
    let revision = revision_name
        .and_then(|name| xot.get_attribute(entry, name))
        .ok_or_else(|| xml_error("<entry> is missing the revision attribute"))?;

    let kind = match kind {
        "dir" => NodeKind::Directory,
        "file" => NodeKind::File,
        other => return Err(xml_error(format!("unexpected node kind '{}'", other))),
    };
    let revision = revision
        .parse::<Revision>()
        .map_err(|_| xml_error(format!("invalid revision '{}'", revision)))?;

    Ok(RemoteInfo { kind, revision })
}

/// Parse `svn list --xml` output into directory entries, in listing order.
pub fn parse_list_xml(xml: &str) -> Result<Vec<RepositoryEntry>> {
    let mut xot = Xot::new();
    let root = xot.parse(xml).map_err(|e| xml_error(e.to_string()))?;

    // An empty directory produces no <entry> at all, so the name may be unknown.
    let Some(entry_name) = xot.name("entry") else {
        return Ok(Vec::new());
    };
    let kind_name = xot.name("kind");
    let name_name = xot.name("name");

    let mut entries = Vec::new();
    for node in xot.descendants(root) {
        let is_entry = xot
            .element(node)
            .is_some_and(|element| element.name() == entry_name);
        if !is_entry {
            continue;
        }

        let kind = match kind_name.and_then(|name| xot.get_attribute(node, name)) {
            Some("dir") => EntryKind::Directory,
            Some("file") => EntryKind::File,
            other => {
                return Err(xml_error(format!(
                    "unexpected entry kind {:?} in svn list output",
                    other
                )))
            }
        };

        let name = xot
            .children(node)
            .find(|child| {
                xot.element(*child)
                    .is_some_and(|element| Some(element.name()) == name_name)
            })
            .and_then(|child| xot.text_content_str(child))
            .ok_or_else(|| xml_error("<entry> is missing its <name>"))?;

        entries.push(RepositoryEntry::new(name, kind));
    }

    Ok(entries)
}
