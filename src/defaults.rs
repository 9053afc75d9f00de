//! Default values for svn-trunks.
//!
//! This module provides centralized default values used by the command line,
//! ensuring consistency and avoiding duplication.

use std::io;
use std::path::PathBuf;

/// The Subversion client looked up on `PATH` unless `--svn` says otherwise.
pub const DEFAULT_SVN_BINARY: &str = "svn";

/// Log level used when `--log-level` is not given.
///
/// Progress goes to stdout regardless; logs go to stderr.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Returns the default destination: the absolute current working directory.
pub fn default_destination() -> io::Result<PathBuf> {
    std::env::current_dir()
}
