//! # Error Handling
//!
//! This module defines the error type shared by the `svn-trunks` library. It
//! uses `thiserror` to give every failure mode a descriptive message.
//!
//! ## Key Components
//!
//! - **`Error`**: every failure the mirror run can hit, from an invalid root
//!   URL through listing and transfer failures to problems spawning `svn`.
//!
//! - **`Result<T>`**: a type alias for `std::result::Result<T, Error>`.
//!
//! None of these errors is retried. The binary turns any of them into a
//! non-zero exit status.

use thiserror::Error;

/// Main error type for svn-trunks operations
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing exists at the repository URL given on the command line.
    #[error("There is no entry at '{url}'.")]
    PathNotFound { url: String },

    /// The repository URL given on the command line points at a file.
    #[error("The entry at '{url}' is a file while a directory was expected.")]
    PathIsFile { url: String },

    /// Listing a remote directory failed somewhere in the walk.
    #[error("Listing failed for {url}: {message}")]
    Listing { url: String, message: String },

    /// A checkout or update did not complete.
    #[error("{operation} failed for {target}: {message}")]
    Transfer {
        operation: String,
        target: String,
        message: String,
    },

    /// An `svn` invocation failed outside of listing and transfer.
    #[error("svn command failed: {command} - {stderr}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    SvnCommand {
        command: String,
        stderr: String,
        /// Optional hint for how to resolve the failure
        hint: Option<String>,
    },

    /// `svn --xml` output could not be understood.
    #[error("XML parsing error: {message}")]
    XmlParse { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
