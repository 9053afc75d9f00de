//! CLI argument parsing and run dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use log::debug;
use url::Url;

use svn_trunks::defaults::{self, DEFAULT_LOG_LEVEL, DEFAULT_SVN_BINARY};
use svn_trunks::error::Error;
use svn_trunks::mirror::{self, MirrorConfig};
use svn_trunks::suggestions::{self, SVN_SCHEMES};
use svn_trunks::svn::Credentials;

/// Exit status for usage errors and an unusable repository root.
pub const EXIT_FAILURE: i32 = 1;

/// Printed to stdout when the mandatory arguments are missing.
pub const USAGE: &str = "\
Usage: svn-trunks URL USERNAME PASSWORD [PATH]

URL:        The mandatory path to the SVN repository
USERNAME:   The username to log in as
PASSWORD:   Password for the username
[PATH]      Optional destination folder (defaults to current)


Example:   svn-trunks https://svn.example.com/repos/project david secret project-checkout
";

/// svn-trunks - Check out or update every trunk of a Subversion repository,
/// skipping branches and tags
#[derive(Parser, Debug)]
#[command(name = "svn-trunks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repository URL to mirror
    #[arg(value_name = "URL", allow_hyphen_values = true)]
    url: Option<String>,

    /// Username to log in as
    #[arg(value_name = "USERNAME", allow_hyphen_values = true)]
    username: Option<String>,

    /// Password for the username
    #[arg(value_name = "PASSWORD", allow_hyphen_values = true)]
    password: Option<String>,

    /// Destination folder (defaults to the current directory)
    #[arg(value_name = "PATH", allow_hyphen_values = true)]
    destination: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Subversion command-line client to run
    #[arg(long = "svn", value_name = "PATH", default_value = DEFAULT_SVN_BINARY)]
    svn_binary: PathBuf,
}

impl Cli {
    /// Parse the process arguments.
    ///
    /// `--help` and `--version` exit 0 through clap. Any other parse error
    /// is a usage error: clap's message goes to stderr, the usage text to
    /// stdout, and the process exits 1.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(e) if is_informational(&e) => e.exit(),
            Err(e) => {
                e.print().ok();
                print_usage_and_exit()
            }
        }
    }

    /// Execute the mirror run
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .init();

        let (Some(url), Some(username), Some(password)) =
            (&self.url, &self.username, &self.password)
        else {
            print_usage_and_exit()
        };

        let config = MirrorConfig {
            source: url.trim().to_string(),
            url: parse_repository_url(url.trim())?,
            destination: match &self.destination {
                Some(path) => trim_destination(path),
                None => defaults::default_destination()
                    .context("Failed to determine the current directory")?,
            },
            credentials: Credentials::new(username.trim(), password.trim()),
            svn_binary: self.svn_binary.clone(),
        };
        debug!("resolved configuration: {:?}", config);

        let mut stdout = io::stdout().lock();
        match mirror::execute(&config, &mut stdout) {
            Ok(_) => Ok(()),
            Err(e @ (Error::PathNotFound { .. } | Error::PathIsFile { .. })) => {
                eprintln!("{}", e);
                process::exit(EXIT_FAILURE);
            }
            Err(e) => {
                Err(anyhow::Error::new(e).context(format!("Failed to mirror {}", config.source)))
            }
        }
    }
}

fn print_usage_and_exit() -> ! {
    print!("{}", USAGE);
    io::stdout().flush().ok();
    process::exit(EXIT_FAILURE);
}

fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

/// Trim surrounding whitespace from DESTPATH. A path that is not valid
/// UTF-8 is kept byte for byte.
fn trim_destination(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(text) => PathBuf::from(text.trim()),
        None => path.to_path_buf(),
    }
}

/// Parse the repository URL, rejecting schemes `svn` cannot open.
fn parse_repository_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| suggestions::invalid_repository_url(raw, &e))?;
    if !SVN_SCHEMES.contains(&url.scheme()) {
        return Err(suggestions::unsupported_scheme(raw, url.scheme()));
    }
    Ok(url)
}
