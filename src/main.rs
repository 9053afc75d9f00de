//! # svn-trunks CLI
//!
//! This is the binary entry point for the `svn-trunks` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Running the mirror and translating failures into exit codes.
//!
//! The traversal itself lives in the `svn_trunks` library crate.

mod cli;

use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::Cli::parse_or_exit();
    cli.execute()
}
