//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use svn_trunks::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Invalid repository URL: {}", raw);
//!
//! // Use:
//! return Err(suggestions::invalid_repository_url(raw, &error));
//! ```

use std::io;
use std::path::Path;

/// URL schemes the Subversion client understands.
pub const SVN_SCHEMES: [&str; 5] = ["http", "https", "svn", "svn+ssh", "file"];

/// Generate an error for a repository URL that does not parse.
pub fn invalid_repository_url(raw: &str, error: &url::ParseError) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid repository URL: {raw}\n\
         error: {error}\n\n\
         hint: Use a full URL such as https://svn.example.com/repos/project\n\
         hint: Supported schemes are: {schemes}",
        schemes = SVN_SCHEMES.join(", ")
    )
}

/// Generate an error for a URL whose scheme `svn` does not support.
///
/// Suggests a known scheme when the given one looks like a typo.
pub fn unsupported_scheme(raw: &str, scheme: &str) -> anyhow::Error {
    let did_you_mean = find_similar(scheme, &SVN_SCHEMES)
        .map(|s| format!("\nhint: Did you mean '{s}://'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unsupported URL scheme '{scheme}' in {raw}{did_you_mean}\n\n\
         Supported schemes are: {schemes}",
        schemes = SVN_SCHEMES.join(", ")
    )
}

/// Hint for a failure to start the `svn` binary at all.
pub fn svn_spawn_hint(binary: &Path, error: &io::Error) -> Option<String> {
    match error.kind() {
        io::ErrorKind::NotFound => Some(format!(
            "'{}' was not found. Install the Subversion command-line client \
             or pass its location with --svn",
            binary.display()
        )),
        io::ErrorKind::PermissionDenied => Some(format!(
            "'{}' is not executable by the current user",
            binary.display()
        )),
        _ => None,
    }
}

/// Hint derived from the error codes `svn` printed on stderr.
pub fn svn_stderr_hint(stderr: &str) -> Option<String> {
    if stderr.contains("E215004") || stderr.contains("E170001") {
        Some("Authentication failed. Check the USERNAME and PASSWORD arguments".to_string())
    } else if stderr.contains("E230001") {
        Some(
            "The server certificate was rejected. Accept it once with an \
             interactive 'svn info <URL>' and retry"
                .to_string(),
        )
    } else if stderr.contains("E170013") || stderr.contains("E731001") {
        Some("Unable to connect to the repository. Check the URL and your network".to_string())
    } else {
        None
    }
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
