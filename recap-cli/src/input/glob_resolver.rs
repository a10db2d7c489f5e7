//! Input pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Resolve file patterns to existing files, sorted and deduplicated
///
/// A pattern without glob metacharacters that names an existing file is
/// taken literally, so paths containing `[` still work.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let literal = PathBuf::from(pattern);
        if literal.is_file() {
            files.push(literal);
            continue;
        }

        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;
        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;
            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInputs(patterns.to_vec()).into());
    }

    files.sort();
    files.dedup();
    log::debug!("resolved {} input file(s)", files.len());

    Ok(files)
}
