//! Alias file discovery and parsing

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::alias::{Alias, AliasTable};

/// Name of the alias file looked up in every ancestor directory
pub const ALIAS_FILENAME: &str = ".docker-aliases";

/// Errors that can occur while locating or reading alias files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(#[source] std::io::Error),
    #[error("Unable to check for alias file {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to open alias file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to read alias file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed alias in {path}:{line_number}: {line}")]
    Malformed {
        path: PathBuf,
        line_number: usize,
        line: String,
    },
}

/// Collect every alias file from `start` up to the filesystem root.
///
/// The result is ordered root-most first, so loading the files in order lets aliases closer
/// to `start` shadow those defined further up.
///
/// # Errors
///
/// Returns `ConfigError::UnknownWorkingDirectory` if `start` cannot be made absolute, or
/// `ConfigError::Stat` if checking for an alias file fails for any reason other than the
/// file not existing.
pub fn find_alias_files(start: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut path = normalize(
        &std::path::absolute(start).map_err(ConfigError::UnknownWorkingDirectory)?,
    );
    debug!("Searching for alias files from {}", path.display());
    let mut found = Vec::new();
    loop {
        debug!("Checking {}", path.display());
        let candidate = path.join(ALIAS_FILENAME);
        let exists = candidate.try_exists().map_err(|e| ConfigError::Stat {
            path: candidate.clone(),
            source: e,
        })?;
        if exists {
            info!("Found alias file: {}", candidate.display());
            found.push(candidate);
        }
        if !path.pop() {
            break;
        }
    }
    found.reverse();
    Ok(found)
}

/// Lexically resolve `.` and `..` in an absolute path without touching the filesystem.
///
/// `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Split an alias line into its name and command tokens.
///
/// The line is split on the first `=`. The name is kept verbatim and the command is split on
/// single spaces, so repeated spaces yield empty tokens. Returns `None` when there is no `=`.
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, Vec<String>)> {
    let (name, command) = line.split_once('=')?;
    Some((name, command.split(' ').map(str::to_string).collect()))
}

/// Read one alias file into `table`, replacing any aliases it redefines.
///
/// Lines starting with `#` and lines that are blank after trimming are skipped.
///
/// # Errors
///
/// Returns `ConfigError::Open`/`ConfigError::Read` on I/O failure, or
/// `ConfigError::Malformed` for a line without `=`.
pub fn read_alias_file(path: &Path, table: &mut AliasTable) -> Result<(), ConfigError> {
    let file = File::open(path).map_err(|e| ConfigError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let line_number = index + 1;
        let Some((name, tokens)) = parse_line(&line) else {
            return Err(ConfigError::Malformed {
                path: path.to_path_buf(),
                line_number,
                line: line.clone(),
            });
        };
        let name = name.to_string();
        let alias = Alias {
            tokens,
            source: path.to_path_buf(),
            line: line_number,
        };
        if let Some(shadowed) = table.insert(name.clone(), alias) {
            debug!(
                "Alias '{name}' from {}:{} overrides {}:{}",
                path.display(),
                line_number,
                shadowed.source.display(),
                shadowed.line
            );
        }
    }
    Ok(())
}

/// Merge alias files in order into a single table.
///
/// # Errors
///
/// Returns the first `ConfigError` hit while reading any of the files.
pub fn read_alias_files(paths: &[PathBuf]) -> Result<AliasTable, ConfigError> {
    let mut table = AliasTable::new();
    for path in paths {
        read_alias_file(path, &mut table)?;
    }
    Ok(table)
}
