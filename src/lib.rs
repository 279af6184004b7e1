//! Directory-scoped aliases for the docker CLI
//!
//! `docker-alias` sits in front of the container runtime. It collects `.docker-aliases` files
//! from the working directory and all of its ancestors, expands the first argument of the
//! invocation if it names an alias, and hands the result to the runtime binary. Aliases
//! defined closer to the working directory shadow those defined further up.

use std::path::Path;

use log::debug;

use crate::alias::AliasTable;
use crate::config_file::{ConfigError, find_alias_files, read_alias_files};

pub mod alias;
pub mod config_file;
pub mod exec;
pub mod logger;

/// Load every alias visible from `start`, merged so that nearer files win.
///
/// # Errors
///
/// Returns `ConfigError` if the directory walk fails or any alias file cannot be read or
/// contains a malformed line.
pub fn load_aliases(start: &Path) -> Result<AliasTable, ConfigError> {
    let files = find_alias_files(start)?;
    debug!(
        "Loading {} alias file(s) for {}",
        files.len(),
        start.display()
    );
    read_alias_files(&files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_file::ALIAS_FILENAME;

    #[test]
    fn test_nearer_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("project").join("service");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(dir.path().join(ALIAS_FILENAME), "build=old\nls=ps -a\n").unwrap();
        std::fs::write(project.join(ALIAS_FILENAME), "build=new\n").unwrap();

        let aliases = load_aliases(&project).unwrap();
        let expanded = aliases
            .expand(vec!["build".to_string(), ".".to_string()])
            .unwrap();
        assert_eq!(expanded, vec!["new", "."]);
        assert_eq!(
            aliases.get("ls").map(|a| a.tokens.clone()),
            Some(vec!["ps".to_string(), "-a".to_string()])
        );
    }

    #[test]
    fn test_malformed_ancestor_fails_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(dir.path().join(ALIAS_FILENAME), "no separator here\n").unwrap();
        std::fs::write(project.join(ALIAS_FILENAME), "build=new\n").unwrap();

        match load_aliases(&project) {
            Err(ConfigError::Malformed { line, .. }) => assert_eq!(line, "no separator here"),
            other => panic!("Expected Malformed, got: {other:?}"),
        }
    }
}
