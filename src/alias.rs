//! Alias table and expansion
//!
//! An alias maps a single name to a sequence of command tokens. Expanding an invocation
//! replaces its first token with the alias tokens and keeps the remaining arguments. When the
//! substituted command itself starts with `@name`, `name` is looked up again, which lets one
//! alias build on another.

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::debug;
use thiserror::Error;

/// Prefix marking a reference to another alias
pub const ALIAS_REFERENCE: char = '@';

#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("Cyclic alias: {}", chain.join(" -> "))]
    Cyclic { chain: Vec<String> },
}

/// A single alias definition and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub tokens: Vec<String>,
    pub source: PathBuf,
    /// 1-based line number in `source`
    pub line: usize,
}

/// Merged aliases from every alias file in scope.
///
/// Later insertions replace earlier ones for the same name, so loading files root-most first
/// leaves the definition closest to the working directory in place.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: BTreeMap<String, Alias>,
}

impl AliasTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an alias, returning the definition it shadowed (if any).
    pub fn insert(&mut self, name: String, alias: Alias) -> Option<Alias> {
        self.aliases.insert(name, alias)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Iterate over all aliases, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Alias)> {
        self.aliases.iter().map(|(name, alias)| (name.as_str(), alias))
    }

    /// Expand the first argument of `args` against this table.
    ///
    /// Arguments whose first token is not an alias are returned unchanged. A substituted
    /// command starting with `@` has every leading `@` stripped and is expanded again.
    ///
    /// # Errors
    ///
    /// Returns `ExpandError::Cyclic` if an alias is reached a second time while following
    /// `@` references.
    pub fn expand(&self, mut args: Vec<String>) -> Result<Vec<String>, ExpandError> {
        let mut chain: Vec<String> = Vec::new();
        loop {
            let Some(name) = args.first() else {
                return Ok(args);
            };
            let Some(alias) = self.get(name) else {
                return Ok(args);
            };

            if chain.iter().any(|seen| seen == name) {
                chain.push(name.clone());
                return Err(ExpandError::Cyclic { chain });
            }
            debug!(
                "Expanding alias '{name}' from {}:{}",
                alias.source.display(),
                alias.line
            );
            chain.push(name.clone());

            let mut expanded = alias.tokens.clone();
            expanded.extend(args.drain(1..));

            if !expanded
                .first()
                .is_some_and(|first| first.starts_with(ALIAS_REFERENCE))
            {
                return Ok(expanded);
            }
            expanded[0] = expanded[0].trim_start_matches(ALIAS_REFERENCE).to_string();
            args = expanded;
        }
    }
}
