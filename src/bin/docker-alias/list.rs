use std::io::Write;

use docker_alias::alias::AliasTable;

/// Write every alias as `name=tokens  # source:line`, ordered by name.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_aliases(out: &mut impl Write, aliases: &AliasTable) -> std::io::Result<()> {
    for (name, alias) in aliases.iter() {
        writeln!(
            out,
            "{name}={}  # {}:{}",
            alias.tokens.join(" "),
            alias.source.display(),
            alias.line
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use docker_alias::alias::Alias;

    use super::*;

    #[test]
    fn test_write_aliases_sorted_with_source() {
        let mut aliases = AliasTable::new();
        aliases.insert(
            "up".to_string(),
            Alias {
                tokens: vec!["compose".to_string(), "up".to_string(), "-d".to_string()],
                source: PathBuf::from("/srv/app/.docker-aliases"),
                line: 3,
            },
        );
        aliases.insert(
            "b".to_string(),
            Alias {
                tokens: vec!["build".to_string(), String::new(), ".".to_string()],
                source: PathBuf::from("/.docker-aliases"),
                line: 1,
            },
        );

        let mut out = Vec::new();
        write_aliases(&mut out, &aliases).unwrap();
        insta::assert_snapshot!(String::from_utf8(out).unwrap().trim_end(), @r"
        b=build  .  # /.docker-aliases:1
        up=compose up -d  # /srv/app/.docker-aliases:3
        ");
    }
}
