use std::process::{Command as ProcessCommand, Stdio};

use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to launch {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} was terminated by a signal")]
    Terminated { binary: String },
}

/// Render a command line for display, quoting tokens that would otherwise be lost.
#[must_use]
pub fn display_command(binary: &str, args: &[String]) -> String {
    std::iter::once(binary)
        .chain(args.iter().map(String::as_str))
        .map(|token| {
            if token.is_empty() || token.contains(char::is_whitespace) {
                format!("'{token}'")
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `binary` with `args`, sharing this process's stdin, stdout and stderr.
///
/// Blocks until the child exits and returns its exit code.
///
/// # Errors
///
/// Returns `ExecError::Spawn` if the binary cannot be started, or `ExecError::Terminated` if
/// it exits without a code (killed by a signal).
pub fn run(binary: &str, args: &[String]) -> Result<i32, ExecError> {
    debug!("Running {}", display_command(binary, args));
    let status = ProcessCommand::new(binary)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ExecError::Spawn {
            binary: binary.to_string(),
            source: e,
        })?;
    debug!("{binary} exited with {status}");

    status.code().ok_or_else(|| ExecError::Terminated {
        binary: binary.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command_quotes_empty_and_spaced_tokens() {
        let args = vec!["a".to_string(), String::new(), "b c".to_string()];
        assert_eq!(display_command("docker", &args), "docker a '' 'b c'");
    }

    #[test]
    fn test_spawn_failure() {
        let result = run("docker-alias-test-binary-that-does-not-exist", &[]);
        match result {
            Err(ExecError::Spawn { binary, .. }) => {
                assert_eq!(binary, "docker-alias-test-binary-that-does-not-exist");
            }
            other => panic!("Expected Spawn error, got: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_is_returned() {
        assert_eq!(run("true", &[]).unwrap(), 0);
        assert_eq!(run("sh", &["-c".to_string(), "exit 3".to_string()]).unwrap(), 3);
    }
}
