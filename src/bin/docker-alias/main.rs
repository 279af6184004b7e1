mod list;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::debug;

use docker_alias::exec::{self, display_command};
use docker_alias::load_aliases;

/// Options are only recognised before the first forwarded argument; everything from there on
/// goes to the container runtime untouched. A leading `--` only ends option parsing and is not
/// forwarded itself.
#[derive(Parser, Debug)]
#[command(
    name = "docker-alias",
    about = "Expand directory-scoped aliases, then run docker",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Container runtime binary that receives the expanded command
    #[arg(
        long = "alias-binary",
        env = "DOCKER_ALIAS_BINARY",
        default_value = "docker"
    )]
    binary: String,

    /// Log file path (diagnostics go to stderr otherwise)
    #[arg(long = "alias-log-file", env = "DOCKER_ALIAS_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Print the expanded command instead of running it
    #[arg(long = "alias-dry-run")]
    dry_run: bool,

    /// List the aliases visible from the current directory and exit
    #[arg(long = "alias-list")]
    list: bool,

    /// Print help for the wrapper options
    #[arg(long = "alias-help", action = ArgAction::Help)]
    help: Option<bool>,

    /// Arguments for the container runtime; the first one may name an alias
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .as_ref()
        .map(std::fs::File::create)
        .transpose()?;
    docker_alias::logger::init(log_file)?;

    if cli.args.is_empty() && !cli.list {
        debug!("No arguments given, nothing to do");
        return Ok(ExitCode::SUCCESS);
    }

    let cwd = std::env::current_dir()
        .map_err(docker_alias::config_file::ConfigError::UnknownWorkingDirectory)?;
    let aliases = load_aliases(&cwd)?;

    if cli.list {
        list::write_aliases(&mut std::io::stdout().lock(), &aliases)?;
        return Ok(ExitCode::SUCCESS);
    }

    let command = aliases.expand(cli.args)?;

    if cli.dry_run {
        println!("{}", display_command(&cli.binary, &command));
        return Ok(ExitCode::SUCCESS);
    }

    let code = exec::run(&cli.binary, &command)?;
    Ok(u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from))
}
