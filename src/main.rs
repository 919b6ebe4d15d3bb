use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::commands;
use fabrun::Config;

/// Exit status for a missing command name, matching clap's usage errors.
const USAGE_EXIT: u8 = 2;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "fabrun")]
#[command(disable_version_flag = true)]
#[command(about = "Run named shell snippets stored in ~/.config/fabrun/commands")]
#[command(long_about = "fabrun keeps shell snippets as files under\n\
    ~/.config/fabrun/commands/<name>/command.md and runs them by name.\n\n\
    A snippet may contain the placeholder {{input}}, which is replaced\n\
    by the value given with --var.")]
#[command(after_help = "EXAMPLES:\n    \
    fabrun --list                      List all available commands\n    \
    fabrun git_change_2weeks           Run the git_change_2weeks command\n    \
    fabrun greet --var world           Run greet with {{input}} = world\n    \
    fabrun --update-commands           Download commands from remote_url\n    \
    fabrun --version                   Show the program's version")]
struct Cli {
    /// Name of the stored command to run
    #[arg(value_name = "COMMAND")]
    command: Option<String>,

    /// Value substituted for {{input}} in the command
    #[arg(long, value_name = "VALUE")]
    var: Option<String>,

    /// List all available commands
    #[arg(short, long)]
    list: bool,

    /// Show the program's version
    #[arg(short = 'v', long)]
    version: bool,

    /// Download command definitions from the remote collection
    /// (requires remote_url in ~/.config/fabrun/config.yaml)
    #[arg(long)]
    update_commands: bool,

    /// Enable verbose output for debugging
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "fabrun=debug"
    } else {
        "fabrun=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.version {
        commands::version::run();
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load().context("Failed to load configuration")?;
    tracing::debug!("Using command store {:?}", config.commands_dir);

    if cli.list {
        commands::list::run(&config)?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.update_commands {
        commands::update::run(&config)?;
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command {
        Some(name) => commands::run::run(&config, &name, cli.var.as_deref()),
        None => {
            eprintln!("{}", Cli::command().render_help());
            Ok(ExitCode::from(USAGE_EXIT))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_command_with_var() {
        let cli = Cli::try_parse_from(["fabrun", "greet", "--var", "world"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("greet"));
        assert_eq!(cli.var.as_deref(), Some("world"));
        assert!(!cli.list);
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from(["fabrun", "-l"]).unwrap();
        assert!(cli.list);

        let cli = Cli::try_parse_from(["fabrun", "-v"]).unwrap();
        assert!(cli.version);
    }

    #[test]
    fn test_parse_update_commands() {
        let cli = Cli::try_parse_from(["fabrun", "--update-commands"]).unwrap();
        assert!(cli.update_commands);
        assert!(cli.command.is_none());
    }
}
