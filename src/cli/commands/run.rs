//! Run command - execute a stored command.
//!
//! Loads the definition, substitutes `--var` for `{{input}}` and runs the
//! result through the configured shell. The child's exit code becomes
//! fabrun's own.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use fabrun::template::{self, PLACEHOLDER};
use fabrun::{exec, CommandStore, Config};

/// Executes a stored command by name.
pub fn run(config: &Config, name: &str, var: Option<&str>) -> Result<ExitCode> {
    let store = CommandStore::new(&config.commands_dir);
    let definition = store.load(name)?;
    let rendered = template::render(&definition, var)?;

    if rendered.value_ignored {
        eprintln!(
            "{}",
            format!("Note: '{name}' has no {PLACEHOLDER} placeholder; --var is ignored").yellow()
        );
    }

    let status = exec::execute(&config.shell, &rendered.text)?;
    let code = exec::exit_code(status);
    if code != 0 {
        eprintln!(
            "{}",
            format!("Command '{name}' failed ({status})").red()
        );
    }

    Ok(ExitCode::from(code))
}
