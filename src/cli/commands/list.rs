//! List command - show available commands.

use anyhow::{Context, Result};
use colored::Colorize;

use fabrun::{CommandStore, Config};

/// Executes the list command.
///
/// Prints one ` - <name>` line per stored command.
pub fn run(config: &Config) -> Result<()> {
    let store = CommandStore::new(&config.commands_dir);
    let names = store
        .list_names()
        .context("Failed to list commands")?;

    if names.is_empty() {
        println!("{}", "No commands available.".yellow());
        println!(
            "{}",
            format!(
                "Add one at {}/<name>/command.md or run 'fabrun --update-commands'",
                store.root().display()
            )
            .dimmed()
        );
        return Ok(());
    }

    println!("{}", "Available commands:".bold());
    for name in names {
        println!(" - {}", name.cyan());
    }
    Ok(())
}
