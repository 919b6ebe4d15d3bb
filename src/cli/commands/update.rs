//! Update command - mirror remote command definitions.
//!
//! Downloads the remote collection into the store root with a progress
//! bar on standard output. Existing local commands are kept; files with
//! the same path are overwritten.

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use fabrun::sync::{self, HttpSource, Progress};
use fabrun::Config;

/// Progress bar shown while downloading.
#[derive(Default)]
struct BarProgress {
    bar: Option<ProgressBar>,
}

impl Progress for BarProgress {
    fn start(&mut self, total: u64) {
        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_message("Downloading commands");
        self.bar = Some(bar);
    }

    fn advance(&mut self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message("Commands downloaded");
        }
    }
}

/// Executes the update command.
pub fn run(config: &Config) -> Result<()> {
    let remote_url = config.remote_url.as_deref().ok_or_else(|| {
        anyhow!("No remote command collection configured. Set remote_url in ~/.config/fabrun/config.yaml")
    })?;

    println!("Updating commands from {}", remote_url.cyan());

    let source = HttpSource::new().context("Failed to create HTTP client")?;
    let mut progress = BarProgress::default();
    let report = sync::sync(
        &source,
        remote_url,
        &config.commands_dir,
        &mut progress,
    )
    .context("Failed to update commands")?;

    println!(
        "{}",
        format!(
            "Updated {} files in {}",
            report.files,
            config.commands_dir.display()
        )
        .green()
    );
    if report.skipped > 0 {
        println!(
            "{}",
            format!("{} entries skipped (no download URL)", report.skipped).yellow()
        );
    }
    Ok(())
}
