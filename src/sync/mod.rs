//! Remote command sync.
//!
//! Mirrors a remote directory tree of command definitions into the local
//! store. The tree is walked twice: once to count files so a progress
//! indicator can be sized, then again to download them. Local entries are
//! only created or overwritten, never deleted, and a failed sync leaves
//! whatever it already wrote in place.
//!
//! # Submodules
//!
//! - `client` - HTTP implementation of [`RemoteSource`]

pub mod client;

pub use client::HttpSource;

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{FabrunError, Result};

/// Kind of a remote tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    #[serde(alias = "directory")]
    Dir,
    /// Symlinks, submodules and anything else the listing may report.
    #[serde(other)]
    Other,
}

/// One node of a remote listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteEntry {
    /// Entry name, used as the local path segment.
    pub name: String,

    /// File or directory discriminator.
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Listing URL for directories.
    #[serde(default)]
    pub url: Option<String>,

    /// Content URL for files.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl RemoteEntry {
    /// Creates a file entry.
    pub fn file(name: &str, download_url: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::File,
            url: None,
            download_url: Some(download_url.to_string()),
        }
    }

    /// Creates a directory entry.
    pub fn dir(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::Dir,
            url: Some(url.to_string()),
            download_url: None,
        }
    }
}

/// Access to a remote tree of command definitions.
pub trait RemoteSource {
    /// Lists the children of the directory at `url`.
    fn list(&self, url: &str) -> Result<Vec<RemoteEntry>>;

    /// Downloads the content of the file at `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Progress sink for the download pass.
pub trait Progress {
    /// Called once after counting, before any download.
    fn start(&mut self, total: u64);

    /// Called after each file is written.
    fn advance(&mut self);

    /// Called once after the last file.
    fn finish(&mut self) {}
}

/// What a sync did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Local directories created or confirmed, excluding the destination.
    pub directories: u64,
    /// Files written.
    pub files: u64,
    /// Entries skipped for lacking a URL.
    pub skipped: u64,
}

/// Counts downloadable files in the tree rooted at `url`.
///
/// Entries that `mirror` would skip are not counted, so the total matches
/// the number of `on_file` calls of a successful mirror.
pub fn count_files(source: &dyn RemoteSource, url: &str) -> Result<u64> {
    let mut total = 0;
    for entry in source.list(url)? {
        match entry.kind {
            EntryKind::File if entry.download_url.is_some() => total += 1,
            EntryKind::File => {}
            EntryKind::Dir => {
                if let Some(child) = entry.url.as_deref() {
                    total += count_files(source, child)?;
                }
            }
            EntryKind::Other => {}
        }
    }
    Ok(total)
}

/// Downloads the tree rooted at `url` into `dest`.
///
/// `on_file` runs once per written file.
pub fn mirror(
    source: &dyn RemoteSource,
    url: &str,
    dest: &Path,
    on_file: &mut dyn FnMut(),
) -> Result<SyncReport> {
    let mut report = SyncReport::default();
    create_dir(dest)?;
    mirror_dir(source, url, dest, on_file, &mut report)?;
    Ok(report)
}

fn mirror_dir(
    source: &dyn RemoteSource,
    url: &str,
    dest: &Path,
    on_file: &mut dyn FnMut(),
    report: &mut SyncReport,
) -> Result<()> {
    for entry in source.list(url)? {
        if entry.kind == EntryKind::Other {
            tracing::debug!("Ignoring remote entry {:?}", entry.name);
            continue;
        }
        check_entry_name(url, &entry.name)?;
        let local = dest.join(&entry.name);

        match entry.kind {
            EntryKind::Dir => {
                let Some(child) = entry.url.as_deref() else {
                    tracing::warn!("Skipping directory {:?}: no listing URL", entry.name);
                    report.skipped += 1;
                    continue;
                };
                create_dir(&local)?;
                report.directories += 1;
                mirror_dir(source, child, &local, on_file, report)?;
            }
            EntryKind::File => {
                let Some(download) = entry.download_url.as_deref() else {
                    tracing::warn!("Skipping file {:?}: no download URL", entry.name);
                    report.skipped += 1;
                    continue;
                };
                let content = source.fetch(download)?;
                fs::write(&local, content).map_err(|source| FabrunError::Write {
                    path: local.clone(),
                    source,
                })?;
                tracing::debug!("Wrote {:?}", local);
                report.files += 1;
                on_file();
            }
            EntryKind::Other => {}
        }
    }
    Ok(())
}

/// Counts, then mirrors, reporting to `progress`.
pub fn sync(
    source: &dyn RemoteSource,
    url: &str,
    dest: &Path,
    progress: &mut dyn Progress,
) -> Result<SyncReport> {
    tracing::info!("Counting remote commands at {}", url);
    let total = count_files(source, url)?;
    progress.start(total);

    let report = mirror(source, url, dest, &mut || progress.advance())?;
    progress.finish();

    tracing::info!(
        "Synced {} files into {} directories ({} skipped)",
        report.files,
        report.directories,
        report.skipped
    );
    Ok(report)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| FabrunError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Rejects names that would place an entry outside its parent.
fn check_entry_name(url: &str, name: &str) -> Result<()> {
    crate::store::validate_name(name).map_err(|_| FabrunError::Network {
        url: url.to_string(),
        message: format!("unsafe entry name {name:?}"),
    })
}
