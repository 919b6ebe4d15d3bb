//! Command store.
//!
//! Each command lives in its own directory under the store root and its
//! definition is the `command.md` file inside it:
//!
//! ```text
//! ~/.config/fabrun/commands/
//!     greet/command.md
//!     git_change_2weeks/command.md
//! ```
//!
//! Plain files directly under the root are not commands.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{FabrunError, Result};

/// File name holding a command's definition inside its directory.
pub const DEFINITION_FILE: &str = "command.md";

/// Read access to the command definitions under a store root.
#[derive(Debug, Clone)]
pub struct CommandStore {
    root: PathBuf,
}

impl CommandStore {
    /// Creates a store over the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the definition path for a command name.
    ///
    /// # Errors
    ///
    /// Returns [`FabrunError::InvalidName`] if the name is not a single
    /// path segment.
    pub fn resolve_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name).join(DEFINITION_FILE))
    }

    /// Returns true if a definition file exists for the name.
    pub fn exists(&self, name: &str) -> bool {
        self.resolve_path(name).is_ok_and(|p| p.is_file())
    }

    /// Loads the definition for a command.
    ///
    /// Lines are kept with their newlines so multi-line scripts run as
    /// written; leading and trailing whitespace of the whole text is trimmed.
    /// Bytes that are not valid UTF-8 become U+FFFD.
    pub fn load(&self, name: &str) -> Result<String> {
        let path = self.resolve_path(name)?;
        tracing::debug!("Loading command '{}' from {:?}", name, path);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FabrunError::NotFound {
                    name: name.to_string(),
                    path,
                });
            }
            Err(source) => return Err(FabrunError::Read { path, source }),
        };

        let mut bytes = Vec::new();
        for line in BufReader::new(file).split(b'\n') {
            let mut line = line.map_err(|source| FabrunError::Read {
                path: path.clone(),
                source,
            })?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            bytes.extend_from_slice(&line);
            bytes.push(b'\n');
        }

        let text = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = text {
            tracing::warn!("{:?} is not valid UTF-8; invalid bytes replaced", path);
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(FabrunError::EmptyDefinition {
                name: name.to_string(),
                path,
            });
        }

        Ok(text.to_string())
    }

    /// Lists command names, sorted lexicographically.
    ///
    /// A missing store root is an empty store.
    pub fn list_names(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Store root {:?} does not exist", self.root);
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(FabrunError::Read {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| FabrunError::Read {
                path: self.root.clone(),
                source,
            })?;
            // Follows symlinks, as `load` does.
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => {
                    tracing::warn!("Skipping command directory with non-UTF-8 name {:?}", name);
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

/// Checks that a name maps to exactly one directory under the root.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(FabrunError::InvalidName(name.to_string()));
    }
    Ok(())
}
