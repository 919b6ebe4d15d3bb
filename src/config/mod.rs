//! Configuration management
//!
//! Resolves the per-user locations fabrun works with and reads the
//! optional `~/.config/fabrun/config.yaml` overrides. The resulting
//! [`Config`] is built once in `main` and handed to every operation.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FabrunError, Result};

/// Shell used to run definitions when none is configured.
pub const DEFAULT_SHELL: &str = "sh";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one subdirectory per command.
    pub commands_dir: PathBuf,

    /// Remote listing URL mirrored by `--update-commands`. There is no
    /// default collection; `remote_url` must be set in `config.yaml`.
    pub remote_url: Option<String>,

    /// Shell invoked as `<shell> -c <definition>`.
    pub shell: String,
}

/// On-disk shape of `config.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    commands_dir: Option<PathBuf>,
    remote_url: Option<String>,
    shell: Option<String>,
}

impl Config {
    /// Loads configuration for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`FabrunError::HomeDir`] when no home directory is known,
    /// or [`FabrunError::Config`] when the config file is malformed.
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir().ok_or(FabrunError::HomeDir)?;
        Self::from_home(&home)
    }

    /// Builds configuration rooted at an explicit home directory.
    pub fn from_home(home: &Path) -> Result<Self> {
        let base = Self::base_dir(home);
        let file = Self::read_file(&base.join("config.yaml"))?;

        Ok(Self {
            commands_dir: file.commands_dir.unwrap_or_else(|| base.join("commands")),
            remote_url: file.remote_url,
            shell: file.shell.unwrap_or_else(|| DEFAULT_SHELL.to_string()),
        })
    }

    /// Returns `~/.config/fabrun` for the given home directory.
    pub fn base_dir(home: &Path) -> PathBuf {
        home.join(".config").join("fabrun")
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        if !path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(path).map_err(|e| FabrunError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }

        tracing::debug!("Loading config from {:?}", path);
        serde_saphyr::from_str(&content).map_err(|e| FabrunError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_config_file() {
        let home = tempdir().unwrap();
        let config = Config::from_home(home.path()).unwrap();

        assert_eq!(
            config.commands_dir,
            home.path().join(".config/fabrun/commands")
        );
        assert_eq!(config.remote_url, None);
        assert_eq!(config.shell, "sh");
    }

    #[test]
    fn test_config_file_overrides() {
        let home = tempdir().unwrap();
        let base = Config::base_dir(home.path());
        fs::create_dir_all(&base).unwrap();
        fs::write(
            base.join("config.yaml"),
            "commands_dir: /srv/snippets\nshell: bash\nremote_url: https://example.com/list\n",
        )
        .unwrap();

        let config = Config::from_home(home.path()).unwrap();

        assert_eq!(config.commands_dir, PathBuf::from("/srv/snippets"));
        assert_eq!(config.shell, "bash");
        assert_eq!(config.remote_url.as_deref(), Some("https://example.com/list"));
    }

    #[test]
    fn test_empty_config_file_uses_defaults() {
        let home = tempdir().unwrap();
        let base = Config::base_dir(home.path());
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("config.yaml"), "\n").unwrap();

        let config = Config::from_home(home.path()).unwrap();
        assert_eq!(config.shell, DEFAULT_SHELL);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let home = tempdir().unwrap();
        let base = Config::base_dir(home.path());
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("config.yaml"), "colour: blue\n").unwrap();

        let err = Config::from_home(home.path()).unwrap_err();
        assert!(matches!(err, FabrunError::Config { .. }));
    }
}
