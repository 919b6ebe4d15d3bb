//! Error types for fabrun.
//!
//! Every fallible library operation returns [`FabrunError`]. The binary
//! adds context with `anyhow` and turns any error into a non-zero exit.

use std::io;
use std::path::PathBuf;

/// Custom error type for store, execution, and sync operations.
#[derive(Debug, thiserror::Error)]
pub enum FabrunError {
    /// The home directory could not be determined.
    #[error("Could not find home directory")]
    HomeDir,

    /// The config file exists but could not be read or parsed.
    #[error("Invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// No definition file exists for the command.
    #[error("Command '{name}' not found (expected {})", path.display())]
    NotFound { name: String, path: PathBuf },

    /// An I/O fault while reading a definition or listing the store.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The definition file contains nothing but whitespace.
    #[error("Command '{name}' is empty ({})", path.display())]
    EmptyDefinition { name: String, path: PathBuf },

    /// The command name is not a single path segment.
    #[error("Invalid command name '{0}'")]
    InvalidName(String),

    /// The invocation is missing something the command needs.
    #[error("{0}")]
    Usage(String),

    /// The shell could not be started.
    #[error("Failed to start shell '{shell}': {source}")]
    Spawn {
        shell: String,
        #[source]
        source: io::Error,
    },

    /// A remote listing or download was unusable.
    #[error("Remote error at {url}: {message}")]
    Network { url: String, message: String },

    /// The remote server answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A local directory or file could not be created during sync.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result alias for fabrun library operations.
pub type Result<T> = std::result::Result<T, FabrunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_includes_name_and_path() {
        let err = FabrunError::NotFound {
            name: "greet".to_string(),
            path: PathBuf::from("/tmp/commands/greet/command.md"),
        };
        let msg = err.to_string();
        assert!(msg.contains("greet"));
        assert!(msg.contains("/tmp/commands/greet/command.md"));
    }

    #[test]
    fn test_server_error_display() {
        let err = FabrunError::Server {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_usage_error_is_message_only() {
        let err = FabrunError::Usage("missing --var".to_string());
        assert_eq!(err.to_string(), "missing --var");
    }
}
