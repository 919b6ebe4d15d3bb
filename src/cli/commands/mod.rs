//! CLI commands for fabrun.
//!
//! Each submodule implements one mode of the binary.

/// List stored command names.
pub mod list;

/// Load, fill in and execute a stored command.
pub mod run;

/// Mirror the remote command collection into the store.
pub mod update;

/// Print the version string.
pub mod version;
