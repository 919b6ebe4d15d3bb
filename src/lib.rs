//! fabrun - run named shell snippets
//!
//! Commands are stored as `command.md` files under
//! `~/.config/fabrun/commands/<name>/`. fabrun loads a definition by name,
//! fills in an optional `{{input}}` placeholder and runs the result through
//! a shell. The store can be populated from a remote collection.

pub mod config;
pub mod error;
pub mod exec;
pub mod store;
pub mod sync;
pub mod template;

pub use config::Config;
pub use error::{FabrunError, Result};
pub use store::CommandStore;
