//! Command-line interface.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//! - [`context`] - Settings/transport wiring shared by all commands

pub mod args;
pub mod commands;
pub mod context;

pub use args::{Cli, Commands, StatusArgs, UpdateArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use context::AppContext;
