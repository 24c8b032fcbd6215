//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.

pub mod config;
pub mod dispatcher;
pub mod display;
pub mod status;
pub mod update;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
