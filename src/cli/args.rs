//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::config::ConfigArgs;

/// cacert-refresh - Keep the HTTPS client CA bundle up to date.
#[derive(Debug, Parser)]
#[command(name = "cacert-refresh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Application root that `<APPLICATION>` in paths refers to (defaults to current directory)
    #[arg(long, global = true, env = "CACERT_REFRESH_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to the settings file (defaults to <root>/.cacert-refresh/settings.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Download timeout in seconds, per source
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Update the certificate bundle if necessary (default if no command specified)
    Update(UpdateArgs),

    /// Show whether the certificate bundle is due for a refresh
    Status(StatusArgs),

    /// Show or change the persisted settings
    Config(ConfigArgs),
}

/// Arguments for the `update` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpdateArgs {
    /// Where to store the certificate bundle (may start with <APPLICATION>)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Maximum age (in seconds) of the bundle before it gets downloaded again
    #[arg(short = 'a', long)]
    pub max_age: Option<String>,

    /// Allowed source protocol: https, http or any
    #[arg(long)]
    pub protocol: Option<String>,

    /// Download the bundle even if it is still fresh
    #[arg(short, long)]
    pub force: bool,

    /// Save the path, max age and protocol used as the new defaults
    #[arg(long)]
    pub persist: bool,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Certificate bundle path to inspect (may start with <APPLICATION>)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Maximum age (in seconds) to evaluate the bundle against
    #[arg(short = 'a', long)]
    pub max_age: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
