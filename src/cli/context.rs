//! Wiring shared by all commands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{Configuration, FileConfigStore};
use crate::error::Result;
use crate::fetch::HttpTransport;
use crate::storage::LocalFilesystem;
use crate::updater::Updater;

use super::args::Cli;

/// Directory under the application root holding the settings file.
pub const SETTINGS_DIR: &str = ".cacert-refresh";

/// Settings file name inside [`SETTINGS_DIR`].
pub const SETTINGS_FILE: &str = "settings.yml";

/// The updater as wired by the CLI.
pub type LocalUpdater = Updater<FileConfigStore, HttpTransport, LocalFilesystem>;

/// Where settings live and how downloads are performed.
#[derive(Debug, Clone)]
pub struct AppContext {
    root: PathBuf,
    settings_file: PathBuf,
    timeout: Duration,
}

impl AppContext {
    /// Create a context for `root` with the default settings location.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let settings_file = root.join(SETTINGS_DIR).join(SETTINGS_FILE);
        Self {
            root,
            settings_file,
            timeout: HttpTransport::DEFAULT_TIMEOUT,
        }
    }

    /// Build the context from global CLI flags.
    pub fn from_cli(cli: &Cli) -> Self {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

        let mut context = Self::new(root).with_timeout(Duration::from_secs(cli.timeout));
        if let Some(config) = &cli.config {
            context = context.with_settings_file(config);
        }
        context
    }

    pub fn with_settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_file(&self) -> &Path {
        &self.settings_file
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Open the settings file as a configuration accessor.
    pub fn configuration(&self) -> Result<Configuration<FileConfigStore>> {
        let store = FileConfigStore::open(&self.settings_file)?;
        Ok(Configuration::new(store, &self.root))
    }

    /// Build an updater over the settings file, HTTP and the local disk.
    pub fn updater(&self) -> Result<LocalUpdater> {
        let transport = HttpTransport::with_timeout(self.timeout)?;
        Ok(Updater::new(self.configuration()?, transport, LocalFilesystem))
    }
}
