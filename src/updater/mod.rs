//! Refresh of the cached certificate bundle.
//!
//! [`Updater`] decides whether the cached bundle is stale, downloads a new
//! copy from the first candidate source that answers, replaces the file in
//! one step, and points the HTTP client settings at it.
//!
//! # Example
//!
//! ```no_run
//! use cacert_refresh::config::{Configuration, FileConfigStore};
//! use cacert_refresh::fetch::HttpTransport;
//! use cacert_refresh::storage::LocalFilesystem;
//! use cacert_refresh::updater::{UpdateOptions, Updater};
//!
//! let store = FileConfigStore::open("/srv/app/.cacert-refresh/settings.yml").unwrap();
//! let config = Configuration::new(store, "/srv/app");
//! let mut updater = Updater::new(config, HttpTransport::new().unwrap(), LocalFilesystem);
//!
//! let result = updater.update(&UpdateOptions::default(), false).unwrap();
//! println!("next refresh at {}", result.next_refresh_at());
//! ```

pub mod options;
pub mod result;

pub use options::{coerce_max_age, UpdateOptions};
pub use result::{CertificateStatus, UpdateResult};

use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};

use crate::config::{AllowedProtocol, ConfigStore, Configuration};
use crate::error::{CertError, Result};
use crate::fetch::Transport;
use crate::storage::Filesystem;

/// Keeps the cached certificate bundle fresh.
///
/// Collaborators are injected; the updater holds no global state. Calls
/// are synchronous and assume no concurrent update of the same file.
pub struct Updater<S, T, F> {
    config: Configuration<S>,
    transport: T,
    filesystem: F,
}

/// Effective parameters of one update, after options and settings are merged.
#[derive(Debug)]
struct Parameters {
    path: String,
    file: PathBuf,
    max_age: i64,
    /// `now + max_age`, checked before anything is fetched.
    next_refresh_at: DateTime<Utc>,
    allowed_protocol: Option<AllowedProtocol>,
}

/// `now + seconds`, or an invalid max age when the deadline is not representable.
fn refresh_deadline(now: DateTime<Utc>, seconds: i64) -> Result<DateTime<Utc>> {
    Duration::try_seconds(seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| CertError::invalid_parameter("maxAge"))
}

impl<S: ConfigStore, T: Transport, F: Filesystem> Updater<S, T, F> {
    pub fn new(config: Configuration<S>, transport: T, filesystem: F) -> Self {
        Self {
            config,
            transport,
            filesystem,
        }
    }

    pub fn configuration(&self) -> &Configuration<S> {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Refresh the bundle if it is stale, missing, or `force_update` is set.
    pub fn update(&mut self, options: &UpdateOptions, force_update: bool) -> Result<UpdateResult> {
        self.update_at(options, force_update, Utc::now())
    }

    /// [`update`](Self::update) against an explicit clock.
    pub fn update_at(
        &mut self,
        options: &UpdateOptions,
        force_update: bool,
        now: DateTime<Utc>,
    ) -> Result<UpdateResult> {
        let params = self.resolve(options, now)?;
        let current_date = self.filesystem.modified(&params.file);
        let current_age = current_date.map(|mtime| (now - mtime).num_seconds());

        let stale = match current_age {
            Some(age) => age > params.max_age,
            None => true,
        };

        let result = match current_age {
            Some(age) if !force_update && !stale => {
                let remaining = params.max_age - age;
                tracing::info!(
                    "Certificate bundle {} is up to date ({}s left)",
                    params.file.display(),
                    remaining
                );
                UpdateResult::already_up_to_date(
                    &params.file,
                    current_date,
                    refresh_deadline(now, remaining)?,
                )
            }
            _ => {
                let source = self.download(&params.file, params.allowed_protocol)?;
                UpdateResult::updated(
                    &params.file,
                    current_date,
                    params.next_refresh_at,
                    source,
                )
            }
        };

        if options.persist_options {
            self.persist(&params)?;
        }

        self.config.set_active_certificate_file(&params.file)?;

        Ok(result)
    }

    /// Report the bundle's freshness without downloading or writing anything.
    pub fn status(&self, options: &UpdateOptions, now: DateTime<Utc>) -> Result<CertificateStatus> {
        let params = self.resolve(options, now)?;
        let current_date = self.filesystem.modified(&params.file);
        let age_seconds = current_date.map(|mtime| (now - mtime).num_seconds());

        let (refresh_due, next_refresh_at) = match age_seconds {
            Some(age) if age <= params.max_age => {
                (false, refresh_deadline(now, params.max_age - age)?)
            }
            _ => (true, now),
        };

        Ok(CertificateStatus {
            filename: params.file,
            current_date,
            age_seconds,
            max_age: params.max_age,
            refresh_due,
            next_refresh_at,
        })
    }

    fn resolve(&self, options: &UpdateOptions, now: DateTime<Utc>) -> Result<Parameters> {
        let path = options
            .path
            .clone()
            .unwrap_or_else(|| self.config.certificate_path());
        let file = self.config.resolve_certificate_filename(&path)?;

        let raw_max_age = options
            .max_age
            .clone()
            .unwrap_or_else(|| self.config.certificate_max_age());
        let max_age = coerce_max_age(&raw_max_age);
        if max_age <= 0 {
            return Err(CertError::invalid_parameter("maxAge"));
        }
        let next_refresh_at = refresh_deadline(now, max_age)?;

        let allowed_protocol = options
            .allowed_protocol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<AllowedProtocol>)
            .transpose()?;

        tracing::debug!(
            "Resolved bundle {} (max age {}s, protocol {})",
            file.display(),
            max_age,
            allowed_protocol.unwrap_or_else(|| self.config.allowed_protocol())
        );

        Ok(Parameters {
            path,
            file,
            max_age,
            next_refresh_at,
            allowed_protocol,
        })
    }

    /// Try each candidate source in order and write the first body received.
    ///
    /// Returns the URL that served the bundle.
    fn download(&self, file: &Path, protocol: Option<AllowedProtocol>) -> Result<String> {
        let candidates = self
            .config
            .remote_file_uris(protocol.as_ref().map(AllowedProtocol::as_str))?;

        let mut last_failure: Option<(String, String)> = None;

        for url in candidates {
            tracing::debug!("Downloading certificate bundle from {}", url);

            let body = match self.transport.get(&url) {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to download certificate bundle from {}: {:#}", url, e);
                    last_failure = Some((url, format!("{:#}", e)));
                    continue;
                }
            };

            if body.is_empty() {
                return Err(CertError::DownloadFailed {
                    url,
                    reason: "no data".to_string(),
                });
            }

            self.filesystem
                .write_atomic(file, &body)
                .map_err(|e| CertError::PersistenceFailed {
                    path: file.to_path_buf(),
                    message: e.to_string(),
                })?;

            tracing::info!(
                "Saved {} bytes from {} to {}",
                body.len(),
                url,
                file.display()
            );
            return Ok(url);
        }

        let (url, reason) = last_failure.unwrap_or_default();
        Err(CertError::DownloadFailed { url, reason })
    }

    fn persist(&mut self, params: &Parameters) -> Result<()> {
        self.config.set_certificate_path(&params.path)?;
        self.config.set_certificate_max_age(params.max_age)?;
        if let Some(protocol) = params.allowed_protocol {
            self.config.set_allowed_protocol(protocol)?;
        }
        Ok(())
    }
}
