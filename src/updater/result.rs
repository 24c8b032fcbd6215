//! Outcome of an update call.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Snapshot returned by [`Updater::update`](super::Updater::update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateResult {
    updated: bool,
    filename: PathBuf,
    current_date: Option<DateTime<Utc>>,
    next_refresh_at: DateTime<Utc>,
    source: Option<String>,
}

impl UpdateResult {
    /// The bundle was downloaded from `source` during this call.
    pub fn updated(
        filename: impl Into<PathBuf>,
        current_date: Option<DateTime<Utc>>,
        next_refresh_at: DateTime<Utc>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            updated: true,
            filename: filename.into(),
            current_date,
            next_refresh_at,
            source: Some(source.into()),
        }
    }

    /// The cached bundle was still fresh; nothing was downloaded.
    pub fn already_up_to_date(
        filename: impl Into<PathBuf>,
        current_date: Option<DateTime<Utc>>,
        next_refresh_at: DateTime<Utc>,
    ) -> Self {
        Self {
            updated: false,
            filename: filename.into(),
            current_date,
            next_refresh_at,
            source: None,
        }
    }

    pub fn is_updated(&self) -> bool {
        self.updated
    }

    /// Resolved location of the cached bundle.
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Modification time of the bundle before this call, if it existed.
    pub fn current_date(&self) -> Option<DateTime<Utc>> {
        self.current_date
    }

    /// After this instant the bundle is stale.
    pub fn next_refresh_at(&self) -> DateTime<Utc> {
        self.next_refresh_at
    }

    /// URL the bundle was downloaded from.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Freshness report for the cached bundle, computed without any download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateStatus {
    pub filename: PathBuf,
    pub current_date: Option<DateTime<Utc>>,
    pub age_seconds: Option<i64>,
    pub max_age: i64,
    pub refresh_due: bool,
    pub next_refresh_at: DateTime<Utc>,
}
