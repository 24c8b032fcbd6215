//! Error types for certificate refresh operations.
//!
//! This module defines [`CertError`], the error type returned by the
//! configuration accessor and the updater, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Validation problems surface as [`CertError::InvalidParameter`] and are never retried
//! - Source failures are only "retried" by falling back to the next candidate URL
//! - Use `anyhow::Error` (via `CertError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for certificate refresh operations.
#[derive(Debug, Error)]
pub enum CertError {
    /// A caller-supplied or configured value failed validation.
    #[error("Invalid {name} parameter received")]
    InvalidParameter { name: String },

    /// The protocol filter left no candidate source URL.
    #[error("No remote file URI found for protocol '{protocol}'")]
    NoSourceAvailable { protocol: String },

    /// Every candidate source failed, or the response carried no data.
    #[error("Failed to download the certificate bundle from {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    /// The downloaded bundle could not be written to disk.
    #[error("Failed to save the certificate bundle to {path}: {message}")]
    PersistenceFailed { path: PathBuf, message: String },

    /// The settings file exists but could not be parsed.
    #[error("Failed to parse settings at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The settings file could not be saved.
    #[error("Failed to save settings to {path}: {message}")]
    ConfigWriteError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CertError {
    /// Shorthand for an [`CertError::InvalidParameter`] naming `name`.
    pub fn invalid_parameter(name: impl Into<String>) -> Self {
        Self::InvalidParameter { name: name.into() }
    }
}

/// Result type alias for certificate refresh operations.
pub type Result<T> = std::result::Result<T, CertError>;
