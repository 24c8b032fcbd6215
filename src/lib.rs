//! cacert-refresh - Keep an HTTPS client CA bundle up to date.
//!
//! The bundle is downloaded again once it is older than a configured
//! maximum age. Candidate sources are tried in order (HTTPS before HTTP)
//! and the file is replaced atomically, so readers never see a partial
//! bundle.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings, their defaults, and persistence
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Transport used to download the bundle
//! - [`storage`] - Filesystem access and atomic writes
//! - [`ui`] - Terminal output
//! - [`updater`] - Freshness check, fallback download, and persistence
//!
//! # Example
//!
//! ```
//! use cacert_refresh::config::{Configuration, MemoryConfigStore};
//!
//! let config = Configuration::new(MemoryConfigStore::new(), "/srv/app");
//! let uris = config.remote_file_uris(Some("https")).unwrap();
//! assert_eq!(uris, vec!["https://curl.se/ca/cacert.pem".to_string()]);
//! ```
//!
//! For end-to-end downloads, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod storage;
pub mod ui;
pub mod updater;

pub use error::{CertError, Result};
pub use updater::{UpdateOptions, UpdateResult, Updater};
