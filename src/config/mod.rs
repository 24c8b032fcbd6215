//! Refresh settings and their persistence.
//!
//! - [`settings`] - setting keys, scalar values, and shipped defaults
//! - [`store`] - the [`ConfigStore`] trait and its file/memory backends
//! - [`protocol`] - source protocols and the allowed-protocol filter
//! - [`accessor`] - [`Configuration`], typed get/set over a store
//!
//! # Example
//!
//! ```
//! use cacert_refresh::config::{Configuration, FileConfigStore};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let store = FileConfigStore::open(temp.path().join("settings.yml")).unwrap();
//! let mut config = Configuration::new(store, temp.path());
//!
//! config.set_certificate_max_age(3600).unwrap();
//! let file = config.resolve_certificate_filename(&config.certificate_path()).unwrap();
//! assert!(file.ends_with("files/cacert.pem"));
//! ```

pub mod accessor;
pub mod protocol;
pub mod settings;
pub mod store;

pub use accessor::Configuration;
pub use protocol::{AllowedProtocol, Protocol};
pub use settings::{
    keys, SettingValue, APPLICATION_PLACEHOLDER, DEFAULT_HTTPS_URI, DEFAULT_HTTP_URI,
    DEFAULT_MAX_AGE, DEFAULT_PATH,
};
pub use store::{ConfigStore, FileConfigStore, MemoryConfigStore};
