//! Setting keys, scalar values, and shipped defaults.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder that stands for the application root at the start of a path.
pub const APPLICATION_PLACEHOLDER: &str = "<APPLICATION>";

/// Default location of the cached bundle.
pub const DEFAULT_PATH: &str = "<APPLICATION>/files/cacert.pem";

/// Default maximum age of the cached bundle: 15 days.
pub const DEFAULT_MAX_AGE: i64 = 1_296_000;

/// Default source of the bundle over HTTPS.
pub const DEFAULT_HTTPS_URI: &str = "https://curl.se/ca/cacert.pem";

/// Default source of the bundle over plain HTTP.
pub const DEFAULT_HTTP_URI: &str = "http://curl.se/ca/cacert.pem";

/// Names of the persisted settings.
pub mod keys {
    /// Target file location (may start with the application placeholder).
    pub const PATH: &str = "options.path";
    /// Freshness window in seconds.
    pub const MAX_AGE: &str = "options.maxAge";
    /// Which candidate sources may be used.
    pub const REMOTE_PROTOCOL: &str = "options.remoteProtocol";
    /// Prefix of the per-protocol source URLs (`options.remoteFileUri.https`).
    pub const REMOTE_FILE_URI: &str = "options.remoteFileUri";
    /// The bundle file the HTTP client layer should trust.
    pub const ACTIVE_CERTIFICATE_FILE: &str = "app.http_client.sslcafile";
}

/// A scalar stored in the configuration store.
///
/// Settings files are written by hand as often as by this tool, so a value
/// may come back as text even where an integer is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Integer(i64),
    Text(String),
}

impl SettingValue {
    /// Borrow the value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Integer(_) => None,
        }
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_starts_with_placeholder() {
        assert!(DEFAULT_PATH.starts_with(APPLICATION_PLACEHOLDER));
    }

    #[test]
    fn default_max_age_is_fifteen_days() {
        assert_eq!(DEFAULT_MAX_AGE, 15 * 24 * 60 * 60);
    }

    #[test]
    fn untagged_yaml_integer_and_text() {
        let int: SettingValue = serde_yaml::from_str("3600").unwrap();
        let text: SettingValue = serde_yaml::from_str("\"3600\"").unwrap();
        assert_eq!(int, SettingValue::Integer(3600));
        assert_eq!(text, SettingValue::Text("3600".into()));
    }

    #[test]
    fn display_renders_raw_value() {
        assert_eq!(SettingValue::from(42i64).to_string(), "42");
        assert_eq!(SettingValue::from("https").to_string(), "https");
    }

    #[test]
    fn as_text_only_for_text() {
        assert_eq!(SettingValue::from("a").as_text(), Some("a"));
        assert_eq!(SettingValue::from(1i64).as_text(), None);
    }
}
