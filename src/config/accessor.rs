//! Typed access to the persisted refresh settings.

use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

use crate::error::{CertError, Result};

use super::protocol::{AllowedProtocol, Protocol};
use super::settings::{
    keys, SettingValue, APPLICATION_PLACEHOLDER, DEFAULT_HTTPS_URI, DEFAULT_HTTP_URI,
    DEFAULT_MAX_AGE, DEFAULT_PATH,
};
use super::store::ConfigStore;

/// Reads and writes refresh settings through a [`ConfigStore`].
///
/// Every setter compares against the current value first and skips the
/// store write when nothing changed.
///
/// # Example
///
/// ```
/// use cacert_refresh::config::{AllowedProtocol, Configuration, MemoryConfigStore};
///
/// let mut config = Configuration::new(MemoryConfigStore::new(), "/srv/app");
/// config.set_allowed_protocol(AllowedProtocol::Https).unwrap();
///
/// let uris = config.remote_file_uris(None).unwrap();
/// assert_eq!(uris, vec!["https://curl.se/ca/cacert.pem".to_string()]);
/// ```
#[derive(Debug)]
pub struct Configuration<S> {
    store: S,
    application_root: PathBuf,
}

impl<S: ConfigStore> Configuration<S> {
    /// Create an accessor over `store`, resolving placeholders against `application_root`.
    pub fn new(store: S, application_root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            application_root: application_root.into(),
        }
    }

    pub fn application_root(&self) -> &Path {
        &self.application_root
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve a configured path into the file location on this host.
    ///
    /// A leading `<APPLICATION>` is replaced by the application root and
    /// `/` separators are converted to the platform separator.
    pub fn resolve_certificate_filename(&self, path: &str) -> Result<PathBuf> {
        let path = path.trim();
        if path.is_empty() {
            return Err(CertError::invalid_parameter("path"));
        }

        let resolved = match path.strip_prefix(APPLICATION_PLACEHOLDER) {
            Some(rest) => format!("{}{}", self.application_root.to_string_lossy(), rest),
            None => path.to_string(),
        };

        Ok(PathBuf::from(resolved.replace('/', MAIN_SEPARATOR_STR)))
    }

    /// Configured bundle path, possibly containing the placeholder.
    pub fn certificate_path(&self) -> String {
        match self.store.get(keys::PATH) {
            Some(value) => value.to_string(),
            None => DEFAULT_PATH.to_string(),
        }
    }

    pub fn set_certificate_path(&mut self, value: &str) -> Result<()> {
        let current = self.certificate_path();
        self.save_if_changed(keys::PATH, current == value, value.into())
    }

    /// Configured maximum age, exactly as stored.
    ///
    /// The stored value may be text; the updater coerces and validates it.
    pub fn certificate_max_age(&self) -> SettingValue {
        self.store
            .get(keys::MAX_AGE)
            .unwrap_or(SettingValue::Integer(DEFAULT_MAX_AGE))
    }

    pub fn set_certificate_max_age(&mut self, value: i64) -> Result<()> {
        let unchanged = self.certificate_max_age() == SettingValue::Integer(value);
        self.save_if_changed(keys::MAX_AGE, unchanged, value.into())
    }

    /// Allowed protocol. Unrecognized stored values read as [`AllowedProtocol::Any`].
    pub fn allowed_protocol(&self) -> AllowedProtocol {
        self.store
            .get(keys::REMOTE_PROTOCOL)
            .and_then(|v| v.as_text().and_then(|s| s.parse().ok()))
            .unwrap_or_default()
    }

    pub fn set_allowed_protocol(&mut self, value: AllowedProtocol) -> Result<()> {
        let unchanged = self.allowed_protocol() == value;
        self.save_if_changed(keys::REMOTE_PROTOCOL, unchanged, value.as_str().into())
    }

    /// Source URL for one protocol. An empty stored value disables the source.
    pub fn remote_file_uri(&self, protocol: Protocol) -> Option<String> {
        let uri = match self.store.get(&protocol.config_key()) {
            Some(value) => value.to_string(),
            None => match protocol {
                Protocol::Https => DEFAULT_HTTPS_URI.to_string(),
                Protocol::Http => DEFAULT_HTTP_URI.to_string(),
            },
        };

        let uri = uri.trim();
        if uri.is_empty() {
            None
        } else {
            Some(uri.to_string())
        }
    }

    pub fn set_remote_file_uri(&mut self, protocol: Protocol, value: &str) -> Result<()> {
        let value = value.trim();
        let unchanged = self.remote_file_uri(protocol).as_deref().unwrap_or("") == value;
        self.save_if_changed(&protocol.config_key(), unchanged, value.into())
    }

    /// Candidate source URLs in download order.
    ///
    /// `allowed_protocol` overrides the persisted filter and must be one of
    /// `any`, `*`, `https` or `http`. HTTPS sources always come first.
    pub fn remote_file_uris(&self, allowed_protocol: Option<&str>) -> Result<Vec<String>> {
        let filter = match allowed_protocol.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<AllowedProtocol>()?,
            None => self.allowed_protocol(),
        };

        let uris: Vec<String> = Protocol::PREFERENCE
            .iter()
            .filter(|protocol| filter.allows(**protocol))
            .filter_map(|protocol| self.remote_file_uri(*protocol))
            .collect();

        if uris.is_empty() {
            return Err(CertError::NoSourceAvailable {
                protocol: filter.to_string(),
            });
        }

        Ok(uris)
    }

    /// Bundle file currently handed to the HTTP client layer.
    pub fn active_certificate_file(&self) -> Option<PathBuf> {
        self.store
            .get(keys::ACTIVE_CERTIFICATE_FILE)
            .map(|v| PathBuf::from(v.to_string()))
            .filter(|p| !p.as_os_str().is_empty())
    }

    pub fn set_active_certificate_file(&mut self, file: &Path) -> Result<()> {
        let unchanged = self.active_certificate_file().as_deref() == Some(file);
        self.save_if_changed(
            keys::ACTIVE_CERTIFICATE_FILE,
            unchanged,
            file.to_string_lossy().into_owned().into(),
        )
    }

    fn save_if_changed(&mut self, key: &str, unchanged: bool, value: SettingValue) -> Result<()> {
        if unchanged {
            tracing::trace!("Setting {} unchanged, skipping write", key);
            return Ok(());
        }

        tracing::debug!("Saving setting {} = {}", key, value);
        self.store.set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigStore;

    fn config() -> Configuration<MemoryConfigStore> {
        Configuration::new(MemoryConfigStore::new(), "/srv/app")
    }

    fn config_with(key: &str, value: impl Into<SettingValue>) -> Configuration<MemoryConfigStore> {
        Configuration::new(MemoryConfigStore::new().with_value(key, value), "/srv/app")
    }

    #[test]
    fn resolve_replaces_leading_placeholder() {
        let path = config()
            .resolve_certificate_filename("<APPLICATION>/files/cacert.pem")
            .unwrap();
        assert_eq!(path, PathBuf::from("/srv/app/files/cacert.pem"));
    }

    #[test]
    fn resolve_trims_input() {
        let path = config()
            .resolve_certificate_filename("  /etc/ssl/cacert.pem \n")
            .unwrap();
        assert_eq!(path, PathBuf::from("/etc/ssl/cacert.pem"));
    }

    #[test]
    fn resolve_ignores_placeholder_not_at_start() {
        let path = config()
            .resolve_certificate_filename("/data/<APPLICATION>/cacert.pem")
            .unwrap();
        assert_eq!(path, PathBuf::from("/data/<APPLICATION>/cacert.pem"));
    }

    #[test]
    fn resolve_empty_path_is_invalid() {
        let err = config().resolve_certificate_filename("   ").unwrap_err();
        assert!(matches!(err, CertError::InvalidParameter { ref name } if name == "path"));
    }

    #[test]
    fn defaults_when_store_is_empty() {
        let config = config();
        assert_eq!(config.certificate_path(), DEFAULT_PATH);
        assert_eq!(config.certificate_max_age(), SettingValue::Integer(DEFAULT_MAX_AGE));
        assert_eq!(config.allowed_protocol(), AllowedProtocol::Any);
        assert_eq!(config.active_certificate_file(), None);
    }

    #[test]
    fn set_path_skips_unchanged_value() {
        let mut config = config();
        config.set_certificate_path(DEFAULT_PATH).unwrap();
        assert_eq!(config.store().writes(), 0);

        config.set_certificate_path("/tmp/cacert.pem").unwrap();
        config.set_certificate_path("/tmp/cacert.pem").unwrap();
        assert_eq!(config.store().writes(), 1);
        assert_eq!(config.certificate_path(), "/tmp/cacert.pem");
    }

    #[test]
    fn set_max_age_skips_unchanged_value() {
        let mut config = config();
        config.set_certificate_max_age(DEFAULT_MAX_AGE).unwrap();
        assert_eq!(config.store().writes(), 0);

        config.set_certificate_max_age(3600).unwrap();
        assert_eq!(config.store().writes(), 1);
        assert_eq!(config.certificate_max_age(), SettingValue::Integer(3600));
    }

    #[test]
    fn set_max_age_rewrites_textual_value() {
        let mut config = config_with(keys::MAX_AGE, "3600");
        config.set_certificate_max_age(3600).unwrap();
        assert_eq!(config.store().writes(), 1);
        assert_eq!(config.certificate_max_age(), SettingValue::Integer(3600));
    }

    #[test]
    fn invalid_stored_protocol_reads_as_any() {
        let config = config_with(keys::REMOTE_PROTOCOL, "gopher");
        assert_eq!(config.allowed_protocol(), AllowedProtocol::Any);
    }

    #[test]
    fn set_protocol_round_trips() {
        let mut config = config();
        config.set_allowed_protocol(AllowedProtocol::Http).unwrap();
        assert_eq!(config.allowed_protocol(), AllowedProtocol::Http);

        config.set_allowed_protocol(AllowedProtocol::Http).unwrap();
        assert_eq!(config.store().writes(), 1);
    }

    #[test]
    fn uris_default_to_https_then_http() {
        let uris = config().remote_file_uris(None).unwrap();
        assert_eq!(uris, vec![DEFAULT_HTTPS_URI.to_string(), DEFAULT_HTTP_URI.to_string()]);
    }

    #[test]
    fn uris_follow_persisted_protocol() {
        let config = config_with(keys::REMOTE_PROTOCOL, "http");
        let uris = config.remote_file_uris(None).unwrap();
        assert_eq!(uris, vec![DEFAULT_HTTP_URI.to_string()]);
    }

    #[test]
    fn explicit_filter_overrides_persisted_protocol() {
        let config = config_with(keys::REMOTE_PROTOCOL, "http");
        let uris = config.remote_file_uris(Some("https")).unwrap();
        assert_eq!(uris, vec![DEFAULT_HTTPS_URI.to_string()]);

        let uris = config.remote_file_uris(Some("*")).unwrap();
        assert_eq!(uris.len(), 2);
    }

    #[test]
    fn blank_filter_uses_persisted_protocol() {
        let config = config_with(keys::REMOTE_PROTOCOL, "https");
        let uris = config.remote_file_uris(Some("")).unwrap();
        assert_eq!(uris, vec![DEFAULT_HTTPS_URI.to_string()]);
    }

    #[test]
    fn unknown_filter_is_invalid_parameter() {
        let err = config().remote_file_uris(Some("ftp")).unwrap_err();
        assert!(matches!(err, CertError::InvalidParameter { .. }));
    }

    #[test]
    fn disabled_source_yields_no_source_available() {
        let mut config = config();
        config.set_remote_file_uri(Protocol::Http, "").unwrap();
        assert_eq!(config.remote_file_uri(Protocol::Http), None);

        let err = config.remote_file_uris(Some("http")).unwrap_err();
        assert!(matches!(err, CertError::NoSourceAvailable { ref protocol } if protocol == "http"));

        let uris = config.remote_file_uris(Some("any")).unwrap();
        assert_eq!(uris, vec![DEFAULT_HTTPS_URI.to_string()]);
    }

    #[test]
    fn custom_source_uri() {
        let mut config = config();
        config
            .set_remote_file_uri(Protocol::Https, "https://mirror.example.com/cacert.pem")
            .unwrap();
        assert_eq!(
            config.remote_file_uris(None).unwrap()[0],
            "https://mirror.example.com/cacert.pem"
        );
    }

    #[test]
    fn active_file_pointer_dedups() {
        let mut config = config();
        let file = PathBuf::from("/srv/app/files/cacert.pem");

        config.set_active_certificate_file(&file).unwrap();
        config.set_active_certificate_file(&file).unwrap();

        assert_eq!(config.store().writes(), 1);
        assert_eq!(config.active_certificate_file(), Some(file));
    }
}
