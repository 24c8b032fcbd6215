//! Source protocols and the allowed-protocol filter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CertError;

use super::settings::keys;

/// Protocol of a candidate source URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Https,
    Http,
}

impl Protocol {
    /// Fixed preference order when several protocols are allowed.
    pub const PREFERENCE: [Protocol; 2] = [Protocol::Https, Protocol::Http];

    /// Lowercase name, as used in setting keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }

    /// Setting key holding this protocol's source URL.
    pub fn config_key(&self) -> String {
        format!("{}.{}", keys::REMOTE_FILE_URI, self.as_str())
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which candidate sources may be used for a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowedProtocol {
    Https,
    Http,
    #[default]
    Any,
}

impl AllowedProtocol {
    /// Check whether sources over `protocol` pass this filter.
    pub fn allows(&self, protocol: Protocol) -> bool {
        match self {
            Self::Any => true,
            Self::Https => protocol == Protocol::Https,
            Self::Http => protocol == Protocol::Http,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
            Self::Any => "any",
        }
    }
}

impl FromStr for AllowedProtocol {
    type Err = CertError;

    /// Parse a filter. `*` is accepted as a synonym for `any`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "https" => Ok(Self::Https),
            "http" => Ok(Self::Http),
            "any" | "*" => Ok(Self::Any),
            _ => Err(CertError::invalid_parameter("allowedProtocol")),
        }
    }
}

impl fmt::Display for AllowedProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_is_https_first() {
        assert_eq!(Protocol::PREFERENCE, [Protocol::Https, Protocol::Http]);
    }

    #[test]
    fn config_key_includes_protocol() {
        assert_eq!(Protocol::Https.config_key(), "options.remoteFileUri.https");
        assert_eq!(Protocol::Http.config_key(), "options.remoteFileUri.http");
    }

    #[test]
    fn parse_known_values() {
        assert_eq!("https".parse::<AllowedProtocol>().unwrap(), AllowedProtocol::Https);
        assert_eq!("HTTP".parse::<AllowedProtocol>().unwrap(), AllowedProtocol::Http);
        assert_eq!("any".parse::<AllowedProtocol>().unwrap(), AllowedProtocol::Any);
        assert_eq!("*".parse::<AllowedProtocol>().unwrap(), AllowedProtocol::Any);
    }

    #[test]
    fn parse_unknown_is_invalid_parameter() {
        let err = "ftp".parse::<AllowedProtocol>().unwrap_err();
        assert!(matches!(err, CertError::InvalidParameter { ref name } if name == "allowedProtocol"));
    }

    #[test]
    fn any_allows_both() {
        assert!(AllowedProtocol::Any.allows(Protocol::Https));
        assert!(AllowedProtocol::Any.allows(Protocol::Http));
    }

    #[test]
    fn single_protocol_filters() {
        assert!(AllowedProtocol::Https.allows(Protocol::Https));
        assert!(!AllowedProtocol::Https.allows(Protocol::Http));
        assert!(!AllowedProtocol::Http.allows(Protocol::Https));
    }

    #[test]
    fn default_is_any() {
        assert_eq!(AllowedProtocol::default(), AllowedProtocol::Any);
    }
}
