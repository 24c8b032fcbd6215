//! Caller overrides for a single update.

use crate::config::SettingValue;

/// Overrides for one [`Updater::update`](super::Updater::update) call.
///
/// Unset fields fall back to the persisted settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Bundle path, may start with `<APPLICATION>`.
    pub path: Option<String>,
    /// Maximum age in seconds; numeric text is accepted.
    pub max_age: Option<SettingValue>,
    /// `https`, `http`, `any` (or `*`).
    pub allowed_protocol: Option<String>,
    /// Write the effective path, max age and protocol back to the settings.
    pub persist_options: bool,
}

impl UpdateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_max_age(mut self, max_age: impl Into<SettingValue>) -> Self {
        self.max_age = Some(max_age.into());
        self
    }

    pub fn with_allowed_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.allowed_protocol = Some(protocol.into());
        self
    }

    pub fn persist(mut self) -> Self {
        self.persist_options = true;
        self
    }
}

/// Coerce a max-age setting to whole seconds.
///
/// Integers pass through, numeric text is parsed (fractions truncate) and
/// anything else becomes 0, which callers reject.
pub fn coerce_max_age(value: &SettingValue) -> i64 {
    match value {
        SettingValue::Integer(n) => *n,
        SettingValue::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f as i64)
                })
                .unwrap_or(0)
        }
    }
}
