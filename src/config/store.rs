//! Configuration store backends.
//!
//! The accessor reads and writes named scalars through [`ConfigStore`].
//! [`FileConfigStore`] keeps them in a flat YAML map on disk and
//! [`MemoryConfigStore`] keeps them in process.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CertError, Result};

use super::settings::SettingValue;

/// Get/set access to named scalar settings.
pub trait ConfigStore {
    /// Read a setting, `None` if it was never stored.
    fn get(&self, key: &str) -> Option<SettingValue>;

    /// Store a setting.
    fn set(&mut self, key: &str, value: SettingValue) -> Result<()>;
}

/// Settings persisted as a flat YAML map.
///
/// ```yaml
/// options.path: <APPLICATION>/files/cacert.pem
/// options.maxAge: 1296000
/// ```
#[derive(Debug)]
pub struct FileConfigStore {
    path: PathBuf,
    values: BTreeMap<String, SettingValue>,
}

impl FileConfigStore {
    /// Open a settings file. A missing or empty file yields no settings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path)?;
        let values = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_yaml::from_str(&content).map_err(|e| CertError::ConfigParseError {
                path: path.clone(),
                message: e.to_string(),
            })?
        };

        Ok(Self { path, values })
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save settings to disk using write-to-temp-then-rename.
    fn save(&self) -> Result<()> {
        let write_error = |message: String| CertError::ConfigWriteError {
            path: self.path.clone(),
            message,
        };

        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| write_error(e.to_string()))?;
        }

        let content =
            serde_yaml::to_string(&self.values).map_err(|e| write_error(e.to_string()))?;

        let temp_path = self.path.with_extension("yml.tmp");
        fs::write(&temp_path, &content).map_err(|e| write_error(e.to_string()))?;
        fs::rename(&temp_path, &self.path).map_err(|e| write_error(e.to_string()))?;

        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

/// In-process settings, counting every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    values: BTreeMap<String, SettingValue>,
    writes: usize,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write.
    pub fn with_value(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileConfigStore::open(temp.path().join("settings.yml")).unwrap();

        assert!(store.get("options.path").is_none());
        assert!(store.get("options.maxAge").is_none());
    }

    #[test]
    fn open_empty_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yml");
        fs::write(&path, "\n").unwrap();

        let store = FileConfigStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        assert!(store.get("options.path").is_none());
    }

    #[test]
    fn set_persists_and_reopens() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("settings.yml");

        let mut store = FileConfigStore::open(&path).unwrap();
        store.set("options.maxAge", SettingValue::from(3600i64)).unwrap();
        store
            .set("options.path", SettingValue::from("/tmp/cacert.pem"))
            .unwrap();

        let reopened = FileConfigStore::open(&path).unwrap();
        assert_eq!(reopened.get("options.maxAge"), Some(SettingValue::Integer(3600)));
        assert_eq!(
            reopened.get("options.path"),
            Some(SettingValue::Text("/tmp/cacert.pem".into()))
        );
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yml");

        let mut store = FileConfigStore::open(&path).unwrap();
        store.set("options.remoteProtocol", "https".into()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("yml.tmp").exists());
    }

    #[test]
    fn open_reads_hand_written_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yml");
        fs::write(
            &path,
            "options.maxAge: \"7200\"\noptions.remoteProtocol: http\n",
        )
        .unwrap();

        let store = FileConfigStore::open(&path).unwrap();
        assert_eq!(store.get("options.maxAge"), Some(SettingValue::Text("7200".into())));
        assert_eq!(
            store.get("options.remoteProtocol"),
            Some(SettingValue::Text("http".into()))
        );
    }

    #[test]
    fn open_invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yml");
        fs::write(&path, "- just\n- a list\n").unwrap();

        let err = FileConfigStore::open(&path).unwrap_err();
        assert!(matches!(err, CertError::ConfigParseError { .. }));
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryConfigStore::new().with_value("options.maxAge", 10i64);
        assert_eq!(store.writes(), 0);

        store.set("options.maxAge", 20i64.into()).unwrap();
        assert_eq!(store.writes(), 1);
        assert_eq!(store.get("options.maxAge"), Some(SettingValue::Integer(20)));
    }
}
