//! Durable user preferences.
//!
//! The browser build keeps values in `localStorage`; native builds write a
//! small JSON map to `preferences.json` in the platform config directory.
//! Failures are logged and otherwise ignored: a preference that cannot be
//! stored simply falls back to its default on the next launch.

/// UI language code (`en` / `vi`).
pub const LANGUAGE_KEY: &str = "language";
/// Appearance (`light` / `dark`).
pub const THEME_KEY: &str = "theme";

pub fn load_preference(key: &str) -> Option<String> {
    match backend::load(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Couldn't read preference `{key}`: {err}");
            None
        }
    }
}

pub fn save_preference(key: &str, value: &str) {
    if let Err(err) = backend::save(key, value) {
        log::warn!("Couldn't store preference `{key}`: {err}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::PreferenceFile;

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::native::PreferenceFile;

    pub(super) fn load(key: &str) -> anyhow::Result<Option<String>> {
        match PreferenceFile::default_location() {
            Some(file) => file.get(key),
            None => Ok(None),
        }
    }

    pub(super) fn save(key: &str, value: &str) -> anyhow::Result<()> {
        let file = PreferenceFile::default_location()
            .ok_or_else(|| anyhow::anyhow!("no configuration directory on this platform"))?;
        file.set(key, value)
    }
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use anyhow::anyhow;

    fn local_storage() -> anyhow::Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| anyhow!("window unavailable"))?
            .local_storage()
            .map_err(|_| anyhow!("localStorage access denied"))?
            .ok_or_else(|| anyhow!("localStorage unavailable"))
    }

    pub(super) fn load(key: &str) -> anyhow::Result<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|_| anyhow!("localStorage read failed"))
    }

    pub(super) fn save(key: &str, value: &str) -> anyhow::Result<()> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| anyhow!("localStorage write failed"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
    };

    use anyhow::Context;

    /// JSON object of string preferences on disk.
    #[derive(Debug, Clone)]
    pub struct PreferenceFile {
        path: PathBuf,
    }

    impl PreferenceFile {
        pub fn at(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn default_location() -> Option<Self> {
            directories::ProjectDirs::from("org", "Leafscan", "Leafscan")
                .map(|dirs| Self::at(dirs.config_dir().join("preferences.json")))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        /// A missing file reads as an empty map.
        pub fn load(&self) -> anyhow::Result<BTreeMap<String, String>> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let raw = fs::read_to_string(&self.path)
                .with_context(|| format!("reading {}", self.path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", self.path.display()))
        }

        pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            Ok(self.load()?.remove(key))
        }

        pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            // A corrupt file is replaced rather than blocking every later write.
            let mut values = self.load().unwrap_or_default();
            values.insert(key.to_string(), value.to_string());

            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let raw = serde_json::to_string_pretty(&values)?;
            fs::write(&self.path, raw)
                .with_context(|| format!("writing {}", self.path.display()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn missing_file_is_empty() {
            let dir = tempfile::tempdir().unwrap();
            let file = PreferenceFile::at(dir.path().join("nested/preferences.json"));
            assert!(file.load().unwrap().is_empty());
            assert_eq!(file.get("language").unwrap(), None);
        }

        #[test]
        fn values_persist_across_handles() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested/preferences.json");
            PreferenceFile::at(&path).set("language", "vi").unwrap();
            PreferenceFile::at(&path).set("theme", "dark").unwrap();

            let reopened = PreferenceFile::at(&path);
            assert_eq!(reopened.get("language").unwrap().as_deref(), Some("vi"));
            assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        }

        #[test]
        fn corrupt_file_is_reported_then_replaced() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("preferences.json");
            fs::write(&path, "not json").unwrap();

            let file = PreferenceFile::at(&path);
            assert!(file.get("language").is_err());
            file.set("language", "en").unwrap();
            assert_eq!(file.get("language").unwrap().as_deref(), Some("en"));
        }
    }
}
