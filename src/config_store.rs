use crate::layout::LayoutConfig;
use crate::settings::Settings;
use anyhow::{anyhow, bail, Context, Result};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "KeyboardOverlay";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
const CONFIGS_DIR_NAME: &str = "configs";
const CONFIG_EXT: &str = "json";

/// Settings and saved layouts under one root directory:
/// `<root>/settings.json` and `<root>/configs/<name>.json`.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

/// Per-user configuration directory, falling back to the working directory.
pub fn default_root() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
}

impl ConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn open_default() -> Self {
        Self::new(default_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    pub fn configs_dir(&self) -> PathBuf {
        self.root.join(CONFIGS_DIR_NAME)
    }

    pub fn config_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.configs_dir().join(format!("{name}.{CONFIG_EXT}")))
    }

    /// Load settings, merging missing fields over defaults. A missing or
    /// unreadable file yields defaults; the failure is logged.
    pub fn load_settings(&self) -> Settings {
        match self.try_load_settings() {
            Ok(Some(settings)) => {
                tracing::info!(path = %self.settings_path().display(), "settings loaded");
                settings
            }
            Ok(None) => Settings::default(),
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), "failed to load settings, using defaults");
                Settings::default()
            }
        }
    }

    pub fn try_load_settings(&self) -> Result<Option<Settings>> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Some(Settings::default()));
        }
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("deserialize settings file {}", path.display()))?;
        Ok(Some(settings))
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let path = self.settings_path();
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("create config folder {}", self.root.display()))?;
        let json = serde_json::to_string_pretty(settings).context("serialize settings")?;
        std::fs::write(&path, json)
            .with_context(|| format!("write settings file {}", path.display()))?;
        tracing::info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Names of saved configs, sorted.
    pub fn list_configs(&self) -> Result<Vec<String>> {
        let dir = self.configs_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("read configs folder {}", dir.display()))?
        {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(CONFIG_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        tracing::debug!(count = names.len(), "listed configs");
        Ok(names)
    }

    pub fn load_config(&self, name: &str) -> Result<Option<LayoutConfig>> {
        let path = self.config_path(name)?;
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config not found");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config: LayoutConfig = serde_json::from_str(&content)
            .with_context(|| format!("deserialize config file {}", path.display()))?;
        tracing::info!(name, keys = config.keys.len(), "config loaded");
        Ok(Some(config))
    }

    pub fn save_config(&self, name: &str, config: &LayoutConfig) -> Result<PathBuf> {
        let path = self.config_path(name)?;
        let dir = self.configs_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create configs folder {}", dir.display()))?;
        let json = serde_json::to_string_pretty(config)
            .with_context(|| format!("serialize config {name}"))?;
        std::fs::write(&path, json)
            .with_context(|| format!("write config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(path)
    }

    pub fn delete_config(&self, name: &str) -> Result<()> {
        let path = self.config_path(name)?;
        std::fs::remove_file(&path)
            .with_context(|| format!("delete config file {}", path.display()))?;
        tracing::info!(name, "config deleted");
        Ok(())
    }

    /// Rename a config file. Fails if `new` already exists.
    pub fn rename_config(&self, old: &str, new: &str) -> Result<()> {
        let src = self.config_path(old)?;
        let dst = self.config_path(new)?;
        if dst.exists() {
            bail!("cannot rename '{old}' to '{new}': destination exists");
        }
        std::fs::rename(&src, &dst)
            .with_context(|| format!("rename {} to {}", src.display(), dst.display()))?;
        tracing::info!(old, new, "config renamed");
        Ok(())
    }

    pub fn duplicate_config(&self, name: &str, new_name: &str) -> Result<()> {
        let src = self.config_path(name)?;
        let dst = self.config_path(new_name)?;
        if !src.exists() {
            bail!("cannot duplicate '{name}': not found");
        }
        std::fs::copy(&src, &dst)
            .with_context(|| format!("copy {} to {}", src.display(), dst.display()))?;
        tracing::info!(name, new_name, "config duplicated");
        Ok(())
    }

    pub fn export_config(&self, name: &str, dest: &Path) -> Result<()> {
        let src = self.config_path(name)?;
        std::fs::copy(&src, dest)
            .with_context(|| format!("export {} to {}", src.display(), dest.display()))?;
        tracing::info!(name, dest = %dest.display(), "config exported");
        Ok(())
    }

    /// Copy an external JSON file into the configs folder and return the
    /// name it is stored under.
    pub fn import_config(&self, src: &Path) -> Result<String> {
        if !src.exists() {
            bail!("import source not found: {}", src.display());
        }
        let name = src
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow!("import source has no usable name: {}", src.display()))?
            .to_string();
        let dst = self.config_path(&name)?;
        let dir = self.configs_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create configs folder {}", dir.display()))?;
        std::fs::copy(src, &dst)
            .with_context(|| format!("import {} to {}", src.display(), dst.display()))?;
        tracing::info!(path = %dst.display(), "config imported");
        Ok(name)
    }
}

/// Deep copy of a preset in saveable form.
pub fn preset_to_config(preset: &LayoutConfig) -> LayoutConfig {
    preset.clone()
}

fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        bail!("config name is empty");
    }
    if trimmed != name
        || name.contains(['/', '\\'])
        || name == "."
        || name == ".."
    {
        bail!("invalid config name '{name}'");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_with_separators_are_rejected() {
        assert!(validate_name("mine").is_ok());
        assert!(validate_name("Full Keyboard (QWERTY)").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("../escape").is_err());
        assert!(validate_name(" padded ").is_err());
    }

    #[test]
    fn settings_missing_file_means_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = ConfigStore::new(dir.path());
        assert!(store.try_load_settings().expect("load").is_none());
        assert_eq!(store.load_settings(), Settings::default());
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = ConfigStore::new(dir.path());
        std::fs::write(store.settings_path(), "{ not json").expect("write");
        assert!(store.try_load_settings().is_err());
        assert_eq!(store.load_settings(), Settings::default());
    }
}
