//! This module handles the persisted locale preference, loading and saving
//! the last chosen language to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use locale_lens::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Record a language choice
//! config.language = Some("ar".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use crate::i18n::detect::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "LocaleLens";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// [`PreferenceStore`] backed by the `settings.toml` file.
///
/// By default the file lives under the platform config directory; tests and
/// sandboxed hosts can pin it to an explicit path instead.
#[derive(Debug, Default)]
pub struct ConfigPreferenceStore {
    path: Option<PathBuf>,
}

impl ConfigPreferenceStore {
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Store reading and writing a specific file instead of the platform
    /// config directory.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    fn read(&self) -> Result<Config> {
        match &self.path {
            Some(path) if path.exists() => load_from_path(path),
            Some(_) => Ok(Config::default()),
            None => load(),
        }
    }

    fn write(&self, config: &Config) -> Result<()> {
        match &self.path {
            Some(path) => save_to_path(config, path),
            None => save(config),
        }
    }
}

impl PreferenceStore for ConfigPreferenceStore {
    fn load_language(&self) -> Option<String> {
        self.read().ok().and_then(|config| config.language)
    }

    fn store_language(&mut self, tag: &str) -> Result<()> {
        let mut config = self.read().unwrap_or_default();
        config.language = Some(tag.to_string());
        self.write(&config)
    }
}
