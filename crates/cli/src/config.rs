//! User configuration and on-disk locations.
//!
//! Settings live in `<config_dir>/flickpick/config.json`, the database in
//! `<data_dir>/flickpick/flickpick.db`. Both base directories come from the
//! platform conventions (`dirs`) unless overridden on the command line.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "flickpick";
const CONFIG_FILE: &str = "config.json";
const DATABASE_FILE: &str = "flickpick.db";

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ollama_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ollama_model: Option<String>,

    /// Keys this version doesn't know about, kept on save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    /// The API key to use: a non-blank `env_key` wins over the stored one.
    pub fn api_key(&self, env_key: Option<String>) -> Option<String> {
        let non_blank = |key: String| {
            let key = key.trim().to_string();
            (!key.is_empty()).then_some(key)
        };
        env_key
            .and_then(non_blank)
            .or_else(|| self.tmdb_api_key.clone().and_then(non_blank))
    }

    pub fn ollama_url(&self) -> &str {
        self.ollama_url.as_deref().unwrap_or(llm::DEFAULT_OLLAMA_URL)
    }

    pub fn ollama_model(&self) -> &str {
        self.ollama_model.as_deref().unwrap_or(llm::DEFAULT_MODEL)
    }

    /// Overlay the values set in `updates`; unset values keep their current value.
    fn merge(&mut self, updates: &Config) {
        if updates.tmdb_api_key.is_some() {
            self.tmdb_api_key = updates.tmdb_api_key.clone();
        }
        if updates.ollama_url.is_some() {
            self.ollama_url = updates.ollama_url.clone();
        }
        if updates.ollama_model.is_some() {
            self.ollama_model = updates.ollama_model.clone();
        }
        self.extra
            .extend(updates.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

/// Resolved config and data directories.
#[derive(Debug, Clone, PartialEq)]
pub struct Paths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Paths {
    /// Platform directories, each replaced by its override when given.
    ///
    /// Overrides are used as-is; platform directories get a `flickpick`
    /// subdirectory.
    pub fn resolve(config_dir: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine the user config directory"))?
                .join(APP_DIR),
        };
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .ok_or_else(|| anyhow!("Could not determine the user data directory"))?
                .join(APP_DIR),
        };
        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn database(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    /// Read the config file; a missing file is an empty config.
    pub fn load_config(&self) -> Result<Config> {
        load_config(&self.config_file())
    }

    /// Merge `updates` into the stored config and write it back.
    pub fn save_config(&self, updates: &Config) -> Result<Config> {
        save_config(&self.config_file(), updates)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Config file {} is not valid JSON", path.display()))
}

pub fn save_config(path: &Path, updates: &Config) -> Result<Config> {
    let mut config = load_config(path)?;
    config.merge(updates);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(&config)?;
    fs::write(path, text)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(config)
}
