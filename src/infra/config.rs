// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::evaluator::criteria::Criteria;
use crate::evaluator::fallback::FallbackConfig;
use crate::infra::paths;
use crate::provider::google::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Judging criteria, in display order.
    #[serde(default)]
    pub criteria: Criteria,

    #[serde(default)]
    pub fallback: FallbackConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".into(),
            api_key_env: "GEMINI_API_KEY".into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: 60,
            max_tokens: 2048,
            temperature: 0.2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file. Defaults to the data directory.
    pub db_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(paths::db_path)
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.criteria.validate().context("invalid [[criteria]]")?;
        self.fallback.validate().context("invalid [fallback]")?;
        if self.provider.timeout_seconds == 0 {
            anyhow::bail!("provider.timeout_seconds must be at least 1");
        }
        Ok(())
    }
}
