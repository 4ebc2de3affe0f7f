use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Primary provider: threat-list lookup endpoint and auth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryConfig {
    /// Full `threatMatches:find` URL.
    pub endpoint: String,
    /// API key, sent as a query parameter.
    pub api_key: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://safebrowsing.googleapis.com/v4/threatMatches:find".to_string(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Secondary provider: deep-scan API base and auth. Optional section; when
/// absent (or the key is empty) only the primary check runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryConfig {
    /// API base URL; submit/result paths are derived from it.
    pub endpoint: String,
    /// API key, sent as an `API-Key` header.
    pub api_key: String,
    /// Wait between submitting a scan and fetching its result, in seconds.
    /// Long enough for the provider's asynchronous scan to finish.
    #[serde(default = "default_settle_delay_secs")]
    pub settle_delay_secs: u64,
    /// Total request timeout in seconds (per request, not per scan).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://urlscan.io/api/v1".to_string(),
            api_key: String::new(),
            settle_delay_secs: default_settle_delay_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Global configuration loaded from `~/.config/lrc/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LrcConfig {
    /// How long a cached verdict stays fresh, in seconds.
    pub cache_ttl_secs: u64,
    /// Period of the background cache sweep, in seconds. Keep this well
    /// below the TTL so the staleness bound holds within one interval.
    pub sweep_interval_secs: u64,
    pub primary: PrimaryConfig,
    #[serde(default)]
    pub secondary: Option<SecondaryConfig>,
}

impl Default for LrcConfig {
    fn default() -> Self {
        Self {
            // 24 hours fresh, swept hourly.
            cache_ttl_secs: 86_400,
            sweep_interval_secs: 3_600,
            primary: PrimaryConfig::default(),
            secondary: Some(SecondaryConfig::default()),
        }
    }
}

impl LrcConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Secondary section, if present with a usable API key.
    pub fn configured_secondary(&self) -> Option<&SecondaryConfig> {
        self.secondary
            .as_ref()
            .filter(|s| !s.api_key.is_empty() && !s.endpoint.is_empty())
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_settle_delay_secs() -> u64 {
    15
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("lrc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LrcConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LrcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: LrcConfig = toml::from_str(&data)?;
    Ok(cfg)
}
