use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_DIRECTORY_URL: &str =
    "https://swisspost.opendatasoft.com/api/records/1.0/search/";
pub const DEFAULT_WEATHER_URL: &str = "https://app-prod-ws.meteoswiss-app.ch/v1/plzDetail";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_ROWS: u32 = 20;

/// Timestamp MeteoSwiss sends instead of a real reading for codes without a station.
///
/// Observed value only; the provider may change it, so it stays overridable.
pub const DEFAULT_SENTINEL_TIME_MS: i64 = 1_684_587_000_000;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// timeout_secs = 5
/// sentinel_time_ms = 1684587000000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Swiss Post postal-code directory endpoint.
    pub directory_url: String,

    /// MeteoSwiss per-postal-code detail endpoint.
    pub weather_url: String,

    /// Per-request timeout, applied to every outbound call.
    pub timeout_secs: u64,

    /// Maximum number of directory records per lookup.
    pub rows: u32,

    /// "No data" marker in `currentWeather.time`.
    pub sentinel_time_ms: i64,

    /// Treat readings stamped with `sentinel_time_ms` as missing.
    pub skip_sentinel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            rows: DEFAULT_ROWS,
            sentinel_time_ms: DEFAULT_SENTINEL_TIME_MS,
            skip_sentinel: true,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The sentinel to filter on, if filtering is enabled.
    pub fn sentinel(&self) -> Option<i64> {
        self.skip_sentinel.then_some(self.sentinel_time_ms)
    }

    /// Reject values that would make every request fail in a confusing way.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if self.rows == 0 {
            bail!("rows must be greater than zero");
        }
        let urls = [("directory_url", &self.directory_url), ("weather_url", &self.weather_url)];
        for (key, url) in urls {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("{key} must be an http(s) URL, got '{url}'");
            }
        }
        Ok(())
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("ch", "meteo", "meteo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
