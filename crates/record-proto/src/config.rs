use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::platform;
use super::protocol::StreamQuality;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Where and how the station catalog is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default)]
    pub quality: StreamQuality,
    /// Volume change per +/- key press, in percent.
    #[serde(default = "default_volume_step")]
    pub volume_step: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_now_playing_interval")]
    pub now_playing_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_preferences_file")]
    pub preferences_file: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            quality: StreamQuality::default(),
            volume_step: default_volume_step(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            now_playing_interval_secs: default_now_playing_interval(),
        }
    }
}

impl PollingConfig {
    pub fn now_playing_interval(&self) -> Duration {
        Duration::from_secs(self.now_playing_interval_secs.max(1))
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            preferences_file: default_preferences_file(),
            log_file: default_log_file(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.radiorecord.ru/api".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_volume_step() -> u8 {
    5
}

fn default_now_playing_interval() -> u64 {
    5
}

fn default_preferences_file() -> PathBuf {
    platform::config_dir().join("preferences.json")
}

fn default_log_file() -> PathBuf {
    platform::data_dir().join("record-radio.log")
}

impl Config {
    /// Load from the default location, writing a default file on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
