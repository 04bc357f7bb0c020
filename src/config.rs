//! Configuration and data-directory handling.
//!
//! The data directory (`$LM_WIDGET_HOME`, default `~/.lm-widget`) holds a
//! `config.json` plus two document roots: `synced/` stands in for cloud-synced
//! storage (snapshot cache, optionally the API key) and `local/` for
//! device-local storage (alternate API key location).

use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const APP_NAME: &str = "lm-widget";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const SYNCED: &str = "synced";
const LOCAL: &str = "local";

const DEFAULT_BASE_URL: &str = "https://dev.lunchmoney.app";
/// Snapshots younger than this are served from cache without touching the API.
const DEFAULT_CACHE_TTL_MS: u64 = 7_200_000; // 2 hours

/// The name of the snapshot cache entry under the synced document root.
pub const SNAPSHOT_KEY: &str = "lunch_money_cache";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to the data directory; from there it
/// loads (or creates) `config.json` and resolves the document roots. Pay-cycle
/// settings come from the command line and are set after construction, once,
/// before any fetching starts.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    synced: PathBuf,
    local: PathBuf,
    config_path: PathBuf,
    base_url: Url,
    cache_ttl: Duration,
    pay_cycle_marker: Option<String>,
}

impl Config {
    /// Creates the data directory and document roots if they do not exist,
    /// writes a default `config.json` when absent, and loads the result.
    pub async fn init(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the lm-widget data directory")?;
        let root = tokio::fs::canonicalize(&maybe_relative)
            .await
            .with_context(|| {
                format!(
                    "Unable to canonicalize the path {}",
                    maybe_relative.to_string_lossy()
                )
            })?;

        let synced = root.join(SYNCED);
        utils::make_dir(&synced).await?;
        let local = root.join(LOCAL);
        utils::make_dir(&local).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path).await?
        } else {
            let defaults = ConfigFile::default();
            defaults.save(&config_path).await?;
            defaults
        };

        let base_url = Url::parse(&config_file.base_url).with_context(|| {
            format!("Invalid base_url in config file: '{}'", config_file.base_url)
        })?;

        Ok(Self {
            root,
            synced,
            local,
            config_path,
            base_url,
            cache_ttl: Duration::from_millis(config_file.cache_ttl_ms),
            pay_cycle_marker: None,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The cloud-synced document root. Holds the snapshot cache.
    pub fn synced_root(&self) -> &Path {
        &self.synced
    }

    /// The device-local document root.
    pub fn local_root(&self) -> &Path {
        &self.local
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Switches aggregation to pay-cycle mode with the given paycheck marker.
    pub fn set_pay_cycle(&mut self, marker: impl Into<String>) {
        self.pay_cycle_marker = Some(marker.into());
    }

    pub fn pay_cycle_mode(&self) -> bool {
        self.pay_cycle_marker.is_some()
    }

    pub fn pay_cycle_marker(&self) -> Option<&str> {
        self.pay_cycle_marker.as_deref()
    }
}

/// Represents the serialization and deserialization format of the
/// configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "lm-widget",
///   "config_version": 1,
///   "base_url": "https://dev.lunchmoney.app",
///   "cache_ttl_ms": 7200000
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "lm-widget"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the Lunch Money API
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Snapshot freshness threshold in milliseconds
    #[serde(default = "default_cache_ttl_ms")]
    cache_ttl_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_cache_ttl_ms() -> u64 {
    DEFAULT_CACHE_TTL_MS
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            base_url: default_base_url(),
            cache_ttl_ms: default_cache_ttl_ms(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
