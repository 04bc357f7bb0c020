//! Credential storage for the Lunch Money API key.
//!
//! The key is a single opaque string written once and read once per run. The
//! user chooses which document root holds it: the cloud-synced one or the
//! device-local one. Lookup checks the synced root first.

use crate::{Config, Result};
use anyhow::{bail, Context};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

const API_KEY_FILE: &str = "api_key";

/// Which document root holds the API key.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Storage {
    #[default]
    Synced,
    Local,
}

serde_plain::derive_display_from_serialize!(Storage);
serde_plain::derive_fromstr_from_deserialize!(Storage);

/// Persists and retrieves the API credential from one of the two document
/// roots.
#[derive(Debug, Clone)]
pub struct KeyStore {
    synced: PathBuf,
    local: PathBuf,
}

impl KeyStore {
    pub fn new(config: &Config) -> Self {
        Self {
            synced: config.synced_root().join(API_KEY_FILE),
            local: config.local_root().join(API_KEY_FILE),
        }
    }

    fn path_for(&self, storage: Storage) -> &PathBuf {
        match storage {
            Storage::Synced => &self.synced,
            Storage::Local => &self.local,
        }
    }

    /// Finds an existing credential file, preferring the synced root.
    pub fn find(&self) -> Option<Storage> {
        if self.synced.is_file() {
            return Some(Storage::Synced);
        }
        if self.local.is_file() {
            return Some(Storage::Local);
        }
        None
    }

    /// Reads the stored credential. An unreadable file is treated the same as
    /// an absent one.
    pub async fn load(&self) -> Option<String> {
        let storage = self.find()?;
        match tokio::fs::read_to_string(self.path_for(storage)).await {
            Ok(contents) => {
                let key = contents.trim().to_string();
                if key.is_empty() {
                    None
                } else {
                    debug!("Loaded API key from {storage} storage");
                    Some(key)
                }
            }
            Err(e) => {
                tracing::warn!("Unable to read API key file: {e}");
                None
            }
        }
    }

    /// Writes the credential to the chosen storage backend, creating the
    /// backend directory when it is missing.
    pub async fn save(&self, storage: Storage, key: &str) -> Result<PathBuf> {
        let path = self.path_for(storage);
        if let Some(parent) = path.parent() {
            crate::utils::make_dir(parent).await?;
        }
        crate::utils::write(path, key).await?;

        // Set restrictive permissions on Unix-like systems
        #[cfg(unix)]
        {
            use std::fs::Permissions;
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, Permissions::from_mode(0o600))
                .context("Failed to set file permissions")?;
        }

        info!("API key saved to {}", path.display());
        Ok(path.clone())
    }

    /// Returns the stored credential, prompting for it interactively when
    /// absent. This runs before any network activity; a missing key is not a
    /// runtime error.
    pub async fn obtain(&self) -> Result<String> {
        if let Some(key) = self.load().await {
            return Ok(key);
        }
        self.prompt_and_save(None).await
    }

    /// Prompts the user for the API key (and, when `storage` is `None`, for
    /// the storage backend), then persists and returns it.
    pub async fn prompt_and_save(&self, storage: Option<Storage>) -> Result<String> {
        let key = prompt_key()?;
        let storage = match storage {
            Some(s) => s,
            None => prompt_storage()?,
        };
        self.save(storage, &key).await?;
        Ok(key)
    }
}

fn prompt_key() -> Result<String> {
    eprint!("Enter your Lunch Money API key (from https://my.lunchmoney.app/developers): ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Unable to read the API key from stdin")?;
    let key = line.trim().to_string();
    if key.is_empty() {
        bail!("No API key was entered");
    }
    Ok(key)
}

fn prompt_storage() -> Result<Storage> {
    eprint!("Where do you want to save this information? [1] synced  [2] local (default 1): ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Unable to read the storage choice from stdin")?;
    match line.trim() {
        "" | "1" => Ok(Storage::Synced),
        "2" => Ok(Storage::Local),
        other => bail!("Unrecognized storage choice '{other}'"),
    }
}
