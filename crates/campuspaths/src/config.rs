use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::DEFAULT_BASE_URL;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "campuspaths";

pub const DEFAULT_CAMPUS_MAP: &str = "campus_map.jpg";
pub const DEFAULT_START_MARKER: &str = "start.jpg";
pub const DEFAULT_DESTINATION_MARKER: &str = "destination_flag.jpg";

const VALID_KEYS: &str =
    "server.base_url, assets.campus_map, assets.start_marker, assets.destination_marker";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<AssetConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Image sources: file paths or `http(s)://` URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus_map: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_marker: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_marker: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `campuspaths config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, format!("# campuspaths configuration\n{yaml}"))?;
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn campus_map(&self) -> &str {
        self.assets
            .as_ref()
            .and_then(|a| a.campus_map.as_deref())
            .unwrap_or(DEFAULT_CAMPUS_MAP)
    }

    pub fn start_marker(&self) -> &str {
        self.assets
            .as_ref()
            .and_then(|a| a.start_marker.as_deref())
            .unwrap_or(DEFAULT_START_MARKER)
    }

    pub fn destination_marker(&self) -> &str {
        self.assets
            .as_ref()
            .and_then(|a| a.destination_marker.as_deref())
            .unwrap_or(DEFAULT_DESTINATION_MARKER)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            anyhow::bail!("Value for {key} must not be empty.");
        }
        match key {
            "server.base_url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    anyhow::bail!(
                        "Invalid base_url: {value}. Must start with 'http://' or 'https://'."
                    );
                }
                self.server.get_or_insert_with(ServerConfig::default).base_url =
                    Some(value.trim_end_matches('/').to_string());
            }
            "assets.campus_map" => {
                self.assets.get_or_insert_with(AssetConfig::default).campus_map =
                    Some(value.to_string());
            }
            "assets.start_marker" => {
                self.assets.get_or_insert_with(AssetConfig::default).start_marker =
                    Some(value.to_string());
            }
            "assets.destination_marker" => {
                self.assets
                    .get_or_insert_with(AssetConfig::default)
                    .destination_marker = Some(value.to_string());
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}
