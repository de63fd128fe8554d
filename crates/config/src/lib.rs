//! Configuration loading, validation, and management for Muster.
//!
//! Loads configuration from `~/.muster/config.toml` (path overridable via
//! the `MUSTER_CONFIG` environment variable) and validates the seed
//! inventory at startup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use muster_core::NewAsset;

/// The root configuration structure.
///
/// Maps directly to `~/.muster/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Agent settings
    #[serde(default)]
    pub agent: AgentSettings,

    /// Seed inventory loaded into the ledger at startup
    #[serde(default = "default_inventory")]
    pub inventory: Vec<SeedAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Agent name reported in logs and the CLI header
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Event bus capacity (broadcast channel size)
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_agent_name() -> String {
    "asset_manager".into()
}
fn default_event_capacity() -> usize {
    256
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            event_capacity: default_event_capacity(),
        }
    }
}

/// One seed inventory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAsset {
    pub name: String,

    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default = "default_quantity")]
    pub quantity: u32,

    #[serde(default)]
    pub location_name: String,

    /// (latitude, longitude) in decimal degrees
    #[serde(default)]
    pub location_gps: (f64, f64),
}

fn default_quantity() -> u32 {
    1
}

impl From<SeedAsset> for NewAsset {
    fn from(seed: SeedAsset) -> Self {
        let mut new_asset = NewAsset::new(seed.name, seed.types)
            .with_quantity(seed.quantity)
            .with_location(seed.location_name, seed.location_gps);
        if let Some(id) = seed.id {
            new_asset = new_asset.with_id(id);
        }
        new_asset
    }
}

/// The stock SAR Base roster: one drone, one helicopter, one boat, and a
/// stack of medical kits.
fn default_inventory() -> Vec<SeedAsset> {
    let base = |name: &str, id: &str, types: &[&str], quantity: u32| SeedAsset {
        name: name.into(),
        types: types.iter().map(|t| t.to_string()).collect(),
        id: Some(id.into()),
        quantity,
        location_name: "SAR Base".into(),
        location_gps: (39.32, -120.21),
    };
    vec![
        base("Drone", "A001", &["Aerial", "Recon", "Vehicle"], 5),
        base("Helicopter", "A002", &["Aerial", "Vehicle"], 1),
        base("Rescue Boat", "W001", &["Water", "Vehicle"], 1),
        base("Medical Kit", "M010", &["First Aid", "Medical"], 10),
    ]
}

impl AppConfig {
    /// Load configuration from the default path (~/.muster/config.toml).
    ///
    /// `MUSTER_CONFIG` overrides the file path; `MUSTER_AGENT_NAME`
    /// overrides the agent name (highest priority).
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = match std::env::var("MUSTER_CONFIG") {
            Ok(path) => PathBuf::from(path),
            Err(_) => Self::config_dir().join("config.toml"),
        };
        let mut config = Self::load_from(&config_path)?;

        if let Ok(name) = std::env::var("MUSTER_AGENT_NAME") {
            config.agent.name = name;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".muster")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "agent.name must not be empty".into(),
            ));
        }

        if self.agent.event_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "agent.event_capacity must be greater than 0".into(),
            ));
        }

        let mut names = BTreeSet::new();
        for seed in &self.inventory {
            if seed.name.is_empty() {
                return Err(ConfigError::ValidationError(
                    "inventory entries require a name".into(),
                ));
            }
            if seed.types.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "inventory entry '{}' requires at least one type",
                    seed.name
                )));
            }
            if !names.insert(seed.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate inventory name '{}'",
                    seed.name
                )));
            }
        }

        Ok(())
    }

    /// The seed roster as ledger add parameters.
    pub fn seed_assets(&self) -> Vec<NewAsset> {
        self.inventory.iter().cloned().map(NewAsset::from).collect()
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agent: AgentSettings::default(),
            inventory: default_inventory(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
