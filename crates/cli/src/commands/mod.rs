//! Subcommand implementations.

pub mod init;
pub mod inventory;
pub mod repl;
pub mod request;

use std::path::Path;
use std::sync::Arc;

use muster_agent::AssetManagerAgent;
use muster_config::{AppConfig, ConfigError};
use muster_core::EventBus;

/// Load configuration from an explicit path or the default location.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

/// Build an agent from config and seed its inventory.
pub fn build_agent(config: &AppConfig) -> AssetManagerAgent {
    let event_bus = Arc::new(EventBus::new(config.agent.event_capacity));
    let agent = AssetManagerAgent::new()
        .with_name(&config.agent.name)
        .with_event_bus(event_bus);

    let seeded = agent.seed_inventory(config.seed_assets());
    tracing::debug!(seeded, "Seed roster loaded");

    agent
}
