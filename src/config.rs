//! TOML configuration for a panel and its hub.
//!
//! ```toml
//! [panel]
//! forward_slider_changes = true
//! toggle_authority = "server-authoritative"
//! programmatic_notify = "silent"
//!
//! [hub]
//! broadcast_capacity = 32
//!
//! [hub.sliders]
//! vol = 50
//! bright = 80
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::hub::HubConfig;
use crate::panel::PanelConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub panel: PanelConfig,
    pub hub: HubConfig,
}

/// Parse a configuration document.
pub fn load_str(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read and parse a configuration file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_str(&content)
}
