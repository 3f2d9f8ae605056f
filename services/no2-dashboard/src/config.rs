//! Dashboard configuration.
//!
//! Paths and frame rate come from the command line (or their `NO2_*`
//! environment variables). Rendering style comes from an optional YAML
//! file:
//!
//! ```yaml
//! render:
//!   target_width: 640
//!   ticks: 6
//!   no_data_color: "#ffffff00"
//!   gif_speed: 5
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use renderer::RenderConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub render: RenderConfig,
}

impl DashboardConfig {
    /// Parse and validate YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_yaml::from_str(text).context("Invalid dashboard configuration")?;
        config
            .render
            .palette()
            .context("Invalid rendering configuration")?;
        Ok(config)
    }

    /// Load from `path`, or use defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text).with_context(|| format!("In config file {}", path.display()))?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}
