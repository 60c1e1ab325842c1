//! Scenario runner configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigResult;

/// Configuration for the scenario runner and CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Scenario names to run (empty: all)
    pub scenarios: Vec<String>,

    /// Input fed to the parser scenarios
    pub parser_input: String,

    /// `tracing-subscriber` filter directive
    pub log_filter: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            scenarios: Vec::new(),
            parser_input: "42xyz".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl DemoConfig {
    /// Load a JSON configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write this configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Whether the scenario named `name` is selected
    pub fn selects(&self, name: &str) -> bool {
        self.scenarios.is_empty() || self.scenarios.iter().any(|s| s == name)
    }
}
