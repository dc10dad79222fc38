use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::diagram::types::LayoutConfig;

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Maximum number of history entries to keep.
    pub history_limit: usize,
    /// Height in terminal rows for inline diagram images.
    pub diagram_height: u16,
    /// Pixel geometry of the drawn scene.
    pub diagram: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: 1000,
            diagram_height: 20,
            diagram: LayoutConfig::default(),
        }
    }
}

/// Path to the config file.
pub fn config_path() -> Option<PathBuf> {
    Some(super::config_dir()?.join("config.toml"))
}

/// Load config from disk, returning defaults if file doesn't exist or is invalid.
pub fn load_config() -> Config {
    let path = match config_path() {
        Some(p) => p,
        None => return Config::default(),
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => toml::from_str(&content).unwrap_or_default(),
        Err(_) => {
            // Create default config file on first run
            let config = Config::default();
            let _ = write_default_config(&path, &config);
            config
        }
    }
}

/// Write a default config file with comments.
fn write_default_config(path: &PathBuf, config: &Config) -> Result<(), String> {
    let content = format!(
        "# Pluvia configuration\n\
         \n\
         # Maximum number of history entries to keep\n\
         history_limit = {}\n\
         \n\
         # Height in terminal rows for inline diagram images\n\
         diagram_height = {}\n\
         \n\
         # Pixel geometry of the drawn scene\n\
         [diagram]\n\
         padding = {}\n\
         column_width = {}\n\
         unit_height = {}\n",
        config.history_limit,
        config.diagram_height,
        config.diagram.padding,
        config.diagram.column_width,
        config.diagram.unit_height,
    );
    std::fs::write(path, content.as_bytes()).map_err(|e| format!("write error: {}", e))
}
