pub mod config;
pub mod history;

use std::path::PathBuf;

/// Get or create the Pluvia data directory (~/.local/share/pluvia/).
pub fn data_dir() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("pluvia");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Get or create the Pluvia config directory (~/.config/pluvia/).
pub fn config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("pluvia");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
