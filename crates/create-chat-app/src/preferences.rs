//! Prior-session preferences, stored as JSON under the platform config dir

use anyhow::{Context, Result};
use chat_scaffold_core::InstallConfig;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "create-chat-app";
const FILE_NAME: &str = "preferences.json";

/// Platform location of the preferences file, if one can be determined
pub fn preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
}

/// Load stored preferences; a missing or unreadable file yields an empty
/// record rather than an error
pub fn load() -> InstallConfig {
    match preferences_path() {
        Some(path) => load_from(&path),
        None => InstallConfig::default(),
    }
}

fn load_from(path: &Path) -> InstallConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => InstallConfig::default(),
    }
}

/// Persist preferences for the next run
pub fn save(preferences: &InstallConfig) -> Result<()> {
    let path = preferences_path().context("No config directory available")?;
    save_to(&path, preferences)
}

fn save_to(path: &Path, preferences: &InstallConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(preferences)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Drop the stored preferences (for --reset-preferences)
pub fn reset() -> Result<()> {
    if let Some(path) = preferences_path() {
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}
