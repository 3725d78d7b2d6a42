use crate::utils::env::is_development;
use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Resolve the application config directory.
///
/// Development and production use different directories so data never mixes.
pub fn get_config_dir() -> Result<PathBuf> {
    let base_dir =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;

    let config_dir = if is_development() {
        base_dir.join("clipkeeper-dev")
    } else {
        base_dir.join("clipkeeper")
    };

    Ok(config_dir)
}

/// Resolve the settings file path.
///
/// The CLIPKEEPER_SETTING_PATH environment variable takes precedence over
/// the system config directory.
pub fn get_setting_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("CLIPKEEPER_SETTING_PATH") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("settings.json"))
}

/// Resolve the SQLite database path.
///
/// The CLIPKEEPER_DB_PATH environment variable takes precedence over the
/// system config directory.
pub fn get_db_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("CLIPKEEPER_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("clipboard.db"))
}
