use super::utils::get_setting_path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Allowed range for the clipboard poll interval (ms).
pub const CHECK_INTERVAL_RANGE: (u64, u64) = (1_000, 60_000);
/// Allowed range for the debounce floor between accepted checks (ms).
pub const MIN_CHECK_DELAY_RANGE: (u64, u64) = (100, 5_000);
/// Allowed range for the retention ceiling.
pub const MAX_ENTRIES_RANGE: (u32, u32) = (100, 10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
    #[serde(rename = "system")]
    System,
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Light
}

fn default_check_interval() -> u64 {
    2_000
}

fn default_min_check_delay() -> u64 {
    500
}

fn default_max_entries() -> u32 {
    1_000
}

/// Process-wide configuration, persisted as a small JSON file.
///
/// Unknown keys in the file are ignored and missing keys fall back to the
/// defaults, so older settings files keep loading after upgrades.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,
    /// Poll interval for the clipboard monitor (ms)
    #[serde(default = "default_check_interval")]
    pub clipboard_check_interval: u64,
    /// Minimum elapsed time between two accepted checks (ms)
    #[serde(default = "default_min_check_delay")]
    pub min_check_delay: u64,
    /// Retention ceiling; oldest non-favorite entries are evicted above it
    #[serde(default = "default_max_entries")]
    pub max_entries: u32,
}

impl Default for Setting {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
            clipboard_check_interval: default_check_interval(),
            min_check_delay: default_min_check_delay(),
            max_entries: default_max_entries(),
        }
    }
}

/// Partial settings update; `None` fields keep their previous value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingPatch {
    pub theme_mode: Option<ThemeMode>,
    pub clipboard_check_interval: Option<u64>,
    pub min_check_delay: Option<u64>,
    pub max_entries: Option<u32>,
}

impl Setting {
    /// Load settings from disk.
    ///
    /// Reads the given path, or the default settings path when `None`.
    /// A missing file produces (and persists) the defaults; out-of-range
    /// values are clamped into their allowed range.
    pub fn load(setting_path: Option<PathBuf>) -> Result<Self> {
        let path = if let Some(path) = setting_path {
            path
        } else {
            get_setting_path()?
        };

        if let Ok(setting_str) = fs::read_to_string(&path) {
            let mut setting: Setting =
                serde_json::from_str(&setting_str).with_context(|| "Failed to parse settings file")?;
            setting.clamp_ranges();
            Ok(setting)
        } else {
            let default_setting = Setting::default();
            default_setting.save(Some(path))?;
            Ok(default_setting)
        }
    }

    /// Save settings to disk.
    ///
    /// Writes to the given path, or the default settings path when `None`.
    pub fn save(&self, setting_path: Option<PathBuf>) -> Result<()> {
        let path = if let Some(path) = setting_path {
            path
        } else {
            get_setting_path()?
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let setting_str = serde_json::to_string_pretty(self)?;
        fs::write(&path, setting_str)
            .with_context(|| format!("Failed to write settings file: {:?}", path))?;

        Ok(())
    }

    /// Apply a partial update, clamping numeric values into range.
    pub fn apply(&mut self, patch: SettingPatch) {
        if let Some(theme_mode) = patch.theme_mode {
            self.theme_mode = theme_mode;
        }
        if let Some(interval) = patch.clipboard_check_interval {
            self.clipboard_check_interval =
                interval.clamp(CHECK_INTERVAL_RANGE.0, CHECK_INTERVAL_RANGE.1);
        }
        if let Some(delay) = patch.min_check_delay {
            self.min_check_delay = delay.clamp(MIN_CHECK_DELAY_RANGE.0, MIN_CHECK_DELAY_RANGE.1);
        }
        if let Some(max) = patch.max_entries {
            self.max_entries = max.clamp(MAX_ENTRIES_RANGE.0, MAX_ENTRIES_RANGE.1);
        }
    }

    /// Poll interval as a `Duration`.
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.clipboard_check_interval)
    }

    /// Debounce floor as a `Duration`.
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_check_delay)
    }

    fn clamp_ranges(&mut self) {
        self.clipboard_check_interval = self
            .clipboard_check_interval
            .clamp(CHECK_INTERVAL_RANGE.0, CHECK_INTERVAL_RANGE.1);
        self.min_check_delay = self
            .min_check_delay
            .clamp(MIN_CHECK_DELAY_RANGE.0, MIN_CHECK_DELAY_RANGE.1);
        self.max_entries = self
            .max_entries
            .clamp(MAX_ENTRIES_RANGE.0, MAX_ENTRIES_RANGE.1);
    }
}
