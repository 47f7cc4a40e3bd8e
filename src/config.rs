//! Configuration management for tempconv
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/tempconv/config.toml

use crate::types::Unit;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    pub default_from: Unit,
    pub default_to: Unit,
    pub display: DisplayOptions,
    pub history: HistoryOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::Gruvbox,
            default_from: Unit::Celsius,
            default_to: Unit::Fahrenheit,
            display: DisplayOptions::default(),
            history: HistoryOptions::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("tempconv");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Gruvbox,
    Nord,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Gruvbox => "Gruvbox",
            ThemeName::Nord => "Nord",
            ThemeName::Transparent => "Transparent",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Gruvbox => ThemeName::Nord,
            ThemeName::Nord => ThemeName::Transparent,
            ThemeName::Transparent => ThemeName::Gruvbox,
        }
    }
}

/// Display options for the Convert tab
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_formula: bool,
    pub show_recent_panel: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_formula: true,
            show_recent_panel: true,
        }
    }
}

/// History retention options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryOptions {
    pub enabled: bool,
    pub max_entries: usize,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 100,
        }
    }
}

impl HistoryOptions {
    /// Retention limits offered by the Settings tab
    pub const LIMITS: [usize; 4] = [50, 100, 250, 500];

    /// Cycle to the next retention limit
    pub fn next_limit(&self) -> usize {
        let pos = Self::LIMITS.iter().position(|&l| l == self.max_entries);
        match pos {
            Some(i) => Self::LIMITS[(i + 1) % Self::LIMITS.len()],
            None => Self::LIMITS[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeName::Gruvbox);
        assert_eq!(config.default_from, Unit::Celsius);
        assert_eq!(config.default_to, Unit::Fahrenheit);
        assert!(config.display.show_formula);
        assert!(config.history.enabled);
        assert_eq!(config.history.max_entries, 100);
    }

    #[test]
    fn test_theme_cycle() {
        let theme = ThemeName::Gruvbox;
        assert_eq!(theme.next(), ThemeName::Nord);
        assert_eq!(theme.next().next(), ThemeName::Transparent);
        assert_eq!(theme.next().next().next(), ThemeName::Gruvbox);
    }

    #[test]
    fn test_history_limit_cycle() {
        let mut history = HistoryOptions::default();
        assert_eq!(history.next_limit(), 250);

        history.max_entries = 500;
        assert_eq!(history.next_limit(), 50);

        // A hand-edited config value falls back to the first offered limit
        history.max_entries = 42;
        assert_eq!(history.next_limit(), 50);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.theme, config.theme);
        assert_eq!(parsed.default_from, config.default_from);
        assert_eq!(parsed.history.max_entries, config.history.max_entries);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("theme = \"nord\"").unwrap();
        assert_eq!(parsed.theme, ThemeName::Nord);
        assert_eq!(parsed.default_to, Unit::Fahrenheit);
        assert!(parsed.display.show_formula);
    }
}
