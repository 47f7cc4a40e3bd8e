//! Conversion history
//!
//! Keeps a capped, newest-first log of performed conversions and persists
//! it as JSON. History file location: ~/.local/share/tempconv/history.json
//! (platform data dir).

use crate::types::Conversion;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Log of performed conversions, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub entries: Vec<Conversion>,
}

impl History {
    /// Get the history file path
    pub fn path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .context("Could not determine data directory")?
            .join("tempconv");
        Ok(data_dir.join("history.json"))
    }

    /// Load history from file; a missing file is an empty history
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(History::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read history from {:?}", path))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse history from {:?}", path))
    }

    /// Save history to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize history")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write history to {:?}", path))?;

        Ok(())
    }

    /// Prepend a conversion, dropping the oldest entries beyond `max_entries`
    pub fn record(&mut self, conversion: Conversion, max_entries: usize) {
        self.entries.insert(0, conversion);
        self.entries.truncate(max_entries);
    }

    /// Remove the entry at `index`, if present
    pub fn remove(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Unit;
    use chrono::Local;

    fn sample(value: f64) -> Conversion {
        Conversion {
            when: Local::now(),
            value,
            from: Unit::Celsius,
            to: Unit::Fahrenheit,
            result: crate::convert::convert(value, Unit::Celsius, Unit::Fahrenheit),
        }
    }

    #[test]
    fn test_record_is_newest_first() {
        let mut history = History::default();
        history.record(sample(0.0), 10);
        history.record(sample(100.0), 10);

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries[0].value, 100.0);
        assert_eq!(history.entries[1].value, 0.0);
    }

    #[test]
    fn test_record_caps_entries() {
        let mut history = History::default();
        for i in 0..10 {
            history.record(sample(i as f64), 3);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.entries[0].value, 9.0);
        assert_eq!(history.entries[2].value, 7.0);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut history = History::default();
        history.record(sample(1.0), 10);
        history.record(sample(2.0), 10);

        history.remove(0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries[0].value, 1.0);

        // Out-of-range index is a no-op
        history.remove(5);
        assert_eq!(history.len(), 1);

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let mut history = History::default();
        history.record(sample(36.6), 10);

        let json = serde_json::to_string(&history).unwrap();
        let parsed: History = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.entries[0].value, 36.6);
        assert_eq!(parsed.entries[0].from, Unit::Celsius);
        assert_eq!(parsed.entries[0].to, Unit::Fahrenheit);
    }
}
