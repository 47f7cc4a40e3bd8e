//! Core data types for tempconv
//!
//! This module defines all shared data structures used throughout the application.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A temperature scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Unit {
    pub fn all() -> &'static [Unit] {
        &[Unit::Celsius, Unit::Fahrenheit, Unit::Kelvin]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Unit::Celsius => "Celsius",
            Unit::Fahrenheit => "Fahrenheit",
            Unit::Kelvin => "Kelvin",
        }
    }

    /// Display symbol (Kelvin carries no degree sign)
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::Kelvin => "K",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Unit::Celsius => Unit::Fahrenheit,
            Unit::Fahrenheit => Unit::Kelvin,
            Unit::Kelvin => Unit::Celsius,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Unit::Celsius => Unit::Kelvin,
            Unit::Fahrenheit => Unit::Celsius,
            Unit::Kelvin => Unit::Fahrenheit,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = String;

    /// Parse a unit from user text ("c", "celsius", "°C", ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "°c" | "celsius" => Ok(Unit::Celsius),
            "f" | "°f" | "fahrenheit" => Ok(Unit::Fahrenheit),
            "k" | "kelvin" => Ok(Unit::Kelvin),
            other => Err(format!(
                "Unknown unit '{}' (expected celsius, fahrenheit, or kelvin)",
                other
            )),
        }
    }
}

/// A single performed conversion, as kept in the history log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    pub when: DateTime<Local>,
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
    pub result: f64,
}

impl Conversion {
    /// Format the timestamp for display
    pub fn formatted_time(&self) -> String {
        self.when.format("%d.%m.%y %H:%M").to_string()
    }

    /// Format the input side, e.g. "100.00 °C"
    pub fn formatted_input(&self) -> String {
        format_temperature(self.value, self.from)
    }

    /// Format the result side, e.g. "212.00 °F"
    pub fn formatted_result(&self) -> String {
        format_temperature(self.result, self.to)
    }
}

/// Application tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Convert,
    History,
    Settings,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Convert, Tab::History, Tab::Settings]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Convert => 0,
            Tab::History => 1,
            Tab::Settings => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Convert => "Convert",
            Tab::History => "History",
            Tab::Settings => "Settings",
        }
    }
}

/// Which widget on the Convert tab owns keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Value,
    From,
    To,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Value => Focus::From,
            Focus::From => Focus::To,
            Focus::To => Focus::Value,
        }
    }
}

// Helper functions

/// Format a temperature with two decimal places and the unit symbol
pub fn format_temperature(value: f64, unit: Unit) -> String {
    format!("{:.2} {}", value, unit.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(212.0, Unit::Fahrenheit), "212.00 °F");
        assert_eq!(format_temperature(273.15, Unit::Kelvin), "273.15 K");
        assert_eq!(format_temperature(-0.005, Unit::Celsius), "-0.01 °C");
    }

    #[test]
    fn test_unit_parse_aliases() {
        assert_eq!("c".parse::<Unit>().unwrap(), Unit::Celsius);
        assert_eq!("Fahrenheit".parse::<Unit>().unwrap(), Unit::Fahrenheit);
        assert_eq!(" °C ".parse::<Unit>().unwrap(), Unit::Celsius);
        assert_eq!("K".parse::<Unit>().unwrap(), Unit::Kelvin);
        assert!("rankine".parse::<Unit>().is_err());
    }

    #[test]
    fn test_unit_cycle() {
        let unit = Unit::Celsius;
        assert_eq!(unit.next(), Unit::Fahrenheit);
        assert_eq!(unit.next().next(), Unit::Kelvin);
        assert_eq!(unit.next().next().next(), Unit::Celsius);
        assert_eq!(unit.prev(), Unit::Kelvin);
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Value.next(), Focus::From);
        assert_eq!(Focus::From.next(), Focus::To);
        assert_eq!(Focus::To.next(), Focus::Value);
    }
}
