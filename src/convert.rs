//! Temperature conversion core
//!
//! Two pure functions drive the whole application:
//! - [`convert`] maps a value between any two scales
//! - [`formula`] looks up the textual formula for a scale pair
//!
//! Both are stateless and total over finite inputs. The caller is
//! responsible for rejecting non-finite input before calling in here.

use crate::types::Unit;

/// Convert a temperature value from one scale to another.
///
/// Identity conversions return the input untouched, so `convert(x, u, u)`
/// is bit-exact for every finite `x`. All other pairs normalize through
/// Celsius as the intermediate scale.
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    if from == to {
        return value;
    }
    from_celsius(to_celsius(value, from), to)
}

/// Normalize a value on any scale to Celsius
fn to_celsius(value: f64, from: Unit) -> f64 {
    match from {
        Unit::Celsius => value,
        Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        Unit::Kelvin => value - 273.15,
    }
}

/// Convert a Celsius value to the target scale
fn from_celsius(celsius: f64, to: Unit) -> f64 {
    match to {
        Unit::Celsius => celsius,
        Unit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        Unit::Kelvin => celsius + 273.15,
    }
}

/// Textual formula describing the transformation [`convert`] applies.
pub fn formula(from: Unit, to: Unit) -> &'static str {
    use Unit::*;
    match (from, to) {
        (Celsius, Fahrenheit) => "(°C × 9/5) + 32 = °F",
        (Celsius, Kelvin) => "°C + 273.15 = K",
        (Fahrenheit, Celsius) => "(°F − 32) × 5/9 = °C",
        (Fahrenheit, Kelvin) => "((°F − 32) × 5/9) + 273.15 = K",
        (Kelvin, Celsius) => "K − 273.15 = °C",
        (Kelvin, Fahrenheit) => "((K − 273.15) × 9/5) + 32 = °F",
        _ => "No conversion needed.",
    }
}
