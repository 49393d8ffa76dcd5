//! Quantity extraction with unit conversion
//!
//! Each quantity kind finds the first `<number><unit>` occurrence in a title
//! and converts it to a fixed base unit: kilograms, litres, watts or
//! gigabytes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

static WEIGHT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(kg|gr|g|t|lb|oz|кг)\b").unwrap());

// `m³` ends in a non-word character, so it cannot take a trailing \b
static VOLUME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(m³|(?:ml|cl|m3|l|мл|л)\b)").unwrap()
});

static POWER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(watts|volts|volt|kw|mw|hp|w|v)\b").unwrap()
});

static STORAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(gb|tb|mb|pb|гб|тб|мб)\b").unwrap());

/// The kinds of quantity a title can state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Converted to kilograms
    Weight,
    /// Converted to litres
    Volume,
    /// Converted to watts
    Power,
    /// Converted to gigabytes
    Storage,
}

impl Quantity {
    pub const ALL: [Quantity; 4] = [
        Quantity::Weight,
        Quantity::Volume,
        Quantity::Power,
        Quantity::Storage,
    ];

    pub fn pattern(self) -> &'static Regex {
        match self {
            Quantity::Weight => &WEIGHT_PATTERN,
            Quantity::Volume => &VOLUME_PATTERN,
            Quantity::Power => &POWER_PATTERN,
            Quantity::Storage => &STORAGE_PATTERN,
        }
    }

    /// Multiplier from `unit` to the base unit, or `None` when the unit does
    /// not measure this quantity (a voltage matched by the power pattern)
    pub fn factor(self, unit: &str) -> Option<f64> {
        let unit = unit.to_lowercase();
        let factor = match self {
            Quantity::Weight => match unit.as_str() {
                "g" | "gr" => 0.001,
                "t" => 1000.0,
                "lb" => 0.453_592_37,
                "oz" => 0.028_349_523_125,
                _ => 1.0,
            },
            // ml and cl share one divisor
            Quantity::Volume => match unit.as_str() {
                "ml" | "cl" | "мл" => 0.01,
                "m³" | "m3" => 1000.0,
                _ => 1.0,
            },
            Quantity::Power => match unit.as_str() {
                "kw" => 1000.0,
                "mw" => 1_000_000.0,
                "hp" => 745.7,
                "v" | "volt" | "volts" => return None,
                _ => 1.0,
            },
            Quantity::Storage => match unit.as_str() {
                "tb" | "тб" => 1024.0,
                "mb" | "мб" => 1.0 / 1024.0,
                "pb" => 1024.0 * 1024.0,
                _ => 1.0,
            },
        };
        Some(factor)
    }
}

/// Parse a captured number, accepting a comma as decimal separator
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// First occurrence of `kind` in `title`, converted to its base unit
pub fn extract_quantity(title: &str, kind: Quantity) -> Option<f64> {
    let caps = kind.pattern().captures(title)?;
    let value = parse_number(caps.get(1)?.as_str())?;
    let factor = kind.factor(caps.get(2)?.as_str())?;
    Some(value * factor)
}

pub fn extract_weight(title: &str) -> Option<f64> {
    extract_quantity(title, Quantity::Weight)
}

pub fn extract_volume(title: &str) -> Option<f64> {
    extract_quantity(title, Quantity::Volume)
}

pub fn extract_power(title: &str) -> Option<f64> {
    extract_quantity(title, Quantity::Power)
}

pub fn extract_storage(title: &str) -> Option<f64> {
    extract_quantity(title, Quantity::Storage)
}

/// Remove the first occurrence of `kind` from `title`
pub fn strip_quantity(title: &str, kind: Quantity) -> Cow<'_, str> {
    kind.pattern().replace(title, "")
}

/// Render a measurement without float noise: 100.0 -> "100", 0.5 -> "0.5"
pub fn format_measure(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}
