//! Unit conversion utilities
//!
//! Length settings carry their units alongside the value. Handles conversion
//! between Metric (mm) and Imperial (inch) and supports fractional inch input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Length units a setting may be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimetres
    #[default]
    Metric,
    /// Inches
    Imperial,
}

impl LengthUnit {
    /// Label written into a setting definition's `units` field
    pub fn label(self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "inch",
        }
    }

    /// Convert `value` expressed in `self` into `to`
    pub fn convert(self, value: f64, to: LengthUnit) -> f64 {
        match (self, to) {
            (Self::Metric, Self::Imperial) => value / MM_PER_INCH,
            (Self::Imperial, Self::Metric) => value * MM_PER_INCH,
            _ => value,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "inches" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Parse a length string into the unit it was entered in
///
/// Imperial input may be a mixed fraction such as `1 1/2`.
/// An empty string parses as zero.
pub fn parse_length(input: &str, unit: LengthUnit) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    match unit {
        LengthUnit::Metric => input.parse::<f64>().map_err(|e| e.to_string()),
        LengthUnit::Imperial if input.contains('/') => {
            let mut total = 0.0;
            for part in input.split_whitespace() {
                if part.contains('/') {
                    let frac: Vec<&str> = part.split('/').collect();
                    if frac.len() != 2 {
                        return Err("Invalid fraction format".to_string());
                    }
                    let num = frac[0]
                        .parse::<f64>()
                        .map_err(|_| "Invalid numerator".to_string())?;
                    let den = frac[1]
                        .parse::<f64>()
                        .map_err(|_| "Invalid denominator".to_string())?;
                    if den == 0.0 {
                        return Err("Division by zero".to_string());
                    }
                    total += num / den;
                } else {
                    total += part
                        .parse::<f64>()
                        .map_err(|_| "Invalid number part".to_string())?;
                }
            }
            Ok(total)
        }
        LengthUnit::Imperial => input.parse::<f64>().map_err(|e| e.to_string()),
    }
}

/// Format a length for display in the given unit, three decimals
pub fn format_length(value: f64, unit: LengthUnit) -> String {
    format!("{:.3} {}", value, unit.label())
}
