//! Zero-defaulting numeric deserialization
//!
//! Records arrive from hand-edited JSON files and imports, so numeric fields
//! accept integers, floats and numeric strings. Anything else (null, words,
//! objects, NaN, infinities) becomes 0 instead of failing the whole load.
//! Combine with `#[serde(default)]` so missing fields are zero too.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Loose {
    fn into_f64(self) -> f64 {
        let value = match self {
            Loose::Int(i) => i as f64,
            Loose::Float(f) => f,
            Loose::Text(s) => s.trim().replace(',', "").parse::<f64>().unwrap_or(0.0),
            Loose::Other(_) => 0.0,
        };
        finite_or_zero(value)
    }
}

/// Replace NaN and infinities with 0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Deserialize an `f64` field, coercing unusable input to 0
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Loose::deserialize(deserializer)?.into_f64())
}

/// Deserialize an integer count of minor units, rounding fractional input
pub fn minor_units<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Int(i) => i,
        other => other.into_f64().round() as i64,
    })
}
