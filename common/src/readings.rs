//! Sensor payload parsing
//!
//! Decrypted payloads look like `T=23.5,P=1012,A=7`. Parsing is tolerant:
//! a malformed token only makes its own key unusable.
//!
//! An empty value such as `T=` is `Invalid`, not zero. Older gateways
//! read it as `0` and forwarded it.

use std::collections::HashMap;

pub const TEMPERATURE_KEY: &str = "T";
pub const PRESSURE_KEY: &str = "P";
pub const ANALOG_KEY: &str = "A";

/// Outcome of looking up one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Valid(f64),
    Invalid,
    Absent,
}

impl Reading {
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Valid(v) => Some(*v),
            Reading::Invalid | Reading::Absent => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Reading::Valid(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorReadings {
    // None marks a key that was present but not numeric.
    values: HashMap<String, Option<f64>>,
}

impl SensorReadings {
    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();

        for token in text.split(',').filter(|t| !t.is_empty()) {
            match token.split_once('=') {
                Some((key, value)) => {
                    values.insert(key.to_string(), parse_number(value));
                }
                None => {
                    values.insert(token.to_string(), None);
                }
            }
        }

        Self { values }
    }

    pub fn get(&self, key: &str) -> Reading {
        match self.values.get(key) {
            Some(Some(v)) => Reading::Valid(*v),
            Some(None) => Reading::Invalid,
            None => Reading::Absent,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn telemetry(&self) -> TelemetryFields {
        TelemetryFields {
            temperature: self.get(TEMPERATURE_KEY),
            pressure: self.get(PRESSURE_KEY),
            analog: self.get(ANALOG_KEY),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The three fields relayed to the telemetry store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryFields {
    pub temperature: Reading,
    pub pressure: Reading,
    pub analog: Reading,
}

impl TelemetryFields {
    pub fn has_any_valid(&self) -> bool {
        self.temperature.is_valid() || self.pressure.is_valid() || self.analog.is_valid()
    }

    /// Store field names paired with the valid values, in field order.
    pub fn valid_fields(&self) -> Vec<(&'static str, f64)> {
        [
            ("field1", self.temperature),
            ("field2", self.pressure),
            ("field3", self.analog),
        ]
        .into_iter()
        .filter_map(|(name, reading)| reading.value().map(|v| (name, v)))
        .collect()
    }
}
