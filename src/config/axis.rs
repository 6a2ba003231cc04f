//! Per-axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Millimeters, MmPerMin, MmPerSecSquared};

/// Configuration for one machine axis.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConfig {
    /// Human-readable name (max 16 chars, e.g. "x").
    pub name: String<16>,

    /// Steps per millimeter of axis travel (motor steps × microsteps ÷ pitch).
    pub steps_per_mm: f32,

    /// Maximum feed rate in millimeters per minute.
    #[serde(rename = "max_rate_mm_per_min")]
    pub max_rate: MmPerMin,

    /// Maximum acceleration in millimeters per second squared.
    #[serde(rename = "acceleration_mm_per_sec2")]
    pub acceleration: MmPerSecSquared,

    /// Usable travel in millimeters.
    #[serde(default = "default_max_travel", rename = "max_travel_mm")]
    pub max_travel: Millimeters,
}

fn default_max_travel() -> Millimeters {
    Millimeters(1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_fields() {
        let axis = AxisConfig {
            name: String::try_from("x").unwrap(),
            steps_per_mm: 100.0,
            max_rate: MmPerMin(10_000.0),
            acceleration: MmPerSecSquared(10.0),
            max_travel: Millimeters(300.0),
        };

        assert_eq!(axis.name.as_str(), "x");
        assert!((axis.max_rate.to_mm_per_sec().value() - 166.6667).abs() < 0.001);
    }
}
