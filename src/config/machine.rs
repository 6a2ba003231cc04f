//! Machine configuration - root configuration structure.

use heapless::Vec;
use serde::Deserialize;

use crate::MAX_AXIS;

use super::axis::AxisConfig;
use super::units::Millimeters;

/// Root configuration structure from TOML.
///
/// Axes are ordered; axis 0 is the first entry in the `[[axes]]` array.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MachineConfig {
    /// Ordered axis configurations.
    pub axes: Vec<AxisConfig, MAX_AXIS>,

    /// Cornering tolerance for junction speed computation.
    #[serde(default = "default_junction_deviation", rename = "junction_deviation_mm")]
    pub junction_deviation: Millimeters,

    /// Maximum deviation when flattening arcs into line segments.
    #[serde(default = "default_arc_tolerance", rename = "arc_tolerance_mm")]
    pub arc_tolerance: Millimeters,
}

fn default_junction_deviation() -> Millimeters {
    Millimeters(0.013)
}

fn default_arc_tolerance() -> Millimeters {
    Millimeters(0.002)
}

impl MachineConfig {
    /// Get an axis configuration by name.
    pub fn axis(&self, name: &str) -> Option<&AxisConfig> {
        self.axes.iter().find(|a| a.name.as_str() == name)
    }

    /// Number of configured axes.
    #[inline]
    pub fn number_axis(&self) -> usize {
        self.axes.len()
    }

    /// List all axis names in order.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.iter().map(|a| a.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{MmPerMin, MmPerSecSquared};

    #[test]
    fn test_axis_lookup() {
        let mut axes = Vec::new();
        for name in ["x", "y"] {
            axes.push(AxisConfig {
                name: heapless::String::try_from(name).unwrap(),
                steps_per_mm: 100.0,
                max_rate: MmPerMin(10_000.0),
                acceleration: MmPerSecSquared(10.0),
                max_travel: Millimeters(300.0),
            })
            .unwrap();
        }
        let config = MachineConfig {
            axes,
            junction_deviation: default_junction_deviation(),
            arc_tolerance: default_arc_tolerance(),
        };

        assert_eq!(config.number_axis(), 2);
        assert!(config.axis("y").is_some());
        assert!(config.axis("z").is_none());
        assert!((config.junction_deviation.value() - 0.013).abs() < 1e-6);
    }
}
