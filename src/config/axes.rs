//! Runtime axis snapshot derived from machine configuration.

use crate::MAX_AXIS;

use super::machine::MachineConfig;

/// Kinematic limits for one axis, in planner units.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisLimits {
    /// Steps per millimeter of travel.
    pub steps_per_mm: f32,

    /// Maximum feed rate in mm/min.
    pub max_rate: f32,

    /// Maximum acceleration in mm/s².
    pub acceleration: f32,

    /// Usable travel in mm.
    pub max_travel: f32,
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self {
            steps_per_mm: 320.0,
            max_rate: 1000.0,
            acceleration: 25.0,
            max_travel: 1000.0,
        }
    }
}

/// Read-only snapshot of the machine's axis limits.
///
/// Computed once from a validated [`MachineConfig`] and treated as
/// immutable for the lifetime of all planning operations against it. All
/// per-axis values must be positive; the config validator enforces this.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    /// Number of active axes (≤ [`MAX_AXIS`]).
    pub number_axis: usize,

    /// Per-axis limits; entries past `number_axis` are unused.
    pub axis: [AxisLimits; MAX_AXIS],

    /// Cornering tolerance in mm for junction speed computation.
    pub junction_deviation: f32,

    /// Maximum arc-flattening deviation in mm.
    pub arc_tolerance: f32,
}

impl Axes {
    /// Derive the runtime snapshot from a machine configuration.
    pub fn from_config(config: &MachineConfig) -> Self {
        let number_axis = config.axes.len().min(MAX_AXIS);
        let mut axis = [AxisLimits::default(); MAX_AXIS];
        for (limits, cfg) in axis.iter_mut().zip(config.axes.iter()) {
            *limits = AxisLimits {
                steps_per_mm: cfg.steps_per_mm,
                max_rate: cfg.max_rate.value(),
                acceleration: cfg.acceleration.value(),
                max_travel: cfg.max_travel.value(),
            };
        }
        Self {
            number_axis,
            axis,
            junction_deviation: config.junction_deviation.value(),
            arc_tolerance: config.arc_tolerance.value(),
        }
    }

    /// Build a snapshot where every axis shares the same limits.
    ///
    /// Convenient for tests and for symmetric gantries.
    pub fn uniform(number_axis: usize, limits: AxisLimits) -> Self {
        Self {
            number_axis: number_axis.min(MAX_AXIS),
            axis: [limits; MAX_AXIS],
            junction_deviation: 0.013,
            arc_tolerance: 0.002,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_snapshot() {
        let axes = Axes::uniform(
            2,
            AxisLimits {
                steps_per_mm: 100.0,
                max_rate: 10_000.0,
                acceleration: 10.0,
                max_travel: 100_000.0,
            },
        );

        assert_eq!(axes.number_axis, 2);
        assert!((axes.axis[0].steps_per_mm - 100.0).abs() < 1e-6);
        assert!((axes.axis[1].acceleration - 10.0).abs() < 1e-6);
        assert!((axes.junction_deviation - 0.013).abs() < 1e-6);
    }

    #[test]
    fn test_axis_count_clamped() {
        let axes = Axes::uniform(99, AxisLimits::default());
        assert_eq!(axes.number_axis, MAX_AXIS);
    }
}
