//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::MachineConfig;

/// Validate a machine configuration.
///
/// Checks:
/// - At least one axis is configured
/// - Axis names are unique
/// - `steps_per_mm`, `max_rate`, `acceleration` are positive for every axis
/// - Junction deviation is positive
///
/// The planner treats these properties as preconditions; it performs no
/// range checks of its own at runtime.
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    if config.axes.is_empty() {
        return Err(Error::Config(ConfigError::NoAxes));
    }

    for (index, axis) in config.axes.iter().enumerate() {
        // Names must be unique so lookups are unambiguous
        if config.axes[..index]
            .iter()
            .any(|other| other.name == axis.name)
        {
            return Err(Error::Config(ConfigError::DuplicateAxisName(
                axis.name.clone(),
            )));
        }

        if axis.steps_per_mm <= 0.0 {
            return Err(Error::Config(ConfigError::InvalidStepsPerMm {
                axis: axis.name.clone(),
                value: axis.steps_per_mm,
            }));
        }

        if axis.max_rate.value() <= 0.0 {
            return Err(Error::Config(ConfigError::InvalidMaxRate {
                axis: axis.name.clone(),
                value: axis.max_rate.value(),
            }));
        }

        if axis.acceleration.value() <= 0.0 {
            return Err(Error::Config(ConfigError::InvalidAcceleration {
                axis: axis.name.clone(),
                value: axis.acceleration.value(),
            }));
        }
    }

    if config.junction_deviation.value() <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidJunctionDeviation(
            config.junction_deviation.value(),
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Millimeters, MmPerMin, MmPerSecSquared};
    use crate::config::AxisConfig;

    fn make_axis(name: &str, steps_per_mm: f32) -> AxisConfig {
        AxisConfig {
            name: heapless::String::try_from(name).unwrap(),
            steps_per_mm,
            max_rate: MmPerMin(10_000.0),
            acceleration: MmPerSecSquared(10.0),
            max_travel: Millimeters(300.0),
        }
    }

    fn make_config(axes: &[AxisConfig]) -> MachineConfig {
        let mut vec = heapless::Vec::new();
        for axis in axes {
            vec.push(axis.clone()).unwrap();
        }
        MachineConfig {
            axes: vec,
            junction_deviation: Millimeters(0.013),
            arc_tolerance: Millimeters(0.002),
        }
    }

    #[test]
    fn test_empty_config_rejected() {
        let config = make_config(&[]);
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::NoAxes))
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let config = make_config(&[make_axis("x", 100.0), make_axis("x", 100.0)]);
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::DuplicateAxisName(_)))
        ));
    }

    #[test]
    fn test_invalid_steps_per_mm() {
        let config = make_config(&[make_axis("x", 0.0)]);
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidStepsPerMm { .. }))
        ));
    }

    #[test]
    fn test_valid_config() {
        let config = make_config(&[make_axis("x", 100.0), make_axis("y", 100.0)]);
        assert!(validate_config(&config).is_ok());
    }
}
