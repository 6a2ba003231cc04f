//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::MachineConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_planner::load_config;
///
/// let config = load_config("machine.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MachineConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<MachineConfig> {
    let config: MachineConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[[axes]]
name = "x"
steps_per_mm = 100.0
max_rate_mm_per_min = 10000.0
acceleration_mm_per_sec2 = 10.0
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.number_axis(), 1);
        assert!(config.axis("x").is_some());
        // Defaults apply when omitted
        assert!((config.junction_deviation.value() - 0.013).abs() < 1e-6);
    }

    #[test]
    fn test_parse_two_axis_config() {
        let toml = r#"
junction_deviation_mm = 0.02

[[axes]]
name = "x"
steps_per_mm = 100.0
max_rate_mm_per_min = 10000.0
acceleration_mm_per_sec2 = 10.0
max_travel_mm = 300.0

[[axes]]
name = "y"
steps_per_mm = 80.0
max_rate_mm_per_min = 8000.0
acceleration_mm_per_sec2 = 8.0
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.number_axis(), 2);
        assert!((config.axis("y").unwrap().steps_per_mm - 80.0).abs() < 1e-6);
        assert!((config.junction_deviation.value() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_zero_acceleration() {
        let toml = r#"
[[axes]]
name = "x"
steps_per_mm = 100.0
max_rate_mm_per_min = 10000.0
acceleration_mm_per_sec2 = 0.0
"#;

        assert!(parse_config(toml).is_err());
    }
}
