//! Integration tests for configuration loading.
//!
//! These verify the workflow from TOML parsing through validation to the
//! runtime axis snapshot the planner consumes.

use stepper_planner::config::parse_config;
use stepper_planner::error::{ConfigError, Error};
use stepper_planner::{validate_config, Axes};

const TWO_AXIS_CONFIG: &str = r#"
junction_deviation_mm = 0.013
arc_tolerance_mm = 0.002

[[axes]]
name = "x"
steps_per_mm = 100.0
max_rate_mm_per_min = 10000.0
acceleration_mm_per_sec2 = 10.0
max_travel_mm = 300.0

[[axes]]
name = "y"
steps_per_mm = 100.0
max_rate_mm_per_min = 10000.0
acceleration_mm_per_sec2 = 10.0
max_travel_mm = 200.0
"#;

#[test]
fn parse_two_axis_machine() {
    let config = parse_config(TWO_AXIS_CONFIG).expect("Should parse two-axis config");

    assert_eq!(config.number_axis(), 2);

    let x = config.axis("x").expect("x axis should exist");
    assert!((x.steps_per_mm - 100.0).abs() < 1e-6);
    assert!((x.max_rate.value() - 10_000.0).abs() < 1e-3);
    assert!((x.acceleration.value() - 10.0).abs() < 1e-6);
    assert!((x.max_travel.value() - 300.0).abs() < 1e-6);

    let names: Vec<_> = config.axis_names().collect();
    assert_eq!(names, ["x", "y"]);
}

#[test]
fn defaults_apply_when_omitted() {
    let toml = r#"
[[axes]]
name = "x"
steps_per_mm = 80.0
max_rate_mm_per_min = 6000.0
acceleration_mm_per_sec2 = 25.0
"#;

    let config = parse_config(toml).expect("Should parse minimal config");
    assert!((config.junction_deviation.value() - 0.013).abs() < 1e-6);
    assert!((config.arc_tolerance.value() - 0.002).abs() < 1e-6);
    assert!((config.axis("x").unwrap().max_travel.value() - 1000.0).abs() < 1e-6);
}

#[test]
fn snapshot_matches_config() {
    let config = parse_config(TWO_AXIS_CONFIG).unwrap();
    let axes = Axes::from_config(&config);

    assert_eq!(axes.number_axis, 2);
    assert!((axes.axis[0].steps_per_mm - 100.0).abs() < 1e-6);
    assert!((axes.axis[0].max_rate - 10_000.0).abs() < 1e-3);
    assert!((axes.axis[1].acceleration - 10.0).abs() < 1e-6);
    assert!((axes.axis[1].max_travel - 200.0).abs() < 1e-6);
    assert!((axes.junction_deviation - 0.013).abs() < 1e-6);
    assert!((axes.arc_tolerance - 0.002).abs() < 1e-6);
}

#[test]
fn validation_rejects_bad_limits() {
    let zero_rate = r#"
[[axes]]
name = "x"
steps_per_mm = 100.0
max_rate_mm_per_min = 0.0
acceleration_mm_per_sec2 = 10.0
"#;
    assert!(matches!(
        parse_config(zero_rate),
        Err(Error::Config(ConfigError::InvalidMaxRate { .. }))
    ));

    let negative_steps = r#"
[[axes]]
name = "x"
steps_per_mm = -100.0
max_rate_mm_per_min = 6000.0
acceleration_mm_per_sec2 = 10.0
"#;
    assert!(matches!(
        parse_config(negative_steps),
        Err(Error::Config(ConfigError::InvalidStepsPerMm { .. }))
    ));
}

#[test]
fn validation_rejects_duplicate_axes() {
    let duplicate = r#"
[[axes]]
name = "x"
steps_per_mm = 100.0
max_rate_mm_per_min = 6000.0
acceleration_mm_per_sec2 = 10.0

[[axes]]
name = "x"
steps_per_mm = 100.0
max_rate_mm_per_min = 6000.0
acceleration_mm_per_sec2 = 10.0
"#;
    assert!(matches!(
        parse_config(duplicate),
        Err(Error::Config(ConfigError::DuplicateAxisName(_)))
    ));
}

#[test]
fn parsed_config_revalidates_cleanly() {
    // parse_config already validates; running the validator again on the
    // same structure must agree
    let config = parse_config(TWO_AXIS_CONFIG).unwrap();
    assert!(validate_config(&config).is_ok());
}

#[test]
fn parse_error_reports_config_error() {
    let result = parse_config("this is not toml [[");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}
