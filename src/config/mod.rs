//! Configuration module for stepper-planner.
//!
//! Provides types for loading and validating axis limit configurations
//! from TOML files (with `std` feature) or pre-parsed data, plus the
//! read-only [`Axes`] snapshot the planner consumes.

mod axes;
mod axis;
#[cfg(feature = "std")]
mod loader;
mod machine;
pub mod units;
mod validation;

pub use axes::{Axes, AxisLimits};
pub use axis::AxisConfig;
pub use machine::MachineConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Millimeters, MmPerMin, MmPerSec, MmPerSecSquared};
