//! Error types for stepper-planner.
//!
//! Only configuration loading and validation can fail. The planner core has
//! no recoverable errors: zero-step moves are ignored, out-of-range feed
//! rates are clamped, and a full queue blocks the producer until the step
//! generator frees a slot.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-planner operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// No axes configured
    NoAxes,
    /// Duplicate axis name in configuration
    DuplicateAxisName(heapless::String<16>),
    /// Invalid steps-per-mm (must be > 0)
    InvalidStepsPerMm {
        /// Axis name
        axis: heapless::String<16>,
        /// Offending value
        value: f32,
    },
    /// Invalid maximum rate (must be > 0)
    InvalidMaxRate {
        /// Axis name
        axis: heapless::String<16>,
        /// Offending value
        value: f32,
    },
    /// Invalid acceleration (must be > 0)
    InvalidAcceleration {
        /// Axis name
        axis: heapless::String<16>,
        /// Offending value
        value: f32,
    },
    /// Invalid junction deviation (must be > 0)
    InvalidJunctionDeviation(f32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::NoAxes => write!(f, "Configuration declares no axes"),
            ConfigError::DuplicateAxisName(name) => {
                write!(f, "Duplicate axis name: '{}'", name)
            }
            ConfigError::InvalidStepsPerMm { axis, value } => {
                write!(f, "Axis '{}': invalid steps/mm {}. Must be > 0", axis, value)
            }
            ConfigError::InvalidMaxRate { axis, value } => {
                write!(f, "Axis '{}': invalid max rate {}. Must be > 0", axis, value)
            }
            ConfigError::InvalidAcceleration { axis, value } => {
                write!(f, "Axis '{}': invalid acceleration {}. Must be > 0", axis, value)
            }
            ConfigError::InvalidJunctionDeviation(v) => {
                write!(f, "Invalid junction deviation: {}. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
