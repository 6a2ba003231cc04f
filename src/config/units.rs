//! Unit types for physical quantities.
//!
//! Provides type-safe representations of distances, rates, and
//! accelerations in the configuration layer. The planner's runtime snapshot
//! ([`super::Axes`]) stores raw `f32` values for the hot math path.

use core::ops::{Add, Mul, Sub};

use serde::Deserialize;

/// Linear distance in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Millimeters(pub f32);

impl Millimeters {
    /// Create a new Millimeters value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Add for Millimeters {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Millimeters {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Feed rate in millimeters per minute.
///
/// Axis rate limits are conventionally configured in mm/min; the planner
/// itself works in mm/s.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct MmPerMin(pub f32);

impl MmPerMin {
    /// Create a new MmPerMin value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Convert to millimeters per second.
    #[inline]
    pub fn to_mm_per_sec(self) -> MmPerSec {
        MmPerSec(self.0 / 60.0)
    }
}

/// Speed in millimeters per second (the planner's working unit).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct MmPerSec(pub f32);

impl MmPerSec {
    /// Create a new MmPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Mul<f32> for MmPerSec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Acceleration in millimeters per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct MmPerSecSquared(pub f32);

impl MmPerSecSquared {
    /// Create a new MmPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Mul<f32> for MmPerSecSquared {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_conversion() {
        let rate = MmPerMin(10_000.0);
        assert!((rate.to_mm_per_sec().value() - 166.6667).abs() < 0.001);
    }

    #[test]
    fn test_distance_arithmetic() {
        let total = Millimeters(100.0) + Millimeters(50.0);
        assert!((total.value() - 150.0).abs() < 1e-6);

        let delta = Millimeters(100.0) - Millimeters(150.0);
        assert!((delta.value() + 50.0).abs() < 1e-6);
    }
}
