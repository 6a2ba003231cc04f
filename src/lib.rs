//! # stepper-planner
//!
//! Look-ahead motion planning for multi-axis stepper motor controllers.
//!
//! Given a stream of Cartesian target positions with requested feed rates,
//! the planner maintains a lock-free ring of trapezoidal motion blocks
//! (accelerate / cruise / decelerate) that a downstream step generator
//! consumes to emit per-axis step pulses. Each new move is chained to its
//! predecessor at the maximum junction speed the machine geometry allows,
//! and the whole unexecuted tail of the queue is re-optimized on every
//! insertion.
//!
//! ## Features
//!
//! - **Junction-deviation cornering**: entry speeds follow the Grbl-style
//!   centripetal approximation, with an arc-limited cap for short moves
//!   through obtuse junctions
//! - **Step-accurate trapezoids**: acceleration and deceleration points are
//!   computed in dominant-axis step counts, with timer-tick ramp durations
//!   and their fixed-point inverses precomputed for the step generator
//! - **Lock-free SPSC queue**: a single producer plans while a single
//!   consumer (typically a timer interrupt) executes; coordination uses
//!   atomic cursors and a per-block readiness flag, never a lock
//! - **Configuration-driven**: axis limits load from TOML files
//! - **no_std compatible**: the planner core needs neither allocation nor
//!   the standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_planner::{Axes, Planner};
//!
//! // Load axis limits from TOML
//! let config = stepper_planner::load_config("machine.toml")?;
//! let axes = Axes::from_config(&config);
//!
//! // Plan a square at maximum rate
//! let mut planner: Planner = Planner::new();
//! planner.add(&[100.0, 0.0], f32::INFINITY, &axes);
//! planner.add(&[100.0, 100.0], f32::INFINITY, &axes);
//! planner.add(&[0.0, 100.0], f32::INFINITY, &axes);
//! planner.add(&[0.0, 0.0], f32::INFINITY, &axes);
//!
//! // Step-generator side: claim, execute, retire
//! while let Some(index) = planner.claim_next() {
//!     let block = planner.block(index);
//!     // ... emit block.total_step_count steps ...
//!     planner.retire_front();
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod config;
pub mod error;
pub mod math;
pub mod planner;

// Re-exports for ergonomic API
pub use config::{validate_config, Axes, AxisConfig, AxisLimits, MachineConfig};
pub use error::{Error, Result};
pub use math::Vector;
pub use planner::{Planner, PlannerBlock, PlannerBuffer};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

/// Compile-time bound on the number of machine axes.
pub const MAX_AXIS: usize = 9;
