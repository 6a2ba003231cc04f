//! Look-ahead planner: block ring, junction optimization, trapezoid
//! generation.
//!
//! The planner is the producer side of a single-producer / single-consumer
//! queue. [`Planner::add`] converts a Cartesian target into a
//! [`PlannerBlock`], chains it to its predecessor at the highest junction
//! speed the machine geometry allows, and re-optimizes the unexecuted tail
//! of the queue. The consumer (a step generator, typically a timer
//! interrupt) claims blocks from the front and retires them as they finish.

mod block;
mod buffer;
#[allow(clippy::module_inception)]
mod planner;
mod trapezoid;

pub use block::{BlockFlags, PlannerBlock};
pub use buffer::PlannerBuffer;
pub use planner::Planner;

/// Slowest speed the planner will schedule at a block boundary (mm/s).
///
/// Junctions and the final block always decelerate to at least this speed
/// rather than a full stop, so the step generator never stalls mid-path.
pub const MINIMUM_PLANNER_SPEED: f32 = 0.05;

/// Floor on any commanded step rate (steps/s).
///
/// Keeps step periods within the range of the step timer.
pub const MINIMAL_STEP_RATE: u32 = 80;

/// Step timer tick frequency (ticks/s) used for ramp durations.
pub const STEPPER_TIMER_RATE: u32 = 20_000_000;

/// Floor on a block's nominal speed (mm/s).
pub const MINIMUM_SPEED_RATE: f32 = 1.0;
