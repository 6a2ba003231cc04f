//! A single planned motion segment.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::math::Vector;
use crate::MAX_AXIS;

const NOMINAL_LENGTH: u8 = 1 << 0;
const RECALCULATE: u8 = 1 << 1;

/// Block status flags, packed into one atomic word.
///
/// `RECALCULATE` is the readiness latch of the producer/consumer protocol:
/// while it is set the block's kinematic fields are in flux and the step
/// generator must not load the block. `NOMINAL_LENGTH` marks a block long
/// enough to fully de/accelerate between nominal speed and zero within its
/// own length; it is sticky once computed.
#[derive(Debug, Default)]
pub struct BlockFlags(AtomicU8);

impl BlockFlags {
    /// Whether the block can reach nominal speed from rest and stop again
    /// within its own length.
    #[inline]
    pub fn nominal_length(&self) -> bool {
        self.0.load(Ordering::Acquire) & NOMINAL_LENGTH != 0
    }

    /// Set or clear the nominal-length flag.
    pub fn set_nominal_length(&self, value: bool) {
        if value {
            self.0.fetch_or(NOMINAL_LENGTH, Ordering::AcqRel);
        } else {
            self.0.fetch_and(!NOMINAL_LENGTH, Ordering::AcqRel);
        }
    }

    /// Whether the block's kinematic parameters are in flux.
    #[inline]
    pub fn recalculate(&self) -> bool {
        self.0.load(Ordering::Acquire) & RECALCULATE != 0
    }

    /// Set or clear the recalculate latch.
    pub fn set_recalculate(&self, value: bool) {
        if value {
            self.0.fetch_or(RECALCULATE, Ordering::AcqRel);
        } else {
            self.0.fetch_and(!RECALCULATE, Ordering::AcqRel);
        }
    }

    /// Reset both flags.
    pub(crate) fn clear(&self) {
        self.0.store(0, Ordering::Release);
    }
}

/// One planned segment of motion with a uniform acceleration profile.
///
/// Geometry fields are written once by the producer before the block is
/// published. Kinematic fields are mutated by the re-planning passes under
/// the [`BlockFlags`] protocol. Speeds are kept squared ((mm/s)²) so the
/// passes avoid square roots; step rates are in dominant-axis steps/s.
#[derive(Debug)]
pub struct PlannerBlock {
    /// Planning state flags.
    pub flags: BlockFlags,

    // Geometry, written once per block.
    /// Total travel of this block in mm.
    pub millimeters: f32,
    /// Step events on the dominant axis required to complete this block.
    pub total_step_count: u32,
    /// Absolute target position per axis, in steps.
    pub target_position: Vector<i32, MAX_AXIS>,
    /// Direction bitmask; bit `i` set iff axis `i` moves negative.
    pub direction: u16,

    // Kinematics, refined by the re-planning passes.
    /// Acceleration along the block direction in mm/s².
    pub acceleration: f32,
    /// Fastest allowed speed for this block in mm/s.
    pub nominal_speed: f32,
    /// Nominal speed squared in (mm/s)².
    pub nominal_speed_sqr: f32,
    /// Entry speed at the previous-current junction, squared.
    pub entry_speed_sqr: f32,
    /// Maximum allowable junction entry speed, squared.
    pub max_junction_speed_sqr: f32,

    // Trapezoid parameters consumed by the step generator.
    /// Acceleration in dominant-axis steps/s².
    pub acceleration_steps_per_s2: u32,
    /// Nominal step rate in steps/s.
    pub nominal_rate: u32,
    /// Step rate at block entry.
    pub initial_rate: u32,
    /// Step rate at block exit.
    pub final_rate: u32,
    /// Step rate on the cruise plateau (≤ nominal rate).
    pub cruise_rate: u32,
    /// Step index at which acceleration ends.
    pub accelerate_until_step: u32,
    /// Step index at which deceleration begins.
    pub decelerate_after_step: u32,
    /// Acceleration ramp duration in step timer ticks.
    pub acceleration_time: u32,
    /// Deceleration ramp duration in step timer ticks.
    pub deceleration_time: u32,
    /// `0xFFFF_FFFF / acceleration_time`, precomputed for the ISR.
    pub acceleration_time_inverse: u32,
    /// `0xFFFF_FFFF / deceleration_time`, precomputed for the ISR.
    pub deceleration_time_inverse: u32,
}

impl Default for PlannerBlock {
    fn default() -> Self {
        Self {
            flags: BlockFlags::default(),
            millimeters: 0.0,
            total_step_count: 0,
            target_position: Vector::new(),
            direction: 0,
            acceleration: 0.0,
            nominal_speed: 0.0,
            nominal_speed_sqr: 0.0,
            entry_speed_sqr: 0.0,
            max_junction_speed_sqr: 0.0,
            acceleration_steps_per_s2: 0,
            nominal_rate: 0,
            initial_rate: 0,
            final_rate: 0,
            cruise_rate: 0,
            accelerate_until_step: 0,
            decelerate_after_step: 0,
            acceleration_time: 0,
            deceleration_time: 0,
            acceleration_time_inverse: 0,
            deceleration_time_inverse: 0,
        }
    }
}

impl PlannerBlock {
    /// Whether axis `i` moves in the negative direction for this block.
    #[inline]
    pub fn direction_negative(&self, axis: usize) -> bool {
        self.direction & (1 << axis) != 0
    }
}
