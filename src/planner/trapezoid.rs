//! Step-accurate trapezoid parameter computation.
//!
//! Given a block's entry and exit speeds as fractions of its nominal speed,
//! computes the step indices where acceleration ends and deceleration
//! begins, the boundary step rates, and the ramp durations in step timer
//! ticks. When the ramps cannot meet the nominal rate within the block the
//! profile collapses to a triangle peaking below nominal.

use libm::{ceilf, floorf, sqrtf};

use super::block::PlannerBlock;
use super::{MINIMAL_STEP_RATE, STEPPER_TIMER_RATE};

/// Distance in steps needed to change from `initial_rate` to `target_rate`
/// at the given acceleration (steps/s²).
fn acceleration_distance(initial_rate: f32, target_rate: f32, accel: f32) -> f32 {
    if accel == 0.0 {
        return 0.0;
    }
    (target_rate * target_rate - initial_rate * initial_rate) / (2.0 * accel)
}

/// Step index at which braking must begin so a block that accelerates from
/// `initial_rate` ends at exactly `final_rate` after `distance` steps.
///
/// Used when the trapezoid has no plateau.
fn intersection_distance(initial_rate: f32, final_rate: f32, accel: f32, distance: f32) -> f32 {
    if accel == 0.0 {
        return 0.0;
    }
    (2.0 * accel * distance - initial_rate * initial_rate + final_rate * final_rate)
        / (4.0 * accel)
}

/// Rate reached after accelerating from `initial_rate` over `distance`
/// steps.
fn final_speed(initial_rate: u32, accel: u32, distance: u32) -> u32 {
    sqrtf(initial_rate as f32 * initial_rate as f32 + 2.0 * accel as f32 * distance as f32) as u32
}

/// `0x1_0000_0000 / d`, approximated as `0xFFFF_FFFF / d`.
fn period_inverse(d: u32) -> u32 {
    if d == 0 {
        0xFFFF_FFFF
    } else {
        0xFFFF_FFFF / d
    }
}

/// Recompute a block's trapezoid from entry and exit speed factors
/// (entry speed ÷ nominal speed, exit speed ÷ nominal speed).
///
/// The caller must hold the block's `RECALCULATE` latch and have verified
/// the block is not busy; the step generator refuses latched blocks, so the
/// field group stays coherent.
pub(crate) fn calculate_for_block(block: &mut PlannerBlock, entry_factor: f32, exit_factor: f32) {
    let mut initial_rate = ceilf(block.nominal_rate as f32 * entry_factor) as u32;
    let mut final_rate = ceilf(block.nominal_rate as f32 * exit_factor) as u32;

    // Limit minimal step rate (otherwise the step timer will overflow)
    if initial_rate < MINIMAL_STEP_RATE {
        initial_rate = MINIMAL_STEP_RATE;
    }
    if final_rate < MINIMAL_STEP_RATE {
        final_rate = MINIMAL_STEP_RATE;
    }

    let accel = block.acceleration_steps_per_s2;

    // Steps required to accelerate to and decelerate from the nominal rate
    let mut accelerate_steps = ceilf(acceleration_distance(
        initial_rate as f32,
        block.nominal_rate as f32,
        accel as f32,
    ))
    .max(0.0) as u32;
    let decelerate_steps = floorf(acceleration_distance(
        block.nominal_rate as f32,
        final_rate as f32,
        -(accel as f32),
    ))
    .max(0.0) as u32;

    // Steps between acceleration and deceleration, if any
    let mut plateau_steps =
        block.total_step_count as i64 - accelerate_steps as i64 - decelerate_steps as i64;

    let cruise_rate = if plateau_steps < 0 {
        // The ramps overlap: the nominal rate is unreachable and there is no
        // cruising. Intersect the ramps so the block still exits at exactly
        // final_rate.
        let intersection = ceilf(intersection_distance(
            initial_rate as f32,
            final_rate as f32,
            accel as f32,
            block.total_step_count as f32,
        ));
        accelerate_steps = (intersection.max(0.0) as u32).min(block.total_step_count);
        plateau_steps = 0;

        final_speed(initial_rate, accel, accelerate_steps)
    } else {
        block.nominal_rate
    };

    // Ramp durations in timer ticks, speed versus time rather than steps
    let accel = accel.max(1);
    let acceleration_time =
        ((cruise_rate.saturating_sub(initial_rate)) as f32 / accel as f32 * STEPPER_TIMER_RATE as f32) as u32;
    let deceleration_time =
        ((cruise_rate.saturating_sub(final_rate)) as f32 / accel as f32 * STEPPER_TIMER_RATE as f32) as u32;

    // Store new block parameters
    block.accelerate_until_step = accelerate_steps;
    block.decelerate_after_step = accelerate_steps + plateau_steps as u32;
    block.initial_rate = initial_rate;
    block.final_rate = final_rate;
    block.cruise_rate = cruise_rate;
    block.acceleration_time = acceleration_time;
    block.deceleration_time = deceleration_time;
    block.acceleration_time_inverse = period_inverse(acceleration_time);
    block.deceleration_time_inverse = period_inverse(deceleration_time);
}
