//! The look-ahead planner.

use core::f32::consts::FRAC_PI_2;

use libm::{ceilf, fabsf, roundf, sqrtf};

use crate::config::Axes;
use crate::math::Vector;
use crate::MAX_AXIS;

use super::block::PlannerBlock;
use super::buffer::PlannerBuffer;
use super::trapezoid;
use super::{MINIMUM_PLANNER_SPEED, MINIMUM_SPEED_RATE};

/// Multi-axis look-ahead planner over a ring of motion blocks.
///
/// The producer pushes Cartesian moves with [`Planner::add`]; every
/// insertion re-optimizes entry speeds across the unexecuted tail of the
/// queue (reverse pass, forward pass) and recomputes the trapezoids of the
/// affected blocks. The consumer claims blocks from the front with
/// [`Planner::claim_next`] and retires them with [`Planner::retire_front`].
///
/// `CAP` is the ring capacity; the default of 128 blocks gives a CNC-class
/// controller enough look-ahead for smooth cornering through dense G-code.
pub struct Planner<const CAP: usize = 128> {
    buffer: PlannerBuffer<CAP>,
    previous_unit_vector: Vector<f32, MAX_AXIS>,
    last_position_vector: Vector<i32, MAX_AXIS>,
    previous_nominal_speed: f32,
    previous_nominal_speed_sqr: f32,
    /// Ring index of the furthest-forward block whose entry speed is
    /// provably optimal; blocks behind it never need re-planning.
    block_buffer_optimal: usize,
}

impl<const CAP: usize> Planner<CAP> {
    /// Create an empty planner at position zero.
    pub fn new() -> Self {
        Self {
            buffer: PlannerBuffer::new(),
            previous_unit_vector: Vector::new(),
            last_position_vector: Vector::new(),
            previous_nominal_speed: 0.0,
            previous_nominal_speed_sqr: 0.0,
            block_buffer_optimal: 0,
        }
    }

    /// Whether no unexecuted blocks remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of unexecuted blocks in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// The oldest unexecuted block, if any.
    pub fn peek_front(&self) -> Option<&PlannerBlock> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer.block(self.buffer.current()))
        }
    }

    /// Remove the oldest block from the queue.
    ///
    /// Convenience for consumers that do not track claim/retire separately.
    /// Returns `false` when the queue is empty or the front block is still
    /// being recalculated.
    pub fn pop_front(&mut self) -> bool {
        if self.buffer.is_empty() {
            return false;
        }
        if self.buffer.schedule() == self.buffer.current() && self.buffer.claim_next().is_none() {
            return false;
        }
        self.buffer.retire_front()
    }

    /// Step-generator side: claim the next block for execution.
    ///
    /// See [`PlannerBuffer::claim_next`].
    pub fn claim_next(&self) -> Option<usize> {
        self.buffer.claim_next()
    }

    /// Step-generator side: retire the oldest claimed block.
    pub fn retire_front(&self) -> bool {
        self.buffer.retire_front()
    }

    /// Shared view of a block slot.
    #[inline]
    pub fn block(&self, index: usize) -> &PlannerBlock {
        self.buffer.block(index)
    }

    /// Whether the consumer has begun executing the block at `index`.
    #[inline]
    pub fn is_block_busy(&self, index: usize) -> bool {
        self.buffer.is_block_busy(index)
    }

    /// Ring index of the oldest unexecuted block.
    #[inline]
    pub fn front_index(&self) -> usize {
        self.buffer.current()
    }

    /// Ring index one past the newest block.
    #[inline]
    pub fn back_index(&self) -> usize {
        self.buffer.write()
    }

    /// Absolute planned position at the end of the last accepted move, in
    /// steps per axis.
    #[inline]
    pub fn position(&self) -> &Vector<i32, MAX_AXIS> {
        &self.last_position_vector
    }

    /// Unit direction of the last accepted move (zero if none).
    #[inline]
    pub fn previous_unit_vector(&self) -> &Vector<f32, MAX_AXIS> {
        &self.previous_unit_vector
    }

    /// Reset the planned position without generating motion.
    ///
    /// Used after homing or a position sync; the next move starts from
    /// rest.
    pub fn set_position(&mut self, target: &[f32], axes: &Axes) {
        let number_axis = axes.number_axis.min(MAX_AXIS).min(target.len());
        for i in 0..number_axis {
            self.last_position_vector[i] = roundf(target[i] * axes.axis[i].steps_per_mm) as i32;
        }
        self.previous_unit_vector = Vector::new();
        self.previous_nominal_speed = 0.0;
        self.previous_nominal_speed_sqr = 0.0;
    }

    /// Plan a move to `target` (mm per axis) at `feed_rate` (mm/s).
    ///
    /// The feed rate may be infinite for a rapid; it is clamped to the
    /// axis-limited rate. Moves that round to zero steps on every axis are
    /// ignored. When the ring is full this blocks until the step generator
    /// retires a block.
    pub fn add(&mut self, target: &[f32], feed_rate: f32, axes: &Axes) {
        let number_axis = axes.number_axis.min(MAX_AXIS).min(target.len());

        let mut target_steps = Vector::<i32, MAX_AXIS>::new();
        let mut steps_per_axis = Vector::<u32, MAX_AXIS>::new();
        let mut unit_vector = Vector::<f32, MAX_AXIS>::new();
        let mut direction: u16 = 0;
        let mut max_number_steps: u32 = 0;
        let mut total_length_sqr: f32 = 0.0;

        for i in 0..number_axis {
            let axis = &axes.axis[i];
            target_steps[i] = roundf(target[i] * axis.steps_per_mm) as i32;

            let delta_steps = target_steps[i] - self.last_position_vector[i];
            let delta_mm = delta_steps as f32 / axis.steps_per_mm;
            total_length_sqr += delta_mm * delta_mm;
            unit_vector[i] = delta_mm;

            if delta_steps < 0 {
                direction |= 1 << i;
            }

            let magnitude = delta_steps.unsigned_abs();
            if magnitude > max_number_steps {
                max_number_steps = magnitude;
            }
            steps_per_axis[i] = magnitude;
        }

        // No-op?
        if max_number_steps == 0 {
            return;
        }

        let length_mm = sqrtf(total_length_sqr);
        unit_vector.normalize(number_axis);

        // Nominal speed: the axis-limited rate, capped by the commanded
        // feed rate, floored so a block is never planned slower than the
        // machine can meaningfully step.
        let mut nominal_speed = limit_rate_by_axes(&unit_vector, axes);
        if nominal_speed > feed_rate {
            nominal_speed = feed_rate;
        }
        if nominal_speed < MINIMUM_SPEED_RATE {
            nominal_speed = MINIMUM_SPEED_RATE;
        }
        let nominal_speed_sqr = nominal_speed * nominal_speed;
        let nominal_rate = ceilf(max_number_steps as f32 * nominal_speed / length_mm) as u32;

        // Acceleration limited per axis, expressed in dominant-axis steps
        let mut acceleration_steps_per_s2 = f32::MAX;
        for i in 0..number_axis {
            if steps_per_axis[i] != 0 {
                let axis = &axes.axis[i];
                let candidate = axis.acceleration * axis.steps_per_mm * max_number_steps as f32
                    / steps_per_axis[i] as f32;
                if candidate < acceleration_steps_per_s2 {
                    acceleration_steps_per_s2 = candidate;
                }
            }
        }
        let acceleration = acceleration_steps_per_s2 * length_mm / max_number_steps as f32;

        let max_junction_speed_sqr =
            self.junction_speed_sqr(&unit_vector, acceleration, length_mm, nominal_speed_sqr, axes);

        // A block that can de/accelerate between nominal speed and zero
        // within its own length always reaches its junction limits; the
        // passes never need to revisit it.
        let v_allowable_sqr = max_allowable_speed_sqr(
            -acceleration,
            MINIMUM_PLANNER_SPEED * MINIMUM_PLANNER_SPEED,
            length_mm,
        );

        let block = self.buffer.grab_write_slot();
        block.flags.clear();
        block.millimeters = length_mm;
        block.total_step_count = max_number_steps;
        block.target_position = target_steps;
        block.direction = direction;
        block.acceleration = acceleration;
        block.nominal_speed = nominal_speed;
        block.nominal_speed_sqr = nominal_speed_sqr;
        block.nominal_rate = nominal_rate;
        block.acceleration_steps_per_s2 = acceleration_steps_per_s2 as u32;
        block.max_junction_speed_sqr = max_junction_speed_sqr;

        // Start conservatively; the reverse pass grows the entry speed
        // toward the junction limit.
        block.entry_speed_sqr = MINIMUM_PLANNER_SPEED * MINIMUM_PLANNER_SPEED;
        if nominal_speed_sqr <= v_allowable_sqr {
            block.flags.set_nominal_length(true);
        }
        block.flags.set_recalculate(true);

        // Update previous info for the next add() call
        self.previous_unit_vector = unit_vector;
        self.last_position_vector = target_steps;
        self.previous_nominal_speed = nominal_speed;
        self.previous_nominal_speed_sqr = nominal_speed_sqr;

        self.buffer.commit_write();

        // Finish up by recalculating the plan with the new block
        self.recalculate();
    }

    /// Maximum allowable entry speed at the junction between the previous
    /// move and a move along `unit_vector`, squared.
    ///
    /// Uses the centripetal approximation: a circle tangent to both path
    /// segments whose closest edge passes `junction_deviation` from the
    /// corner. Computed without trig via the half-angle identity; for short
    /// moves through obtuse junctions an arc-limited cap based on a
    /// polynomial `acos` approximation is applied on top.
    fn junction_speed_sqr(
        &self,
        unit_vector: &Vector<f32, MAX_AXIS>,
        block_acceleration: f32,
        millimeters: f32,
        nominal_speed_sqr: f32,
        axes: &Axes,
    ) -> f32 {
        let number_axis = axes.number_axis.min(MAX_AXIS);

        // First block, or planning restarted from rest: enforce the
        // minimum junction speed.
        let has_previous =
            self.buffer.schedule() != self.buffer.write() && self.previous_nominal_speed_sqr >= 1e-6;
        if !has_previous {
            return MINIMUM_PLANNER_SPEED * MINIMUM_PLANNER_SPEED;
        }

        // cos(theta) between path segments; prev_unit_vector points along
        // the incoming segment, so the sign is inverted.
        let mut junction_cos_theta = 0.0;
        for i in 0..number_axis {
            junction_cos_theta -= self.previous_unit_vector[i] * unit_vector[i];
        }

        if junction_cos_theta > 0.999999 {
            // A 0 degree acute junction (full reversal): minimum speed only
            return MINIMUM_PLANNER_SPEED * MINIMUM_PLANNER_SPEED;
        }

        // Guard against numerical round-off on colinear segments
        if junction_cos_theta < -0.999999 {
            junction_cos_theta = -0.999999;
        }

        let mut junction_unit_vector = *unit_vector - self.previous_unit_vector;
        junction_unit_vector.normalize(number_axis);

        let junction_acceleration =
            limit_acceleration_by_axes(&junction_unit_vector, axes, block_acceleration);

        // Trig half-angle identity; always positive
        let sin_theta_d2 = sqrtf(0.5 * (1.0 - junction_cos_theta));

        let mut v_max_junction_sqr = junction_acceleration * axes.junction_deviation * sin_theta_d2
            / (1.0 - sin_theta_d2);

        // For small moves through a >135 degree junction, cap by the speed
        // of the approximating arc
        if millimeters < 1.0 && junction_cos_theta < -0.707_106_78 {
            // Fast acos(-t) approximation (max error ±0.033 rad), from the
            // MinMax polynomial published by W. Randolph Franklin:
            //   acos(t)  = pi/2 - asin(t)
            //   acos(-t) = pi/2 + asin(t)
            let neg = if junction_cos_theta < 0.0 { -1.0 } else { 1.0 };
            let t = neg * junction_cos_theta;
            let asin_t = 0.032_843_707
                + t * (-1.451_838_349
                    + t * (29.661_539_56
                        + t * (-131.112_347_7
                            + t * (262.813_056_2
                                + t * (-242.719_962_7 + t * 84.314_662_02)))));
            // Bottoms out at 0.033, which avoids a divide by zero
            let junction_theta = FRAC_PI_2 + neg * asin_t;

            let limit_sqr = millimeters * junction_acceleration / junction_theta;
            if limit_sqr < v_max_junction_sqr {
                v_max_junction_sqr = limit_sqr;
            }
        }

        // Never faster than either neighboring block can cruise
        let previous_nominal_sqr = self.previous_nominal_speed * self.previous_nominal_speed;
        v_max_junction_sqr
            .min(nominal_speed_sqr)
            .min(previous_nominal_sqr)
    }

    /// Re-optimize entry speeds and trapezoids across the unexecuted tail.
    ///
    /// Runs the reverse pass (maximize deceleration curves back from the
    /// newest block), the forward pass (limit by what each block can
    /// actually accelerate to, advancing the optimal boundary), then
    /// recomputes the trapezoid of every block whose junction speeds
    /// changed. Idempotent until the next [`Planner::add`].
    pub fn recalculate(&mut self) {
        // The consumer may have executed past the optimal boundary while we
        // were away; planning restarts no earlier than the next block to be
        // scheduled.
        let write = self.buffer.write();
        let schedule = self.buffer.schedule();
        let planned_len = (write + CAP - schedule) % CAP;
        let optimal_offset = (self.block_buffer_optimal + CAP - schedule) % CAP;
        if optimal_offset > planned_len {
            self.block_buffer_optimal = schedule;
        }

        // With a single unplanned block there are no junctions to optimize
        if self.buffer.last_write_index() != self.block_buffer_optimal {
            self.reverse_pass();
            self.forward_pass();
        }
        self.recalculate_trapezoids();
    }

    /// Reverse pass: coarsely maximize all deceleration curves by
    /// back-planning from the newest block toward the optimal boundary.
    /// The forward pass refines the result.
    fn reverse_pass(&mut self) {
        let write = self.buffer.write();
        // Distance behind the write cursor; larger is older
        let behind = |index: usize| (write + CAP - index) % CAP;

        let mut block_index = self.buffer.last_write_index();
        let mut planned_index = self.block_buffer_optimal;
        let mut next: Option<usize> = None;

        while behind(block_index) < behind(planned_index) {
            self.reverse_pass_kernel(block_index, next);
            next = Some(block_index);
            block_index = (block_index + CAP - 1) % CAP;

            // The consumer may advance mid-pass; follow it so we never plan
            // an already-consumed block
            let schedule = self.buffer.schedule();
            if behind(schedule) < behind(planned_index) {
                planned_index = schedule;
            }
        }
    }

    fn reverse_pass_kernel(&mut self, current_index: usize, next_index: Option<usize>) {
        let (exit_speed_sqr, next_recalculate) = match next_index {
            Some(index) => {
                let next = self.buffer.block(index);
                (next.entry_speed_sqr, next.flags.recalculate())
            }
            // The newest block always plans against a minimum-speed exit
            None => (MINIMUM_PLANNER_SPEED * MINIMUM_PLANNER_SPEED, false),
        };

        let (entry_speed_sqr, max_entry_speed_sqr, nominal_length, acceleration, millimeters) = {
            let current = self.buffer.block(current_index);
            (
                current.entry_speed_sqr,
                current.max_junction_speed_sqr,
                current.flags.nominal_length(),
                current.acceleration,
                current.millimeters,
            )
        };

        // Already cruising at the junction limit and the successor did not
        // change: nothing to do
        if entry_speed_sqr == max_entry_speed_sqr && !next_recalculate {
            return;
        }

        // A nominal-length block always reaches its junction limit; others
        // are bounded by what they can shed decelerating to the exit speed
        let new_entry_speed_sqr = if nominal_length {
            max_entry_speed_sqr
        } else {
            max_entry_speed_sqr.min(max_allowable_speed_sqr(
                -acceleration,
                exit_speed_sqr,
                millimeters,
            ))
        };

        if entry_speed_sqr != new_entry_speed_sqr {
            // Latch the block so the step generator does not consume it
            // while its speed is in flux
            self.buffer.block(current_index).flags.set_recalculate(true);

            // The block may have become busy just before we latched it
            if self.buffer.is_block_busy(current_index) {
                // Too late; the consumer owns it now
                self.buffer
                    .block(current_index)
                    .flags
                    .set_recalculate(false);
            } else {
                self.buffer.block_mut(current_index).entry_speed_sqr = new_entry_speed_sqr;
            }
        }
    }

    /// Forward pass: bound each entry speed by what the previous block can
    /// accelerate to, and advance the optimal boundary over blocks that can
    /// never improve.
    fn forward_pass(&mut self) {
        let mut block_index = self.block_buffer_optimal;
        let mut previous: Option<usize> = None;

        while block_index != self.buffer.write() {
            // If the previous block became busy its exit speed is frozen,
            // so the current block's entry cannot be altered either
            let previous_busy = previous.map_or(false, |index| self.buffer.is_block_busy(index));
            if !previous_busy {
                self.forward_pass_kernel(previous, block_index);
            }
            previous = Some(block_index);
            block_index = (block_index + 1) % CAP;
        }
    }

    fn forward_pass_kernel(&mut self, previous_index: Option<usize>, current_index: usize) {
        let Some(previous_index) = previous_index else {
            return;
        };

        let (previous_nominal_length, previous_entry_sqr, previous_acceleration, previous_mm) = {
            let previous = self.buffer.block(previous_index);
            (
                previous.flags.nominal_length(),
                previous.entry_speed_sqr,
                previous.acceleration,
                previous.millimeters,
            )
        };
        let current_entry_sqr = self.buffer.block(current_index).entry_speed_sqr;

        // A previous block still accelerating and too short to complete the
        // full speed change limits how fast this block may enter
        if !previous_nominal_length && previous_entry_sqr < current_entry_sqr {
            let new_entry_speed_sqr =
                max_allowable_speed_sqr(-previous_acceleration, previous_entry_sqr, previous_mm);

            if new_entry_speed_sqr < current_entry_sqr {
                self.buffer.block(current_index).flags.set_recalculate(true);

                if self.buffer.is_block_busy(current_index) {
                    self.buffer
                        .block(current_index)
                        .flags
                        .set_recalculate(false);
                } else {
                    self.buffer.block_mut(current_index).entry_speed_sqr = new_entry_speed_sqr;
                    // Current block is full-acceleration: everything behind
                    // it is optimally planned
                    self.block_buffer_optimal = current_index;
                }
            }
        }

        // A block at its junction limit also brackets an optimal plan;
        // nothing before it can improve further
        let current = self.buffer.block(current_index);
        if current.entry_speed_sqr == current.max_junction_speed_sqr {
            self.block_buffer_optimal = current_index;
        }
    }

    /// Recompute the trapezoid of every block whose entry or exit junction
    /// speed changed, walking the schedulable range front to back. The
    /// newest block is always recomputed against a minimum-speed exit.
    fn recalculate_trapezoids(&mut self) {
        let head_index = self.buffer.write();
        let mut block_index = self.buffer.schedule();

        let mut previous: Option<usize> = None;
        let mut previous_entry_speed = 0.0;
        let mut entry_speed = 0.0;

        while block_index != head_index {
            entry_speed = sqrtf(self.buffer.block(block_index).entry_speed_sqr);

            if let Some(previous_index) = previous {
                let previous_recalculate =
                    self.buffer.block(previous_index).flags.recalculate();
                let current_recalculate = self.buffer.block(block_index).flags.recalculate();

                // Recalculate if the entry or the exit junction speed of
                // the previous block changed
                if previous_recalculate || current_recalculate {
                    // The pair condition can trigger off the successor, so
                    // make sure the block itself is latched before touching
                    // its trapezoid
                    self.buffer
                        .block(previous_index)
                        .flags
                        .set_recalculate(true);

                    if !self.buffer.is_block_busy(previous_index) {
                        let nominal_speed_inverse =
                            1.0 / self.buffer.block(previous_index).nominal_speed;
                        trapezoid::calculate_for_block(
                            self.buffer.block_mut(previous_index),
                            previous_entry_speed * nominal_speed_inverse,
                            entry_speed * nominal_speed_inverse,
                        );
                    }

                    // The step generator is free to use the block from now
                    // on
                    self.buffer
                        .block(previous_index)
                        .flags
                        .set_recalculate(false);
                }
            }

            previous = Some(block_index);
            previous_entry_speed = entry_speed;
            block_index = (block_index + 1) % CAP;
        }

        // The newest block always exits at minimum planner speed
        if let Some(last_index) = previous {
            self.buffer.block(last_index).flags.set_recalculate(true);

            if !self.buffer.is_block_busy(last_index) {
                let nominal_speed_inverse = 1.0 / self.buffer.block(last_index).nominal_speed;
                trapezoid::calculate_for_block(
                    self.buffer.block_mut(last_index),
                    entry_speed * nominal_speed_inverse,
                    MINIMUM_PLANNER_SPEED * nominal_speed_inverse,
                );
            }

            self.buffer.block(last_index).flags.set_recalculate(false);
        }
    }
}

impl<const CAP: usize> Default for Planner<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

/// `v² = v_end² − 2·a·d`: the speed attainable `d` millimeters before
/// reaching `target_speed_sqr` at constant acceleration `accel`. Pass a
/// negative acceleration for decelerations. Never negative.
fn max_allowable_speed_sqr(accel: f32, target_speed_sqr: f32, distance: f32) -> f32 {
    let speed_sqr = target_speed_sqr - 2.0 * accel * distance;
    if speed_sqr > 0.0 {
        speed_sqr
    } else {
        0.0
    }
}

/// Smallest per-axis acceleration projected onto `unit_vector`, starting
/// from `limit` (mm/s²). Zero components are skipped to avoid a divide by
/// zero.
fn limit_acceleration_by_axes(unit_vector: &Vector<f32, MAX_AXIS>, axes: &Axes, limit: f32) -> f32 {
    let number_axis = axes.number_axis.min(MAX_AXIS);

    let mut max_acceleration = limit;
    for i in 0..number_axis {
        if unit_vector[i] != 0.0 {
            let candidate = fabsf(axes.axis[i].acceleration / unit_vector[i]);
            if candidate < max_acceleration {
                max_acceleration = candidate;
            }
        }
    }
    max_acceleration
}

/// Smallest per-axis rate limit projected onto `unit_vector`, in mm/s.
fn limit_rate_by_axes(unit_vector: &Vector<f32, MAX_AXIS>, axes: &Axes) -> f32 {
    let number_axis = axes.number_axis.min(MAX_AXIS);

    let mut max_rate = f32::MAX;
    for i in 0..number_axis {
        if unit_vector[i] != 0.0 {
            let candidate = fabsf(axes.axis[i].max_rate / 60.0 / unit_vector[i]);
            if candidate < max_rate {
                max_rate = candidate;
            }
        }
    }
    max_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxisLimits;

    fn test_axes() -> Axes {
        Axes::uniform(
            2,
            AxisLimits {
                steps_per_mm: 100.0,
                max_rate: 10_000.0,
                acceleration: 10.0,
                max_travel: 100_000.0,
            },
        )
    }

    #[test]
    fn test_max_allowable_speed_sqr() {
        // Decelerating at 10 mm/s² over 100 mm from a 0.0025 (mm/s)² exit
        let v = max_allowable_speed_sqr(-10.0, 0.0025, 100.0);
        assert!((v - 2000.0025).abs() < 0.01);

        // Clamps at zero rather than going negative
        assert_eq!(max_allowable_speed_sqr(10.0, 1.0, 100.0), 0.0);
    }

    #[test]
    fn test_limit_rate_by_axes() {
        let axes = test_axes();

        // Single-axis move: 10 000 mm/min = 166.67 mm/s
        let unit = Vector::from_slice(&[1.0, 0.0]);
        assert!((limit_rate_by_axes(&unit, &axes) - 166.6667).abs() < 0.01);

        // Diagonal move: each axis runs at 1/sqrt(2) of the path rate
        let diag = Vector::from_slice(&[0.707_106_78, 0.707_106_78]);
        assert!((limit_rate_by_axes(&diag, &axes) - 235.702).abs() < 0.01);
    }

    #[test]
    fn test_limit_acceleration_by_axes() {
        let axes = test_axes();

        let unit = Vector::from_slice(&[1.0, 0.0]);
        assert!((limit_acceleration_by_axes(&unit, &axes, f32::MAX) - 10.0).abs() < 1e-4);

        // The starting limit wins when it is lower than every axis limit
        assert!((limit_acceleration_by_axes(&unit, &axes, 4.0) - 4.0).abs() < 1e-6);

        // Zero components are ignored
        let zero = Vector::<f32, MAX_AXIS>::new();
        assert_eq!(limit_acceleration_by_axes(&zero, &axes, 7.5), 7.5);
    }

    #[test]
    fn test_first_block_junction_is_minimum() {
        let axes = test_axes();
        let mut planner: Planner<8> = Planner::new();
        planner.add(&[100.0, 0.0], f32::INFINITY, &axes);

        let block = planner.peek_front().unwrap();
        let min_sqr = MINIMUM_PLANNER_SPEED * MINIMUM_PLANNER_SPEED;
        assert!((block.max_junction_speed_sqr - min_sqr).abs() < 1e-9);
        assert!((block.entry_speed_sqr - min_sqr).abs() < 1e-9);
    }

    #[test]
    fn test_single_axis_kinematics() {
        let axes = test_axes();
        let mut planner: Planner<8> = Planner::new();
        planner.add(&[100.0, 0.0], f32::INFINITY, &axes);

        let block = planner.peek_front().unwrap();
        assert_eq!(block.total_step_count, 10_000);
        assert!((block.millimeters - 100.0).abs() < 1e-3);
        // Axis-limited: 10 000 mm/min
        assert!((block.nominal_speed - 166.6667).abs() < 0.01);
        // Axis acceleration carries through unchanged on a single-axis move
        assert!((block.acceleration - 10.0).abs() < 0.01);
        assert_eq!(block.acceleration_steps_per_s2, 1000);
        assert_eq!(block.direction, 0);
    }

    #[test]
    fn test_direction_mask_set_on_negative_move() {
        let axes = test_axes();
        let mut planner: Planner<8> = Planner::new();
        planner.set_position(&[50.0, 50.0], &axes);
        planner.add(&[0.0, 100.0], f32::INFINITY, &axes);

        let block = planner.peek_front().unwrap();
        assert!(block.direction_negative(0));
        assert!(!block.direction_negative(1));
        assert_eq!(block.target_position[0], 0);
        assert_eq!(block.target_position[1], 10_000);
    }

    #[test]
    fn test_set_position_resets_chain_state() {
        let axes = test_axes();
        let mut planner: Planner<8> = Planner::new();
        planner.add(&[10.0, 0.0], f32::INFINITY, &axes);

        planner.set_position(&[0.0, 0.0], &axes);
        assert_eq!(planner.position()[0], 0);
        assert!(planner.previous_unit_vector().length() < 1e-9);
    }
}
