//! Lock-free single-producer / single-consumer ring of planner blocks.

use core::hint::spin_loop;
use core::sync::atomic::{AtomicUsize, Ordering};

use super::block::PlannerBlock;

/// Sentinel for "no block is being executed".
pub(crate) const NO_BUSY_BLOCK: usize = usize::MAX;

/// Fixed-capacity circular buffer of planner blocks with three cursors.
///
/// Reading the cursors against a monotonic written-so-far order, the cyclic
/// invariant is `current_index <= schedule_index <= write_index`:
///
/// - `current_index`: oldest block still executing; owned by the consumer
/// - `schedule_index`: next block the consumer will load; owned by the
///   consumer
/// - `write_index`: next free slot; owned by the producer
///
/// Each owner advances its cursors with release ordering and reads the
/// other side's with acquire, so a block's payload is always published
/// before the cursor move that makes it visible. The consumer additionally
/// publishes which block it is executing through a separate busy cursor;
/// the producer reads it before mutating any block the step generator might
/// be consuming.
#[derive(Debug)]
pub struct PlannerBuffer<const CAP: usize> {
    blocks: [PlannerBlock; CAP],
    current_index: AtomicUsize,
    schedule_index: AtomicUsize,
    write_index: AtomicUsize,
    busy_index: AtomicUsize,
}

impl<const CAP: usize> PlannerBuffer<CAP> {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            blocks: core::array::from_fn(|_| PlannerBlock::default()),
            current_index: AtomicUsize::new(0),
            schedule_index: AtomicUsize::new(0),
            write_index: AtomicUsize::new(0),
            busy_index: AtomicUsize::new(NO_BUSY_BLOCK),
        }
    }

    /// Whether no unexecuted blocks remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.write() == self.current()
    }

    /// Whether all slots hold unexecuted blocks.
    #[inline]
    pub fn full(&self) -> bool {
        (self.write() + 1) % CAP == self.current()
    }

    /// Number of blocks between the executing front and the write cursor.
    #[inline]
    pub fn len(&self) -> usize {
        (self.write() + CAP - self.current()) % CAP
    }

    /// Index one before the write cursor: the newest written block.
    #[inline]
    pub fn last_write_index(&self) -> usize {
        (self.write() + CAP - 1) % CAP
    }

    #[inline]
    pub(crate) fn current(&self) -> usize {
        self.current_index.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn schedule(&self) -> usize {
        self.schedule_index.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn write(&self) -> usize {
        self.write_index.load(Ordering::Acquire)
    }

    /// Shared view of a block slot.
    #[inline]
    pub fn block(&self, index: usize) -> &PlannerBlock {
        &self.blocks[index % CAP]
    }

    #[inline]
    pub(crate) fn block_mut(&mut self, index: usize) -> &mut PlannerBlock {
        &mut self.blocks[index % CAP]
    }

    /// Wait for a free slot and return it for population.
    ///
    /// Spins while the ring is full; in a deployed controller the step
    /// generator retires blocks out-of-band and frees a slot.
    pub(crate) fn grab_write_slot(&mut self) -> &mut PlannerBlock {
        while self.full() {
            spin_loop();
        }
        let index = self.write_index.load(Ordering::Relaxed);
        &mut self.blocks[index]
    }

    /// Publish the slot returned by [`Self::grab_write_slot`].
    ///
    /// The release store orders every payload write before the cursor
    /// advance the consumer acquires.
    pub(crate) fn commit_write(&self) {
        let index = self.write_index.load(Ordering::Relaxed);
        self.write_index.store((index + 1) % CAP, Ordering::Release);
    }

    /// Whether the consumer has begun executing the block at `index`.
    #[inline]
    pub fn is_block_busy(&self, index: usize) -> bool {
        self.busy_index.load(Ordering::Acquire) == index
    }

    /// Consumer side: claim the next block for execution.
    ///
    /// Publishes the busy cursor and advances `schedule_index`. Returns
    /// `None` when no block is ready or the front block is still being
    /// recalculated; the step generator simply retries on its next tick.
    pub fn claim_next(&self) -> Option<usize> {
        let schedule = self.schedule_index.load(Ordering::Relaxed);
        if schedule == self.write() {
            return None;
        }
        if self.blocks[schedule].flags.recalculate() {
            return None;
        }
        self.busy_index.store(schedule, Ordering::Release);
        self.schedule_index
            .store((schedule + 1) % CAP, Ordering::Release);
        Some(schedule)
    }

    /// Consumer side: retire the oldest claimed block.
    ///
    /// Clears the busy cursor when it points at the retired block and
    /// advances `current_index`. Returns `false` when there is no claimed
    /// block to retire.
    pub fn retire_front(&self) -> bool {
        let current = self.current_index.load(Ordering::Relaxed);
        if current == self.schedule_index.load(Ordering::Relaxed) {
            return false;
        }
        if self.busy_index.load(Ordering::Relaxed) == current {
            self.busy_index.store(NO_BUSY_BLOCK, Ordering::Release);
        }
        self.current_index.store((current + 1) % CAP, Ordering::Release);
        true
    }
}

impl<const CAP: usize> Default for PlannerBuffer<CAP> {
    fn default() -> Self {
        Self::new()
    }
}
