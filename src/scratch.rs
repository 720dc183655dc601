//! Reusable scratch memory for partitioning and queries.
//!
//! Two range work-lists are double-buffered by tree depth: the list for the
//! current axis is drained while children are pushed onto the list for the
//! other axis. Growing these buffers is the only allocation the core makes.

use std::collections::TryReserveError;

use crate::error::Result;
use crate::types::{Axis, Range};

/// Work-lists for one depth-alternating traversal.
pub type RangeQueues = [Vec<Range>; 2];

/// Caller-owned buffers reused across calls.
///
/// A `Scratch` must not be shared between simultaneous calls.
#[derive(Clone, Debug, Default)]
pub struct Scratch {
    /// Range work-lists, slot 0 splits on X and slot 1 on Y
    pub queues: RangeQueues,
    /// Output of radius queries made by the bounding box synthesizer
    pub neighbors: Vec<usize>,
}

impl Scratch {
    /// Creates empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates scratch buffers sized for `count` entries.
    ///
    /// # Errors
    /// Returns [`KdError::OutOfMemory`](crate::KdError::OutOfMemory) if the
    /// buffers cannot be reserved.
    pub fn with_capacity(count: usize) -> Result<Self> {
        let mut scratch = Self::new();
        scratch.reserve(count)?;
        Ok(scratch)
    }

    /// Makes sure every buffer can hold `count` items without growing.
    ///
    /// # Errors
    /// Returns [`KdError::OutOfMemory`](crate::KdError::OutOfMemory) if the
    /// buffers cannot be reserved.
    pub fn reserve(&mut self, count: usize) -> Result<()> {
        for queue in &mut self.queues {
            queue.clear();
            queue.try_reserve(count)?;
        }
        self.neighbors.clear();
        self.neighbors.try_reserve(count)?;
        Ok(())
    }
}

/// Appends to `vec`, reporting allocation failure instead of aborting.
#[inline]
pub(crate) fn try_push<T>(vec: &mut Vec<T>, value: T) -> std::result::Result<(), TryReserveError> {
    if vec.len() == vec.capacity() {
        vec.try_reserve(1)?;
    }
    vec.push(value);
    Ok(())
}

/// Splits the work-lists into (list for `axis`, list for the other axis).
#[inline]
pub(crate) fn split_queues(queues: &mut RangeQueues, axis: Axis) -> (&mut Vec<Range>, &mut Vec<Range>) {
    let [x_queue, y_queue] = queues;
    match axis {
        Axis::X => (x_queue, y_queue),
        Axis::Y => (y_queue, x_queue),
    }
}

/// Empties both work-lists and seeds the X list with `[0, count)`.
pub(crate) fn seed_queues(queues: &mut RangeQueues, count: usize) -> std::result::Result<(), TryReserveError> {
    for queue in queues.iter_mut() {
        queue.clear();
    }
    try_push(&mut queues[Axis::X.queue_slot()], Range::new(0, count))
}

/// Returns whether either work-list still has ranges to process.
#[inline]
pub(crate) fn has_pending(queues: &RangeQueues) -> bool {
    queues.iter().any(|queue| !queue.is_empty())
}
