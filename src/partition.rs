//! In-place construction of an implicit, balanced 2D k-d tree.
//!
//! The tree has no nodes. After partitioning, the entry at the median of a
//! range `[begin, end)` is that range's node, `[begin, median)` and
//! `[median + 1, end)` are its subtrees, and the split axis is given by the
//! depth of the range. Everything on the low side of a median is `<=` the
//! median on the split axis and everything on the high side is `>=` it.
//! Ties may land on either side.

use crate::error::Result;
use crate::scratch::{has_pending, seed_queues, split_queues, try_push, RangeQueues};
use crate::types::{Axis, Entry};

/// Reorders `entries` in place into implicit k-d tree order.
///
/// Ranges are processed level by level without recursion, using `queues` as
/// double-buffered work-lists. Each range is split with a selection rather
/// than a sort, so every level costs linear time on average.
///
/// Fewer than two entries are already in tree order.
///
/// # Errors
/// Returns [`KdError::OutOfMemory`](crate::KdError::OutOfMemory) if a
/// work-list cannot grow. The entries are then partially reordered but still
/// a permutation of the input.
///
/// # Example
/// ```
/// use kdbox::{build_in_place, Entry, Point};
///
/// let mut entries = Entry::from_points(&[
///     Point::new(5, 1),
///     Point::new(1, 9),
///     Point::new(3, 3),
/// ]);
/// let mut queues = Default::default();
/// build_in_place(&mut entries, &mut queues).unwrap();
///
/// // The root splits on X: the median X value sits in the middle.
/// assert_eq!(entries[1].point.x, 3);
/// ```
pub fn build_in_place(entries: &mut [Entry], queues: &mut RangeQueues) -> Result<()> {
    let count = entries.len();
    if count < 2 {
        return Ok(());
    }

    seed_queues(queues, count)?;

    let mut depth = 0_usize;
    while has_pending(queues) {
        let axis = Axis::from_depth(depth);
        let (current, next) = split_queues(queues, axis);

        while let Some(range) = current.pop() {
            if range.len() <= 1 {
                continue;
            }

            let median = range.median();
            let _ = entries[range.begin..range.end]
                .select_nth_unstable_by_key(median - range.begin, |entry| entry.point.coord(axis));

            try_push(next, range.lower())?;
            if let Some(upper) = range.upper() {
                try_push(next, upper)?;
            }
        }

        depth += 1;
    }

    log::trace!("partitioned {count} entries over {depth} levels");
    Ok(())
}

/// Checks the k-d ordering invariant of every range of a partitioned array.
///
/// Returns the first range, as `(begin, end)`, whose median is out of order
/// with one of its descendants.
#[must_use]
pub fn find_misordered_range(entries: &[Entry]) -> Option<(usize, usize)> {
    let mut stack = vec![(0_usize, entries.len(), 0_usize)];
    while let Some((begin, end, depth)) = stack.pop() {
        if end - begin <= 1 {
            continue;
        }
        let axis = Axis::from_depth(depth);
        let median = begin + (end - begin) / 2;
        let pivot = entries[median].point.coord(axis);

        let low_ok = entries[begin..median].iter().all(|e| e.point.coord(axis) <= pivot);
        let high_ok = entries[median + 1..end].iter().all(|e| e.point.coord(axis) >= pivot);
        if !(low_ok && high_ok) {
            return Some((begin, end));
        }

        stack.push((begin, median, depth + 1));
        stack.push((median + 1, end, depth + 1));
    }
    None
}
