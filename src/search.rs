//! Branch-and-bound queries over a partitioned entry array.
//!
//! Both queries walk the implicit tree level by level with the same
//! double-buffered work-lists the partition builder uses. Small ranges are
//! scanned linearly; larger ones are split at their median and a half is
//! skipped when its distance to the query along the split axis alone cannot
//! beat the current bound.
//!
//! The queries differ only in what they do with a candidate and where the
//! bound comes from, which is captured by [`SearchVisitor`].

use crate::config::SearchConfig;
use crate::error::{KdError, Result};
use crate::scratch::{has_pending, seed_queues, split_queues, try_push, RangeQueues};
use crate::types::{Axis, Entry, Point};

/// Decides what happens to candidates found by [`traverse`].
pub(crate) trait SearchVisitor {
    /// Squared distance a half must be closer than to be explored.
    fn bound(&self) -> u64;

    /// Called for every entry other than the query entry that the traversal
    /// reaches.
    fn visit(&mut self, index: usize, distance_squared: u64) -> Result<()>;
}

/// Tracks the closest candidate seen so far.
#[derive(Debug)]
struct Nearest {
    index: usize,
    distance_squared: u64,
}

impl SearchVisitor for Nearest {
    #[inline]
    fn bound(&self) -> u64 {
        self.distance_squared
    }

    #[inline]
    fn visit(&mut self, index: usize, distance_squared: u64) -> Result<()> {
        if distance_squared < self.distance_squared {
            self.distance_squared = distance_squared;
            self.index = index;
        }
        Ok(())
    }
}

/// Collects every candidate strictly inside a fixed radius.
#[derive(Debug)]
struct WithinRadius<'a> {
    radius_squared: u64,
    results: &'a mut Vec<usize>,
}

impl SearchVisitor for WithinRadius<'_> {
    #[inline]
    fn bound(&self) -> u64 {
        self.radius_squared
    }

    #[inline]
    fn visit(&mut self, index: usize, distance_squared: u64) -> Result<()> {
        if distance_squared < self.radius_squared {
            try_push(self.results, index)?;
        }
        Ok(())
    }
}

/// Finds the implicit parent of `index` in a tree of `count` entries.
///
/// Re-walks the median bisection from the full range down to the range whose
/// median is `index`, returning the last median passed on the way. Returns
/// `None` for the root, and for an `index` that is never a median (only
/// possible when `index >= count`).
///
/// # Example
/// ```
/// use kdbox::find_parent;
///
/// // Seven entries: root 3, children 1 and 5, leaves 0, 2, 4, 6.
/// assert_eq!(find_parent(3, 7), None);
/// assert_eq!(find_parent(1, 7), Some(3));
/// assert_eq!(find_parent(6, 7), Some(5));
/// ```
#[must_use]
pub fn find_parent(index: usize, count: usize) -> Option<usize> {
    let mut parent = None;
    let (mut begin, mut end) = (0, count);

    while begin < end {
        let median = begin + (end - begin) / 2;
        if median == index {
            return parent;
        }
        if index < median {
            end = median;
        } else {
            begin = median + 1;
        }
        parent = Some(median);
    }

    None
}

/// Cheap first guess for the nearest neighbor of `index`: its parent, or the
/// root's left child when `index` is the root.
fn initial_guess(index: usize, count: usize) -> usize {
    let root = count / 2;
    if index == root {
        return root / 2;
    }
    find_parent(index, count).unwrap_or(root / 2)
}

fn check_query(entries: &[Entry], index: usize) -> Result<()> {
    let len = entries.len();
    if len < 2 {
        return Err(KdError::TooFewEntries { len });
    }
    if index >= len {
        return Err(KdError::IndexOutOfBounds { index, len });
    }
    Ok(())
}

/// Shared traversal of both queries.
fn traverse<V: SearchVisitor>(
    entries: &[Entry],
    index: usize,
    queues: &mut RangeQueues,
    config: &SearchConfig,
    visitor: &mut V,
) -> Result<()> {
    let query = entries[index].point;

    seed_queues(queues, entries.len())?;

    let mut depth = 0_usize;
    while has_pending(queues) {
        let axis = Axis::from_depth(depth);
        let (current, next) = split_queues(queues, axis);

        while let Some(range) = current.pop() {
            if config.scans_linearly(range.len()) {
                for (offset, entry) in entries[range.begin..range.end].iter().enumerate() {
                    let candidate = range.begin + offset;
                    if candidate != index {
                        visitor.visit(candidate, query.distance_squared(entry.point))?;
                    }
                }
                continue;
            }

            if range.len() <= 1 {
                // A lone median with the scan disabled.
                if range.begin != index {
                    visitor.visit(range.begin, query.distance_squared(entries[range.begin].point))?;
                }
                continue;
            }

            let median = range.median();
            if median == index {
                // Nothing to compare against; both halves stay candidates.
                try_push(next, range.lower())?;
                if let Some(upper) = range.upper() {
                    try_push(next, upper)?;
                }
                continue;
            }

            let pivot = entries[median].point;
            visitor.visit(median, query.distance_squared(pivot))?;

            let (near_low, skip_far) = descend(query, pivot, axis, visitor.bound());
            if near_low {
                try_push(next, range.lower())?;
                if !skip_far {
                    if let Some(upper) = range.upper() {
                        try_push(next, upper)?;
                    }
                }
            } else {
                if !skip_far {
                    try_push(next, range.lower())?;
                }
                if let Some(upper) = range.upper() {
                    try_push(next, upper)?;
                }
            }
        }

        depth += 1;
    }

    Ok(())
}

/// Returns `(query is on the low side, far side can be pruned)`.
///
/// The low side is always explored when the median is not strictly below the
/// query. The far side is pruned when the axis-only distance to the median is
/// not smaller than `bound`, as nothing beyond the median can be closer.
#[inline]
fn descend(query: Point, pivot: Point, axis: Axis, bound: u64) -> (bool, bool) {
    let near_low = pivot.coord(axis) >= query.coord(axis);
    let skip_far = query.axis_distance_squared(pivot, axis) >= bound;
    (near_low, skip_far)
}

/// Finds the entry closest to `entries[index]`, excluding `index` itself.
///
/// `entries` must already be in tree order (see
/// [`build_in_place`](crate::build_in_place)). Distances are squared
/// Euclidean. Among equally close entries the first one reached by the
/// traversal wins.
///
/// # Errors
/// - [`KdError::TooFewEntries`] with fewer than two entries.
/// - [`KdError::IndexOutOfBounds`] if `index` is not a valid position.
/// - [`KdError::OutOfMemory`] if a work-list cannot grow.
///
/// # Example
/// ```
/// use kdbox::{build_in_place, find_nearest_neighbor, Entry, Point, Scratch, SearchConfig};
///
/// let mut entries = Entry::from_points(&[Point::new(0, 0), Point::new(10, 0), Point::new(3, 1)]);
/// let mut scratch = Scratch::new();
/// build_in_place(&mut entries, &mut scratch.queues).unwrap();
///
/// let origin = entries.iter().position(|e| e.point == Point::new(0, 0)).unwrap();
/// let nearest = find_nearest_neighbor(origin, &entries, &mut scratch.queues, &SearchConfig::default()).unwrap();
/// assert_eq!(entries[nearest].point, Point::new(3, 1));
/// ```
pub fn find_nearest_neighbor(
    index: usize,
    entries: &[Entry],
    queues: &mut RangeQueues,
    config: &SearchConfig,
) -> Result<usize> {
    check_query(entries, index)?;

    let guess = initial_guess(index, entries.len());
    let mut nearest = Nearest {
        index: guess,
        distance_squared: entries[index].point.distance_squared(entries[guess].point),
    };

    traverse(entries, index, queues, config, &mut nearest)?;
    Ok(nearest.index)
}

/// Collects every entry strictly closer than `radius_squared` to
/// `entries[index]`, excluding `index` itself.
///
/// `results` is cleared first and filled in traversal order, not by distance.
/// A zero radius finds nothing.
///
/// # Errors
/// - [`KdError::TooFewEntries`] with fewer than two entries.
/// - [`KdError::IndexOutOfBounds`] if `index` is not a valid position.
/// - [`KdError::OutOfMemory`] if a work-list or `results` cannot grow.
///   `results` is left empty.
///
/// # Example
/// ```
/// use kdbox::{build_in_place, find_neighbors_within_radius, Entry, Point, Scratch, SearchConfig};
///
/// let mut entries = Entry::from_points(&[Point::new(0, 0), Point::new(3, 4), Point::new(10, 10)]);
/// let mut scratch = Scratch::new();
/// build_in_place(&mut entries, &mut scratch.queues).unwrap();
///
/// let origin = entries.iter().position(|e| e.point == Point::new(0, 0)).unwrap();
/// let mut found = Vec::new();
/// find_neighbors_within_radius(origin, 26, &entries, &mut scratch.queues, &SearchConfig::default(), &mut found).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(entries[found[0]].point, Point::new(3, 4));
/// ```
pub fn find_neighbors_within_radius(
    index: usize,
    radius_squared: u64,
    entries: &[Entry],
    queues: &mut RangeQueues,
    config: &SearchConfig,
    results: &mut Vec<usize>,
) -> Result<()> {
    results.clear();
    check_query(entries, index)?;

    let mut within = WithinRadius {
        radius_squared,
        results,
    };
    let outcome = traverse(entries, index, queues, config, &mut within);
    if outcome.is_err() {
        results.clear();
    }
    outcome
}
