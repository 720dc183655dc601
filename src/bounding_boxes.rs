//! Approximate Voronoi cells as axis-aligned rectangles.
//!
//! Every entry gets one rectangle, written at its `box_index`:
//!
//! 1. Seed: a rectangle centered on the entry reaching halfway to its
//!    nearest neighbor.
//! 2. Square off: the shorter side grows toward the longer one, stopping at
//!    rectangles of neighbors that sit edge to edge with it.
//! 3. Clamp: every rectangle is confined to the caller's global bound.

use crate::config::SearchConfig;
use crate::error::{KdError, Result};
use crate::partition::build_in_place;
use crate::scratch::Scratch;
use crate::search::{find_nearest_neighbor, find_neighbors_within_radius};
use crate::types::{Axis, Entry, Point, Rect};

/// Partitions `entries` and writes one rectangle per entry into `results`,
/// indexed by each entry's `box_index`.
///
/// `results` is resized to `entries.len()`. Every rectangle lies within
/// `bound`. With zero or one entry no neighbor exists and each rectangle is
/// the clamped infinite rectangle, i.e. `bound` itself.
///
/// `box_index` values are expected to be a permutation of
/// `0..entries.len()`; if two entries share one, the later entry in tree
/// order wins.
///
/// # Errors
/// - [`KdError::IndexOutOfBounds`] if a `box_index` is not below
///   `entries.len()`.
/// - [`KdError::OutOfMemory`] if scratch or output memory cannot grow.
///
/// On error `results` is left empty.
///
/// # Example
/// ```
/// use kdbox::{generate_bounding_boxes, Entry, Point, Rect, Scratch, SearchConfig};
///
/// let mut entries = Entry::from_points(&[Point::new(0, 0), Point::new(10, 0), Point::new(0, 10)]);
/// let mut scratch = Scratch::new();
/// let mut boxes = Vec::new();
/// generate_bounding_boxes(
///     &mut entries,
///     &Rect::new(-100, -100, 100, 100),
///     &mut scratch,
///     &SearchConfig::default(),
///     &mut boxes,
/// )
/// .unwrap();
///
/// assert_eq!(boxes[0], Rect::new(-5, -5, 5, 5));
/// ```
pub fn generate_bounding_boxes(
    entries: &mut [Entry],
    bound: &Rect,
    scratch: &mut Scratch,
    config: &SearchConfig,
    results: &mut Vec<Rect>,
) -> Result<()> {
    results.clear();
    let outcome = fill_bounding_boxes(entries, bound, scratch, config, results);
    if outcome.is_err() {
        results.clear();
    }
    outcome
}

/// Convenience form of [`generate_bounding_boxes`] that allocates its own
/// scratch and output and uses the default configuration.
///
/// # Errors
/// Same as [`generate_bounding_boxes`].
///
/// # Example
/// ```
/// use kdbox::{build_and_box, Entry, Point, Rect};
///
/// let bound = Rect::new(0, 0, 500, 300);
/// let mut entries = Entry::from_points(&[Point::new(120, 40)]);
/// let boxes = build_and_box(&mut entries, &bound).unwrap();
/// assert_eq!(boxes, vec![bound]);
/// ```
pub fn build_and_box(entries: &mut [Entry], bound: &Rect) -> Result<Vec<Rect>> {
    let mut scratch = Scratch::with_capacity(entries.len())?;
    let mut results = Vec::new();
    generate_bounding_boxes(entries, bound, &mut scratch, &SearchConfig::default(), &mut results)?;
    Ok(results)
}

fn fill_bounding_boxes(
    entries: &mut [Entry],
    bound: &Rect,
    scratch: &mut Scratch,
    config: &SearchConfig,
    results: &mut Vec<Rect>,
) -> Result<()> {
    let count = entries.len();
    log::debug!("generating {count} bounding boxes within {bound:?}");

    if let Some(entry) = entries.iter().find(|e| e.box_index >= count) {
        return Err(KdError::IndexOutOfBounds {
            index: entry.box_index,
            len: count,
        });
    }

    results.try_reserve_exact(count)?;
    results.resize(count, Rect::INFINITE);

    if count > 1 {
        scratch.reserve(count)?;
        build_in_place(entries, &mut scratch.queues)?;
        seed_from_nearest(entries, scratch, config, results)?;
        log::trace!("seeded {count} boxes from nearest neighbors");
        square_off(entries, scratch, config, results)?;
        log::trace!("squared off {count} boxes");
    }

    for rect in results.iter_mut() {
        *rect = rect.clamp_to(bound);
    }

    Ok(())
}

/// Half extents reaching halfway to `neighbor`.
///
/// Coincident points get a unit square. A neighbor straight along one axis
/// gets a square instead of a zero-width sliver.
fn seed_half_extents(point: Point, neighbor: Point) -> (i64, i64) {
    let dx = i64::from(point.x.abs_diff(neighbor.x) / 2);
    let dy = i64::from(point.y.abs_diff(neighbor.y) / 2);

    match (dx, dy) {
        (0, 0) => (1, 1),
        (0, _) | (_, 0) => (dx + dy, dx + dy),
        _ => (dx, dy),
    }
}

/// Pass 1: seed every rectangle from the entry's nearest neighbor.
fn seed_from_nearest(
    entries: &[Entry],
    scratch: &mut Scratch,
    config: &SearchConfig,
    results: &mut [Rect],
) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        let nearest = find_nearest_neighbor(index, entries, &mut scratch.queues, config)?;
        let (half_width, half_height) = seed_half_extents(entry.point, entries[nearest].point);
        results[entry.box_index] = Rect::centered(entry.point, half_width, half_height);
    }
    Ok(())
}

/// Returns whether `neighbor` sits against `rect` across `axis`.
///
/// `axis` is the axis being widened; the test looks at the perpendicular
/// edges: the neighbor's high edge must meet this rectangle's low edge. The
/// two-sided comparison only holds on exact equality, so rectangles that
/// overlap on the perpendicular axis without touching exactly are not
/// treated as obstacles.
#[inline]
fn abuts(rect: &Rect, neighbor: &Rect, axis: Axis) -> bool {
    let across = axis.other();
    rect.low(across) <= neighbor.high(across) && neighbor.high(across) <= rect.low(across)
}

/// Pass 2: widen each rectangle's shorter side toward a square.
fn square_off(
    entries: &[Entry],
    scratch: &mut Scratch,
    config: &SearchConfig,
    results: &mut [Rect],
) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        let rect = results[entry.box_index];
        let (width, height) = (rect.width(), rect.height());

        let (axis, longer) = match width.cmp(&height) {
            std::cmp::Ordering::Less => (Axis::X, height),
            std::cmp::Ordering::Greater => (Axis::Y, width),
            std::cmp::Ordering::Equal => continue,
        };

        let reach = u64::try_from(longer.saturating_mul(2)).unwrap_or(0);
        let radius_squared = reach.saturating_mul(reach);
        find_neighbors_within_radius(
            index,
            radius_squared,
            entries,
            &mut scratch.queues,
            config,
            &mut scratch.neighbors,
        )?;

        let center = entry.point.coord(axis);
        let mut low_collision = i32::MIN;
        let mut high_collision = i32::MAX;
        for &neighbor_index in &scratch.neighbors {
            let neighbor = entries[neighbor_index];
            let neighbor_rect = &results[neighbor.box_index];
            if !abuts(&rect, neighbor_rect, axis) {
                continue;
            }
            if neighbor.point.coord(axis) < center {
                low_collision = low_collision.max(neighbor_rect.high(axis));
            } else {
                high_collision = high_collision.min(neighbor_rect.low(axis));
            }
        }

        let center = i64::from(center);
        let closest_collision =
            (center - i64::from(low_collision)).min(i64::from(high_collision) - center);
        let half_extent = closest_collision.min(longer / 2).max(0);

        results[entry.box_index].set_span(axis, entry.point.coord(axis), half_extent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes_for(points: &[Point], bound: &Rect) -> Vec<Rect> {
        let mut entries = Entry::from_points(points);
        build_and_box(&mut entries, bound).unwrap()
    }

    #[test]
    fn test_seed_half_extents_policy() {
        let p = Point::new(0, 0);
        assert_eq!(seed_half_extents(p, Point::new(0, 0)), (1, 1), "coincident");
        assert_eq!(seed_half_extents(p, Point::new(1, 1)), (1, 1), "halves round to zero");
        assert_eq!(seed_half_extents(p, Point::new(10, 0)), (5, 5), "straight along X");
        assert_eq!(seed_half_extents(p, Point::new(0, -7)), (3, 3), "straight along Y");
        assert_eq!(seed_half_extents(p, Point::new(9, 1)), (4, 4), "Y half rounds to zero");
        assert_eq!(seed_half_extents(p, Point::new(-8, 20)), (4, 10), "rectangle");
    }

    #[test]
    fn test_seed_half_extents_extreme_coordinates() {
        let (dx, dy) = seed_half_extents(Point::new(i32::MIN, 0), Point::new(i32::MAX, 0));
        assert_eq!(dx, i64::from(i32::MAX));
        assert_eq!(dx, dy);
    }

    #[test]
    fn test_abuts_requires_exact_edge_contact() {
        let rect = Rect::new(0, 10, 4, 30);
        // Neighbor's bottom edge meets this top edge exactly.
        assert!(abuts(&rect, &Rect::new(-20, -10, -2, 10), Axis::X));
        // Overlapping on Y but not touching exactly: ignored.
        assert!(!abuts(&rect, &Rect::new(-20, 0, -2, 20), Axis::X));
        assert!(!abuts(&rect, &Rect::new(-20, 0, -2, 9), Axis::X));

        let wide = Rect::new(10, 0, 40, 4);
        assert!(abuts(&wide, &Rect::new(-10, 5, 10, 8), Axis::Y));
        assert!(!abuts(&wide, &Rect::new(-10, 5, 11, 8), Axis::Y));
    }

    #[test]
    fn test_empty_input() {
        assert!(boxes_for(&[], &Rect::new(0, 0, 10, 10)).is_empty());
    }

    #[test]
    fn test_single_entry_equals_bound() {
        let bound = Rect::new(-3, 4, 50, 60);
        assert_eq!(boxes_for(&[Point::new(7, 9)], &bound), vec![bound]);
    }

    #[test]
    fn test_coincident_pair_gets_unit_boxes() {
        let boxes = boxes_for(&[Point::new(10, 10), Point::new(10, 10)], &Rect::new(0, 0, 100, 100));
        assert_eq!(boxes, vec![Rect::new(9, 9, 11, 11); 2]);
    }

    #[test]
    fn test_three_point_scenario() {
        let bound = Rect::new(-100, -100, 100, 100);
        let boxes = boxes_for(&[Point::new(0, 0), Point::new(10, 0), Point::new(0, 10)], &bound);
        assert_eq!(boxes[0], Rect::new(-5, -5, 5, 5));
        assert_eq!(boxes[1], Rect::new(5, -5, 15, 5));
        assert_eq!(boxes[2], Rect::new(-5, 5, 5, 15));
    }

    #[test]
    fn test_square_off_widens_toward_square() {
        // Diagonal neighbors seed two 4x12 boxes.
        let bound = Rect::new(-1000, -1000, 1000, 1000);
        let boxes = boxes_for(&[Point::new(0, 0), Point::new(4, 12)], &bound);
        assert_eq!(boxes[0], Rect::new(-6, -6, 6, 6));
    }

    #[test]
    fn test_square_off_collision_behind_center_collapses() {
        // After (0, 0) is squared off its bottom edge meets the top edge of
        // (4, 12)'s box exactly, and its right edge lies past x = 4. The
        // collision is behind the center, so the half width floors at zero.
        let bound = Rect::new(-1000, -1000, 1000, 1000);
        let boxes = boxes_for(&[Point::new(0, 0), Point::new(4, 12)], &bound);
        assert_eq!(boxes[1], Rect::new(4, 6, 4, 18));
    }

    #[test]
    fn test_cluster_boxes_stay_valid() {
        let bound = Rect::new(-1000, -1000, 1000, 1000);
        let points = [Point::new(0, 0), Point::new(0, 20), Point::new(5, 20)];
        let boxes = boxes_for(&points, &bound);
        assert_eq!(boxes[0], Rect::new(-10, -10, 10, 10));
        assert_eq!(boxes[1], Rect::new(-2, 18, 2, 22));
        assert_eq!(boxes[2], Rect::new(3, 18, 7, 22));
    }

    #[test]
    fn test_out_of_range_box_index() {
        let mut entries = vec![
            Entry::new(Point::new(0, 0), 0),
            Entry::new(Point::new(1, 1), 5),
        ];
        let mut results = vec![Rect::INFINITE];
        let err = generate_bounding_boxes(
            &mut entries,
            &Rect::new(0, 0, 10, 10),
            &mut Scratch::new(),
            &SearchConfig::default(),
            &mut results,
        )
        .unwrap_err();
        assert_eq!(err, KdError::IndexOutOfBounds { index: 5, len: 2 });
        assert!(results.is_empty(), "no partial output on error");
    }

    #[test]
    fn test_points_outside_bound_still_valid() {
        let bound = Rect::new(0, 0, 10, 10);
        let boxes = boxes_for(&[Point::new(100, 100), Point::new(120, 90), Point::new(-50, 3)], &bound);
        for rect in &boxes {
            assert!(rect.is_valid(), "inverted box {rect:?}");
            assert!(bound.contains_rect(rect));
        }
    }
}
