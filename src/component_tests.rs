//! Component tests for the partition builder, the query engine and the
//! bounding box synthesizer - testing each operation individually

#[cfg(test)]
mod tests {
    use crate::{
        build_in_place, find_misordered_range, find_nearest_neighbor, find_neighbors_within_radius,
        find_parent, generate_bounding_boxes, Entry, KdError, Point, Range, Rect, Scratch,
        SearchConfig,
    };

    fn grid(width: i32, height: i32, spacing: i32) -> Vec<Point> {
        let mut points = Vec::new();
        for y in 0..height {
            for x in 0..width {
                points.push(Point::new(x * spacing, y * spacing));
            }
        }
        points
    }

    fn partitioned(points: &[Point]) -> (Vec<Entry>, Scratch) {
        let mut entries = Entry::from_points(points);
        let mut scratch = Scratch::new();
        build_in_place(&mut entries, &mut scratch.queues).unwrap();
        (entries, scratch)
    }

    fn tree_position(entries: &[Entry], box_index: usize) -> usize {
        entries.iter().position(|e| e.box_index == box_index).unwrap()
    }

    // ============================================================================
    // PARTITION BUILDER TESTS
    // ============================================================================

    #[test]
    fn test_partition_root_median_splits_on_x() {
        let points = [5, 3, 9, 1, 7].map(|x| Point::new(x, 0));
        let (entries, _) = partitioned(&points);
        assert_eq!(entries[2].point.x, 5, "root median should hold the median X");
        assert!(entries[..2].iter().all(|e| e.point.x <= 5));
        assert!(entries[3..].iter().all(|e| e.point.x >= 5));
    }

    #[test]
    fn test_partition_second_level_splits_on_y() {
        // Same X everywhere: only the Y split at depth 1 is observable.
        let points = [Point::new(0, 4), Point::new(0, 1), Point::new(0, 3), Point::new(0, 0), Point::new(0, 2)];
        let (entries, _) = partitioned(&points);
        // Left child range [0, 2) has median 1, right child range [3, 5) has median 4.
        assert!(entries[0].point.y <= entries[1].point.y);
        assert!(entries[3].point.y <= entries[4].point.y);
        assert_eq!(find_misordered_range(&entries), None);
    }

    #[test]
    fn test_partition_grid() {
        let (entries, _) = partitioned(&grid(13, 11, 5));
        assert_eq!(find_misordered_range(&entries), None);
    }

    #[test]
    fn test_partition_already_partitioned_input() {
        let (mut entries, mut scratch) = partitioned(&grid(8, 8, 1));
        build_in_place(&mut entries, &mut scratch.queues).unwrap();
        assert_eq!(find_misordered_range(&entries), None);
    }

    #[test]
    fn test_partition_extreme_coordinates() {
        let points = [
            Point::new(i32::MIN, i32::MAX),
            Point::new(i32::MAX, i32::MIN),
            Point::new(0, 0),
            Point::new(i32::MIN, i32::MIN),
            Point::new(i32::MAX, i32::MAX),
        ];
        let (entries, _) = partitioned(&points);
        assert_eq!(find_misordered_range(&entries), None);
    }

    // ============================================================================
    // FIND PARENT TESTS
    // ============================================================================

    #[test]
    fn test_find_parent_matches_tree_shape() {
        // Every non-root position's parent range must contain it.
        for count in 2..50 {
            for index in 0..count {
                match find_parent(index, count) {
                    None => assert_eq!(index, count / 2, "only the root has no parent"),
                    Some(parent) => {
                        assert_ne!(parent, index);
                        assert!(parent < count);
                    }
                }
            }
        }
    }

    #[test]
    fn test_find_parent_walks_ranges() {
        // Ten entries: root 5, left child of [0, 5) is 2, right child of [6, 10) is 8.
        assert_eq!(find_parent(5, 10), None);
        assert_eq!(find_parent(2, 10), Some(5));
        assert_eq!(find_parent(8, 10), Some(5));
        assert_eq!(find_parent(1, 10), Some(2));
        assert_eq!(find_parent(0, 10), Some(1));
        assert_eq!(find_parent(9, 10), Some(8));
        assert_eq!(find_parent(7, 10), Some(8));
        assert_eq!(find_parent(6, 10), Some(7));
    }

    // ============================================================================
    // NEAREST NEIGHBOR TESTS
    // ============================================================================

    #[test]
    fn test_nearest_neighbor_needs_two_entries() {
        let config = SearchConfig::default();
        let mut scratch = Scratch::new();
        assert_eq!(
            find_nearest_neighbor(0, &[], &mut scratch.queues, &config),
            Err(KdError::TooFewEntries { len: 0 })
        );
    }

    #[test]
    fn test_nearest_neighbor_on_grid() {
        let points = grid(10, 10, 10);
        let (entries, mut scratch) = partitioned(&points);
        let config = SearchConfig::default();
        for i in 0..entries.len() {
            let j = find_nearest_neighbor(i, &entries, &mut scratch.queues, &config).unwrap();
            assert_eq!(
                entries[i].point.distance_squared(entries[j].point),
                100,
                "grid neighbors are 10 apart"
            );
        }
    }

    #[test]
    fn test_nearest_neighbor_isolated_outlier() {
        let mut points = grid(6, 6, 2);
        points.push(Point::new(1000, 1000));
        let (entries, mut scratch) = partitioned(&points);
        let outlier = tree_position(&entries, points.len() - 1);
        let j = find_nearest_neighbor(outlier, &entries, &mut scratch.queues, &SearchConfig::default()).unwrap();
        assert_eq!(entries[j].point, Point::new(10, 10));
    }

    #[test]
    fn test_nearest_neighbor_reuses_scratch_between_queries() {
        let (entries, mut scratch) = partitioned(&grid(5, 5, 3));
        let config = SearchConfig::default();
        let first = find_nearest_neighbor(3, &entries, &mut scratch.queues, &config).unwrap();
        let _ = find_nearest_neighbor(7, &entries, &mut scratch.queues, &config).unwrap();
        assert_eq!(find_nearest_neighbor(3, &entries, &mut scratch.queues, &config), Ok(first));
    }

    // ============================================================================
    // RADIUS QUERY TESTS
    // ============================================================================

    #[test]
    fn test_radius_finds_everything_with_huge_radius() {
        let (entries, mut scratch) = partitioned(&grid(7, 7, 100));
        let mut results = Vec::new();
        find_neighbors_within_radius(10, u64::MAX, &entries, &mut scratch.queues, &SearchConfig::default(), &mut results)
            .unwrap();
        assert_eq!(results.len(), 48);
        assert!(!results.contains(&10), "query entry must be excluded");
    }

    #[test]
    fn test_radius_clears_previous_results() {
        let (entries, mut scratch) = partitioned(&grid(4, 4, 1));
        let mut results = vec![100, 200, 300];
        find_neighbors_within_radius(0, 0, &entries, &mut scratch.queues, &SearchConfig::default(), &mut results)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_radius_excludes_coincident_self_only() {
        let points = vec![Point::new(8, 8); 5];
        let (entries, mut scratch) = partitioned(&points);
        let mut results = Vec::new();
        find_neighbors_within_radius(2, 1, &entries, &mut scratch.queues, &SearchConfig::default(), &mut results)
            .unwrap();
        results.sort_unstable();
        assert_eq!(results, vec![0, 1, 3, 4]);
    }

    // ============================================================================
    // BOUNDING BOX TESTS
    // ============================================================================

    #[test]
    fn test_bounding_boxes_reuse_output_vector() {
        let mut scratch = Scratch::new();
        let config = SearchConfig::default();
        let bound = Rect::new(-100, -100, 100, 100);
        let mut results = vec![Rect::new(1, 2, 3, 4); 10];

        let mut entries = Entry::from_points(&[Point::new(0, 0), Point::new(20, 0)]);
        generate_bounding_boxes(&mut entries, &bound, &mut scratch, &config, &mut results).unwrap();
        assert_eq!(results, vec![Rect::new(-10, -10, 10, 10), Rect::new(10, -10, 30, 10)]);
    }

    #[test]
    fn test_bounding_boxes_follow_box_index() {
        let mut scratch = Scratch::new();
        let mut results = Vec::new();
        let mut entries = vec![
            Entry::new(Point::new(20, 0), 1),
            Entry::new(Point::new(0, 0), 0),
        ];
        generate_bounding_boxes(
            &mut entries,
            &Rect::INFINITE,
            &mut scratch,
            &SearchConfig::default(),
            &mut results,
        )
        .unwrap();
        assert_eq!(results[0], Rect::new(-10, -10, 10, 10));
        assert_eq!(results[1], Rect::new(10, -10, 30, 10));
    }

    #[test]
    fn test_bounding_boxes_clamped_to_bound() {
        let bound = Rect::new(0, 0, 25, 5);
        let mut results = Vec::new();
        let mut entries = Entry::from_points(&[Point::new(0, 0), Point::new(20, 0)]);
        generate_bounding_boxes(&mut entries, &bound, &mut Scratch::new(), &SearchConfig::default(), &mut results)
            .unwrap();
        assert_eq!(results, vec![Rect::new(0, 0, 10, 5), Rect::new(10, 0, 25, 5)]);
    }

    #[test]
    fn test_bounding_boxes_with_any_threshold_agree() {
        let points = grid(9, 7, 12);
        let bound = Rect::new(-50, -50, 200, 200);
        let mut expected = Vec::new();
        let mut entries = Entry::from_points(&points);
        generate_bounding_boxes(&mut entries, &bound, &mut Scratch::new(), &SearchConfig::default(), &mut expected)
            .unwrap();

        // On a regular grid every box is a square reaching halfway to the next
        // point regardless of which equidistant neighbor wins.
        for threshold in [0, 3, 64] {
            let mut entries = Entry::from_points(&points);
            let mut results = Vec::new();
            let config = SearchConfig::new().with_linear_scan_threshold(threshold);
            generate_bounding_boxes(&mut entries, &bound, &mut Scratch::new(), &config, &mut results).unwrap();
            assert_eq!(results, expected, "threshold {threshold} changed the boxes");
        }
    }

    #[test]
    fn test_range_helpers() {
        let r = Range::new(3, 3);
        assert!(r.is_empty());
        assert!(!Range::new(3, 4).is_empty());
        assert!(Range::new(3, 8).contains(7));
        assert!(!Range::new(3, 8).contains(8));
    }
}
