//! # kdbox - implicit 2D k-d tree and per-point bounding boxes
//!
//! A Rust library that partitions a set of integer 2D points into an
//! implicit, array-resident balanced k-d tree, answers nearest neighbor and
//! radius queries over it without recursion, and uses those queries to give
//! every point an axis-aligned rectangle approximating its Voronoi cell.
//!
//! ## Features
//!
//! - **Implicit Tree**: No nodes, no pointers. Tree structure is index ranges over one flat array
//! - **Allocation Reuse**: Caller-owned scratch buffers are reused across calls
//! - **Branch-and-Bound Queries**: Nearest neighbor and radius search with a tunable linear-scan cutover
//! - **Bounding Box Synthesis**: One non-overlapping (best-effort) rectangle per point, clamped to a global bound
//! - **Overflow Safe**: Integer coordinates only, distances widened and saturated
//!
//! ## Quick Start
//!
//! ```rust
//! use kdbox::prelude::*;
//!
//! // Points in millimeters; box indices follow insertion order.
//! let mut tree = KdTree::new();
//! tree.add(0, 0);
//! tree.add(10, 0);
//! tree.add(0, 10);
//!
//! // Partition into tree order (required before querying)
//! tree.build().unwrap();
//!
//! // Nearest neighbor of whatever ended up at tree position 0
//! let nearest = tree.nearest_neighbor(0).unwrap();
//! assert_ne!(nearest, 0);
//!
//! // One rectangle per point, confined to the device area
//! let mut boxes = Vec::new();
//! tree.bounding_boxes(&Rect::new(-100, -100, 100, 100), &mut boxes).unwrap();
//! assert_eq!(boxes[0], Rect::new(-5, -5, 5, 5));
//! ```
//!
//! ## How It Works
//!
//! Partitioning repeatedly selects the median of a range on the current axis
//! so the low side is `<=` it and the high side `>=` it, then queues both
//! sides for the next depth on the other axis. The median of a range is the
//! node for that range.
//!
//! Queries walk the same ranges. Small ranges are scanned linearly; for larger
//! ones the median is checked and a half is skipped when its distance to the
//! query along the split axis alone is already no better than the bound.
//!
//! Boxes are seeded halfway toward each point's nearest neighbor, then their
//! shorter side is widened toward a square unless a neighbor's box sits
//! against it, and finally everything is clamped into the global bound.

pub mod bounding_boxes;
pub mod config;
pub mod error;
pub mod kdtree;
pub mod partition;
pub mod prelude;
pub mod scratch;
pub mod search;
pub mod selection;
pub mod types;

#[cfg(test)]
mod component_tests;

pub use bounding_boxes::{build_and_box, generate_bounding_boxes};
pub use config::{SearchConfig, DEFAULT_LINEAR_SCAN_THRESHOLD};
pub use error::{KdError, Result};
pub use kdtree::KdTree;
pub use partition::{build_in_place, find_misordered_range};
pub use scratch::{RangeQueues, Scratch};
pub use search::{find_nearest_neighbor, find_neighbors_within_radius, find_parent};
pub use selection::{select_boxes, SelectionLayout};
pub use types::{Axis, Entry, Point, Range, Rect};
