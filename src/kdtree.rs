//! Owning k-d tree: collects points, partitions them once and answers
//! queries with its own scratch memory.

use crate::bounding_boxes::generate_bounding_boxes;
use crate::config::SearchConfig;
use crate::error::{KdError, Result};
use crate::partition::build_in_place;
use crate::scratch::Scratch;
use crate::search::{find_nearest_neighbor, find_neighbors_within_radius};
use crate::types::{Entry, Point, Rect};

/// Implicit 2D k-d tree over `i32` points.
///
/// Points are stored in a flat array that [`build`](Self::build) reorders in
/// place; there are no node allocations. Query indices refer to positions in
/// that reordered array, use [`entries`](Self::entries) to map them back to a
/// point and its box index.
///
/// # Example
/// ```
/// use kdbox::{KdTree, Rect};
///
/// let mut tree = KdTree::with_capacity(3);
/// tree.add(0, 0);    // box 0
/// tree.add(10, 0);   // box 1
/// tree.add(0, 10);   // box 2
/// tree.build().unwrap();
///
/// let mut boxes = Vec::new();
/// tree.bounding_boxes(&Rect::new(-100, -100, 100, 100), &mut boxes).unwrap();
/// assert_eq!(boxes[1], Rect::new(5, -5, 15, 5));
/// ```
#[derive(Clone, Debug, Default)]
pub struct KdTree {
    /// Entries, in tree order once built
    entries: Vec<Entry>,
    /// Work-lists and neighbor buffer reused by every query
    scratch: Scratch,
    /// Query tuning
    config: SearchConfig,
    /// Whether `entries` is in tree order
    built: bool,
}

impl KdTree {
    /// Creates an empty tree with the default configuration.
    ///
    /// # Example
    /// ```
    /// use kdbox::KdTree;
    /// let tree = KdTree::new();
    /// assert_eq!(tree.len(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with room for `capacity` points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Replaces the query configuration.
    #[must_use]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a point and returns its box index, which is its insertion order.
    ///
    /// The tree must be built again before it is queried.
    pub fn add(&mut self, x: i32, y: i32) -> usize {
        let box_index = self.entries.len();
        self.add_entry(Entry::new(Point::new(x, y), box_index));
        box_index
    }

    /// Adds an entry with a caller-chosen box index.
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.built = false;
    }

    /// Partitions the stored points into tree order.
    ///
    /// Building an already built tree is a no-op.
    ///
    /// # Errors
    /// Returns [`KdError::OutOfMemory`] if scratch memory cannot grow.
    pub fn build(&mut self) -> Result<()> {
        if self.built {
            return Ok(());
        }
        self.scratch.reserve(self.entries.len())?;
        build_in_place(&mut self.entries, &mut self.scratch.queues)?;
        self.built = true;
        Ok(())
    }

    /// Number of points in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the tree holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether the tree is in tree order.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Stored entries, in tree order once built.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Query configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Tree position of the entry closest to the one at `index`.
    ///
    /// # Errors
    /// - [`KdError::NotBuilt`] before [`build`](Self::build).
    /// - [`KdError::TooFewEntries`] with fewer than two points.
    /// - [`KdError::IndexOutOfBounds`] if `index` is not a valid position.
    /// - [`KdError::OutOfMemory`] if scratch memory cannot grow.
    pub fn nearest_neighbor(&mut self, index: usize) -> Result<usize> {
        self.ensure_built()?;
        find_nearest_neighbor(index, &self.entries, &mut self.scratch.queues, &self.config)
    }

    /// Tree positions of every entry strictly closer than `radius_squared`
    /// to the one at `index`. `results` is cleared first.
    ///
    /// # Errors
    /// Same as [`nearest_neighbor`](Self::nearest_neighbor).
    pub fn neighbors_within_radius(
        &mut self,
        index: usize,
        radius_squared: u64,
        results: &mut Vec<usize>,
    ) -> Result<()> {
        if let Err(err) = self.ensure_built() {
            results.clear();
            return Err(err);
        }
        find_neighbors_within_radius(
            index,
            radius_squared,
            &self.entries,
            &mut self.scratch.queues,
            &self.config,
            results,
        )
    }

    /// Generates one box per point, indexed by box index and confined to
    /// `bound`. Builds the tree first if needed.
    ///
    /// # Errors
    /// - [`KdError::IndexOutOfBounds`] if an entry's box index is not below
    ///   [`len`](Self::len).
    /// - [`KdError::OutOfMemory`] if scratch or output memory cannot grow.
    pub fn bounding_boxes(&mut self, bound: &Rect, results: &mut Vec<Rect>) -> Result<()> {
        let outcome = generate_bounding_boxes(
            &mut self.entries,
            bound,
            &mut self.scratch,
            &self.config,
            results,
        );
        // A failure can stop partitioning midway.
        self.built = outcome.is_ok();
        outcome
    }

    fn ensure_built(&self) -> Result<()> {
        if self.built { Ok(()) } else { Err(KdError::NotBuilt) }
    }
}
