//! Value types shared by the partition builder, the query engine and the
//! bounding box synthesizer.
//!
//! Coordinates are integer millimeters. Nothing here touches floating point.

/// Split axis of a k-d tree level.
///
/// The axis alternates strictly with depth: even depths split on X, odd
/// depths on Y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal coordinate.
    X,
    /// Vertical coordinate.
    Y,
}

impl Axis {
    /// Returns the split axis used at the given tree depth.
    #[inline]
    #[must_use]
    pub const fn from_depth(depth: usize) -> Self {
        if depth & 1 == 0 { Self::X } else { Self::Y }
    }

    /// Returns the other axis.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Index of the work-list holding ranges that split on this axis.
    #[inline]
    pub(crate) const fn queue_slot(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}

/// A 2D point with signed 32-bit coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate on the given axis.
    #[inline]
    #[must_use]
    pub const fn coord(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Squared distance between two points measured along one axis only.
    ///
    /// Exact for every pair of `i32` coordinates.
    #[inline]
    #[must_use]
    pub const fn axis_distance_squared(self, other: Self, axis: Axis) -> u64 {
        let d = self.coord(axis).abs_diff(other.coord(axis)) as u64;
        d * d
    }

    /// Squared Euclidean distance between two points.
    ///
    /// Each axis term is exact; the sum saturates at `u64::MAX`, which is only
    /// reachable when both axes span more than about 2^31.5.
    #[inline]
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> u64 {
        self.axis_distance_squared(other, Axis::X)
            .saturating_add(self.axis_distance_squared(other, Axis::Y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A point paired with the slot of the output rectangle it owns.
///
/// Partitioning permutes entries, `box_index` is what keeps the output order
/// stable across that permutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Entry {
    /// Location of the entry
    pub point: Point,
    /// Index into the output rectangle array
    pub box_index: usize,
}

impl Entry {
    /// Creates an entry.
    #[inline]
    #[must_use]
    pub const fn new(point: Point, box_index: usize) -> Self {
        Self { point, box_index }
    }

    /// Builds one entry per point, with `box_index` equal to the point's
    /// position in the input.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Vec<Self> {
        points
            .iter()
            .enumerate()
            .map(|(box_index, &point)| Self::new(point, box_index))
            .collect()
    }
}

/// Half-open index interval `[begin, end)` over the working entry array.
///
/// Once partitioned, the median position of a range is the tree node for that
/// range and the two sides of the median are its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    /// First index in the range
    pub begin: usize,
    /// One past the last index in the range
    pub end: usize,
}

impl Range {
    /// Creates a range. `begin` must not exceed `end`.
    #[inline]
    #[must_use]
    pub const fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end, "range begin must not exceed end");
        Self { begin, end }
    }

    /// Number of entries covered by the range.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.begin
    }

    /// Returns whether the range covers no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.begin == self.end
    }

    /// Position of the node representing this range.
    #[inline]
    #[must_use]
    pub const fn median(self) -> usize {
        self.begin + self.len() / 2
    }

    /// Returns whether `index` falls inside the range.
    #[inline]
    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        self.begin <= index && index < self.end
    }

    /// Child range on the low side of the median, `[begin, median)`.
    #[inline]
    #[must_use]
    pub const fn lower(self) -> Self {
        Self::new(self.begin, self.median())
    }

    /// Child range on the high side of the median, `[median + 1, end)`.
    ///
    /// Returns `None` when that side is empty.
    #[inline]
    #[must_use]
    pub const fn upper(self) -> Option<Self> {
        let median = self.median();
        if median + 1 < self.end {
            Some(Self::new(median + 1, self.end))
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle, `left <= right` and `top <= bottom`.
///
/// Y grows downward, so `top` is the smaller Y value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Smallest X
    pub left: i32,
    /// Smallest Y
    pub top: i32,
    /// Largest X
    pub right: i32,
    /// Largest Y
    pub bottom: i32,
}

impl Default for Rect {
    fn default() -> Self {
        Self::INFINITE
    }
}

impl Rect {
    /// The rectangle covering the whole `i32` plane.
    pub const INFINITE: Self = Self::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);

    /// Creates a rectangle from its four edges.
    #[inline]
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle centered on `center` with the given half extents.
    ///
    /// Edges that would leave the `i32` range saturate.
    #[must_use]
    pub fn centered(center: Point, half_width: i64, half_height: i64) -> Self {
        let (x, y) = (i64::from(center.x), i64::from(center.y));
        Self::new(
            saturate(x - half_width),
            saturate(y - half_height),
            saturate(x + half_width),
            saturate(y + half_height),
        )
    }

    /// Width, widened so it cannot overflow.
    #[inline]
    #[must_use]
    pub fn width(&self) -> i64 {
        i64::from(self.right) - i64::from(self.left)
    }

    /// Height, widened so it cannot overflow.
    #[inline]
    #[must_use]
    pub fn height(&self) -> i64 {
        i64::from(self.bottom) - i64::from(self.top)
    }

    /// Extent along an axis: width for X, height for Y.
    #[inline]
    #[must_use]
    pub fn extent(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.width(),
            Axis::Y => self.height(),
        }
    }

    /// Low edge along an axis: left for X, top for Y.
    #[inline]
    #[must_use]
    pub const fn low(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// High edge along an axis: right for X, bottom for Y.
    #[inline]
    #[must_use]
    pub const fn high(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }

    /// Replaces both edges along `axis` with `center ± half_extent`,
    /// saturating into the `i32` range.
    pub fn set_span(&mut self, axis: Axis, center: i32, half_extent: i64) {
        let low = saturate(i64::from(center) - half_extent);
        let high = saturate(i64::from(center) + half_extent);
        match axis {
            Axis::X => {
                self.left = low;
                self.right = high;
            }
            Axis::Y => {
                self.top = low;
                self.bottom = high;
            }
        }
    }

    /// Returns whether the rectangle is well formed.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Returns whether `other` lies entirely inside this rectangle, edges
    /// included.
    #[inline]
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Returns whether the point lies inside the rectangle, edges included.
    #[inline]
    #[must_use]
    pub const fn contains_point(&self, point: Point) -> bool {
        self.left <= point.x && point.x <= self.right && self.top <= point.y && point.y <= self.bottom
    }

    /// Confines every edge into `bound`.
    ///
    /// Left/Top are raised to at least the bound's Left/Top and Right/Bottom
    /// lowered to at most its Right/Bottom. Each edge is also kept on the
    /// inner side of the opposite bound edge, so a rectangle lying outside
    /// `bound` collapses onto its border instead of inverting.
    #[must_use]
    pub fn clamp_to(&self, bound: &Self) -> Self {
        let clamp_x = |v: i32| v.max(bound.left).min(bound.right);
        let clamp_y = |v: i32| v.max(bound.top).min(bound.bottom);
        Self::new(
            clamp_x(self.left),
            clamp_y(self.top),
            clamp_x(self.right),
            clamp_y(self.bottom),
        )
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Rectangle moved by `(-dx, -dy)`, saturating.
    #[must_use]
    pub const fn offset_back(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left.saturating_sub(dx),
            self.top.saturating_sub(dy),
            self.right.saturating_sub(dx),
            self.bottom.saturating_sub(dy),
        )
    }
}

/// Narrows an `i64` into `i32`, saturating at the bounds.
#[inline]
pub(crate) fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
