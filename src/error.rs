//! Error type shared by every fallible operation in the crate.

use std::collections::TryReserveError;

/// Failure of a partition, query or bounding box operation.
///
/// Errors are returned immediately; no operation retries or degrades.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum KdError {
    /// A query needs at least two entries so there is a neighbor to find.
    #[error("k-d tree query needs at least 2 entries, got {len}")]
    TooFewEntries {
        /// Number of entries in the tree
        len: usize,
    },

    /// An index addressed a position outside its array.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Length of the addressed array
        len: usize,
    },

    /// A [`KdTree`](crate::KdTree) was queried before [`build`](crate::KdTree::build).
    #[error("k-d tree must be built before it is queried")]
    NotBuilt,

    /// Growing a scratch or output buffer failed.
    #[error("out of memory while growing a buffer: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KdError>;
