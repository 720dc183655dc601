//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use kdbox::prelude::*;
//! ```

pub use crate::{
    build_and_box, generate_bounding_boxes, select_boxes, Entry, KdError, KdTree, Point, Rect,
    Scratch, SearchConfig,
};
