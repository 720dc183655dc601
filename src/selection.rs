//! Layout of a subset of generated boxes.
//!
//! A consumer that only drives some of the points (for example, an effect
//! covering part of a device) wants those boxes relative to their own
//! encompassing rectangle, so the top-left of the selection becomes the
//! origin of its bitmap.

use crate::error::{KdError, Result};
use crate::types::Rect;

/// Boxes of a selection moved to the selection's own origin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionLayout {
    /// Selected boxes in selection order, relative to the encompassing box
    pub boxes: Vec<Rect>,
    /// Width of the smallest rectangle containing every selected box
    pub width: u32,
    /// Height of the smallest rectangle containing every selected box
    pub height: u32,
}

impl SelectionLayout {
    /// Returns whether nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Picks `boxes[i]` for every `i` in `selected` and translates them so the
/// encompassing rectangle of the selection starts at `(0, 0)`.
///
/// An empty selection yields an empty layout of zero size.
///
/// # Errors
/// - [`KdError::IndexOutOfBounds`] if a selected index is not a valid box.
/// - [`KdError::OutOfMemory`] if the output cannot be allocated.
///
/// # Example
/// ```
/// use kdbox::{select_boxes, Rect};
///
/// let boxes = [Rect::new(10, 10, 20, 20), Rect::new(0, 0, 5, 5), Rect::new(30, 15, 40, 25)];
/// let layout = select_boxes(&boxes, &[0, 2]).unwrap();
/// assert_eq!(layout.boxes, vec![Rect::new(0, 0, 10, 10), Rect::new(20, 5, 30, 15)]);
/// assert_eq!((layout.width, layout.height), (30, 15));
/// ```
pub fn select_boxes(boxes: &[Rect], selected: &[usize]) -> Result<SelectionLayout> {
    let mut picked = Vec::new();
    picked.try_reserve_exact(selected.len())?;

    for &index in selected {
        let rect = boxes.get(index).ok_or(KdError::IndexOutOfBounds {
            index,
            len: boxes.len(),
        })?;
        picked.push(*rect);
    }

    let Some(encompassing) = picked.iter().copied().reduce(|acc, rect| acc.union(&rect)) else {
        return Ok(SelectionLayout::default());
    };

    for rect in &mut picked {
        *rect = rect.offset_back(encompassing.left, encompassing.top);
    }

    Ok(SelectionLayout {
        boxes: picked,
        width: u32::try_from(encompassing.width()).unwrap_or(u32::MAX),
        height: u32::try_from(encompassing.height()).unwrap_or(u32::MAX),
    })
}
