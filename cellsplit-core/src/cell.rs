//! Cell crop boxes and exported cell records.

use crate::Rect;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Padded crop region of one cell, clamped to the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellBox {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels (>= 1).
    pub w: u32,
    /// Height in pixels (>= 1).
    pub h: u32,
}

impl CellBox {
    /// Grows `rect` by `pad` on every side and clamps it to an image of
    /// `image_width × image_height`.
    ///
    /// Sides collapsing to zero after clamping are floored to one pixel, so
    /// the result is never empty. For a non-empty image the box always lies
    /// inside it.
    #[must_use]
    pub fn padded(rect: &Rect, pad: u32, image_width: u32, image_height: u32) -> Self {
        let (x, w) = pad_axis(rect.x, rect.width, pad, image_width);
        let (y, h) = pad_axis(rect.y, rect.height, pad, image_height);
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }
}

fn pad_axis(start: u32, len: u32, pad: u32, limit: u32) -> (u32, u32) {
    let lo = start.saturating_sub(pad).min(limit.saturating_sub(1));
    let hi = start.saturating_add(len).saturating_add(pad).min(limit);
    (lo, hi.saturating_sub(lo).max(1))
}

/// One exported cell: its 1-based grid position, crop location and box.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellRecord {
    /// 1-based row index.
    pub row: usize,
    /// 1-based column index within the row.
    pub col: usize,
    /// Where the crop was written.
    pub path: PathBuf,
    /// Padded crop box in source image coordinates.
    pub bbox: CellBox,
}
