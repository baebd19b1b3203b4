//! Axis-aligned pixel rectangles.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel coordinates.
///
/// Width and height are always at least one pixel. Rectangles are produced
/// by grid detection and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge (column of the first pixel).
    pub x: u32,
    /// Top edge (row of the first pixel).
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Creates a rectangle, rejecting zero-sized sides.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidRect { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Creates the smallest rectangle covering the inclusive pixel extents
    /// `[min_x, max_x] × [min_y, max_y]`.
    pub fn from_extents(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Result<Self> {
        if max_x < min_x || max_y < min_y {
            return Err(Error::InvalidRect {
                width: 0,
                height: 0,
            });
        }
        Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }

    /// Pixel area (`width × height`).
    #[inline]
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Exclusive right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Vertical center, `y + height / 2`.
    #[inline]
    #[must_use]
    pub fn center_y(&self) -> f64 {
        f64::from(self.y) + f64::from(self.height) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_rejects_empty_sides() {
        assert_eq!(
            Rect::new(0, 0, 0, 5),
            Err(Error::InvalidRect {
                width: 0,
                height: 5
            })
        );
        assert!(Rect::new(0, 0, 5, 0).is_err());
        assert!(Rect::new(3, 4, 1, 1).is_ok());
    }

    #[test]
    fn test_rect_from_extents_is_inclusive() {
        let rect = Rect::from_extents(10, 20, 19, 20).unwrap();
        assert_eq!(rect, Rect::new(10, 20, 10, 1).unwrap());
        assert!(Rect::from_extents(5, 5, 4, 5).is_err());
    }

    #[test]
    fn test_rect_metrics() {
        let rect = Rect::new(100, 100, 50, 30).unwrap();
        assert_eq!(rect.area(), 1500);
        assert_eq!(rect.right(), 150);
        assert_eq!(rect.bottom(), 130);
        assert!((rect.center_y() - 115.0).abs() < f64::EPSILON);
    }
}
