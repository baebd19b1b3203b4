//! Row types and the row clustering trait.

use crate::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Running mean of the vertical centers merged into a row.
///
/// The accumulator only grows: members are never removed, so the mean is
/// always the average of every center merged so far.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowCenter {
    mean: f64,
    count: usize,
}

impl RowCenter {
    /// Starts a new accumulator from a single center.
    #[inline]
    #[must_use]
    pub fn new(center_y: f64) -> Self {
        Self {
            mean: center_y,
            count: 1,
        }
    }

    /// Returns the accumulator after merging one more center.
    #[inline]
    #[must_use]
    pub fn merge(self, center_y: f64) -> Self {
        let count = self.count + 1;
        #[allow(clippy::cast_precision_loss)]
        let mean = (self.mean * self.count as f64 + center_y) / count as f64;
        Self { mean, count }
    }

    /// Current mean center.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.mean
    }

    /// Number of centers merged.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Absolute distance between `center_y` and the current mean.
    #[inline]
    #[must_use]
    pub fn distance(&self, center_y: f64) -> f64 {
        (center_y - self.mean).abs()
    }
}

/// A logical table row: rectangles sharing a vertical band.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row {
    center: RowCenter,
    items: Vec<Rect>,
}

impl Row {
    /// Opens a row seeded with its first rectangle.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            center: RowCenter::new(rect.center_y()),
            items: vec![rect],
        }
    }

    /// Adds a rectangle and folds its center into the running mean.
    pub fn absorb(&mut self, rect: Rect) {
        self.center = self.center.merge(rect.center_y());
        self.items.push(rect);
    }

    /// Orders members by ascending `x`. Equal `x` keeps insertion order.
    pub fn sort_by_x(&mut self) {
        self.items.sort_by_key(|rect| rect.x);
    }

    /// Running mean of member vertical centers.
    #[inline]
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.center.value()
    }

    /// Number of rectangles merged into the row.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.center.count()
    }

    /// The center accumulator.
    #[inline]
    #[must_use]
    pub fn center(&self) -> RowCenter {
        self.center
    }

    /// Member rectangles.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Rect] {
        &self.items
    }

    /// Returns the number of rectangles in the row.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the row holds no rectangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Trait for row clustering policies.
///
/// Implementations group unordered rectangles into rows ordered by creation
/// (top to bottom) and leave each row's members sorted by `x`.
pub trait RowClustering: Send + Sync {
    /// Groups `rects` into rows using a pixel `tolerance` on vertical centers.
    fn cluster(&self, rects: &[Rect], tolerance: f64) -> Vec<Row>;

    /// Returns the name of the policy.
    fn name(&self) -> &'static str;
}
