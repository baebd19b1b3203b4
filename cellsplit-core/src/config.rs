//! Pipeline configuration.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row assignment policy used by row clustering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RowPolicy {
    /// Join the earliest created row within tolerance.
    #[default]
    FirstMatch,
    /// Join the row within tolerance whose center is closest; ties go to
    /// the earliest row.
    NearestCenter,
}

/// Which contours of the grid mask become candidate rectangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ContourMode {
    /// Outer borders of top-level components only.
    #[default]
    External,
    /// Hole borders, one per region enclosed by grid lines.
    CellInteriors,
}

/// Options for one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SplitConfig {
    /// Adaptive binarization neighborhood (forced odd).
    pub thresh_block_size: u32,
    /// Constant subtracted from the local mean before thresholding.
    pub thresh_c: i32,
    /// Image width divided by this gives the horizontal kernel length.
    pub horiz_scale: u32,
    /// Image height divided by this gives the vertical kernel length.
    pub vert_scale: u32,
    /// Rectangles with a smaller pixel area are discarded.
    pub min_cell_area: u64,
    /// Margin added around each cell before cropping (pixels).
    pub pad: u32,
    /// Maximum vertical center distance for joining a row (pixels).
    pub row_tolerance: f64,
    /// Row assignment policy.
    pub row_policy: RowPolicy,
    /// Contour selection on the grid mask.
    pub contour_mode: ContourMode,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            thresh_block_size: 15,
            thresh_c: 9,
            horiz_scale: 30,
            vert_scale: 30,
            min_cell_area: 600,
            pad: 4,
            row_tolerance: 12.0,
            row_policy: RowPolicy::FirstMatch,
            contour_mode: ContourMode::External,
        }
    }
}

impl SplitConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset tuned for phone photos of hand-drawn sheets.
    #[must_use]
    pub fn photo_defaults() -> Self {
        Self {
            thresh_block_size: 17,
            thresh_c: 7,
            horiz_scale: 28,
            vert_scale: 28,
            min_cell_area: 500,
            pad: 6,
            ..Self::default()
        }
    }

    /// Sets the binarization block size.
    #[must_use]
    pub fn with_thresh_block_size(mut self, size: u32) -> Self {
        self.thresh_block_size = size;
        self
    }

    /// Sets the binarization offset.
    #[must_use]
    pub fn with_thresh_c(mut self, c: i32) -> Self {
        self.thresh_c = c;
        self
    }

    /// Sets both line kernel scales.
    #[must_use]
    pub fn with_line_scales(mut self, horiz: u32, vert: u32) -> Self {
        self.horiz_scale = horiz;
        self.vert_scale = vert;
        self
    }

    /// Sets the minimum cell area.
    #[must_use]
    pub fn with_min_cell_area(mut self, area: u64) -> Self {
        self.min_cell_area = area;
        self
    }

    /// Sets the crop padding.
    #[must_use]
    pub fn with_pad(mut self, pad: u32) -> Self {
        self.pad = pad;
        self
    }

    /// Sets the row tolerance.
    #[must_use]
    pub fn with_row_tolerance(mut self, tolerance: f64) -> Self {
        self.row_tolerance = tolerance;
        self
    }

    /// Sets the row assignment policy.
    #[must_use]
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    /// Sets the contour selection mode.
    #[must_use]
    pub fn with_contour_mode(mut self, mode: ContourMode) -> Self {
        self.contour_mode = mode;
        self
    }

    /// Block size actually used: even values are bumped to the next odd one.
    #[inline]
    #[must_use]
    pub fn effective_block_size(&self) -> u32 {
        if self.thresh_block_size % 2 == 1 {
            self.thresh_block_size
        } else {
            self.thresh_block_size.saturating_add(1)
        }
    }

    /// Horizontal line kernel length for an image `width` pixels wide.
    #[inline]
    #[must_use]
    pub fn horizontal_kernel_len(&self, width: u32) -> u32 {
        (width / self.horiz_scale.max(1)).max(1)
    }

    /// Vertical line kernel length for an image `height` pixels tall.
    #[inline]
    #[must_use]
    pub fn vertical_kernel_len(&self, height: u32) -> u32 {
        (height / self.vert_scale.max(1)).max(1)
    }

    /// Checks that the options describe a runnable pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.effective_block_size() < 3 {
            return Err(Error::Config(format!(
                "thresh_block_size must be at least 3, got {}",
                self.thresh_block_size
            )));
        }
        if self.horiz_scale == 0 || self.vert_scale == 0 {
            return Err(Error::Config(format!(
                "line scales must be positive, got horiz={} vert={}",
                self.horiz_scale, self.vert_scale
            )));
        }
        if !self.row_tolerance.is_finite() || self.row_tolerance < 0.0 {
            return Err(Error::Config(format!(
                "row_tolerance must be a non-negative number, got {}",
                self.row_tolerance
            )));
        }
        Ok(())
    }
}
