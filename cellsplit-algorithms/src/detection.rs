//! Grid detection: binarize, isolate ruled lines, reduce contours to rects.
//!
//! Detection runs a fixed sequence of strategies. [`DetectionStrategy::GridLines`]
//! traces the combined horizontal/vertical line mask; when it yields nothing
//! [`DetectionStrategy::RawBinary`] traces the binarized mask directly. When
//! both come back empty the detection is empty, which is not an error.

use crate::binarize::{adaptive_threshold_inv, luma_bt601};
use crate::contours::{contour_rects, external_rects};
use crate::morphology::{open_line, saturating_add, Axis};
use cellsplit_core::{Rect, SplitConfig};
use image::{DynamicImage, GrayImage};
use log::debug;

/// Rectangle extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionStrategy {
    /// Contours of the reconstructed grid-line mask.
    GridLines,
    /// Contours of the binarized mask, before any morphology.
    RawBinary,
}

impl DetectionStrategy {
    /// Strategy tried first.
    pub const PRIMARY: Self = Self::GridLines;

    /// Strategy to try when this one finds no rectangles.
    #[must_use]
    pub fn fallback(self) -> Option<Self> {
        match self {
            Self::GridLines => Some(Self::RawBinary),
            Self::RawBinary => None,
        }
    }

    /// Short name for logs and reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::GridLines => "grid-lines",
            Self::RawBinary => "raw-binary",
        }
    }
}

/// Outcome of one detection run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// Candidate cell rectangles, unordered.
    pub rects: Vec<Rect>,
    /// Strategy that produced `rects`; `None` when every strategy came up empty.
    pub strategy: Option<DetectionStrategy>,
}

impl Detection {
    /// Returns true if no rectangle was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// Finds candidate cell rectangles in a photographed table.
#[derive(Debug, Clone)]
pub struct GridDetector {
    config: SplitConfig,
}

impl GridDetector {
    /// Creates a detector from the pipeline configuration.
    #[must_use]
    pub fn new(config: &SplitConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Configuration the detector was built from.
    #[must_use]
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Detects cell rectangles in a decoded image of any color type.
    ///
    /// Color input is reduced with BT.601 weights, see [`luma_bt601`].
    #[must_use]
    pub fn detect(&self, image: &DynamicImage) -> Detection {
        self.detect_gray(&luma_bt601(image))
    }

    /// Detects cell rectangles in a single-channel intensity image.
    #[must_use]
    pub fn detect_gray(&self, gray: &GrayImage) -> Detection {
        let binary = self.binarize(gray);

        let mut next = Some(DetectionStrategy::PRIMARY);
        while let Some(strategy) = next {
            let rects = self.run_strategy(strategy, &binary);
            debug!(
                "{} strategy: {} rectangle(s) with area >= {}",
                strategy.name(),
                rects.len(),
                self.config.min_cell_area
            );
            if !rects.is_empty() {
                return Detection {
                    rects,
                    strategy: Some(strategy),
                };
            }
            next = strategy.fallback();
        }

        Detection::default()
    }

    /// Runs a single strategy on an already binarized mask.
    #[must_use]
    pub fn run_strategy(&self, strategy: DetectionStrategy, binary: &GrayImage) -> Vec<Rect> {
        match strategy {
            DetectionStrategy::GridLines => {
                let grid = self.grid_mask(binary);
                contour_rects(&grid, self.config.contour_mode, self.config.min_cell_area)
            }
            DetectionStrategy::RawBinary => external_rects(binary, self.config.min_cell_area),
        }
    }

    /// Inverted adaptive binarization of the intensity image.
    #[must_use]
    pub fn binarize(&self, gray: &GrayImage) -> GrayImage {
        adaptive_threshold_inv(gray, self.config.effective_block_size(), self.config.thresh_c)
    }

    /// Union of the horizontal and vertical line masks.
    #[must_use]
    pub fn grid_mask(&self, binary: &GrayImage) -> GrayImage {
        let (width, height) = binary.dimensions();
        let horiz_len = self.config.horizontal_kernel_len(width);
        let vert_len = self.config.vertical_kernel_len(height);

        let horizontal = open_line(binary, Axis::Horizontal, horiz_len);
        let vertical = open_line(binary, Axis::Vertical, vert_len);
        saturating_add(&horizontal, &vertical)
    }
}

impl Default for GridDetector {
    fn default() -> Self {
        Self::new(&SplitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_chain_terminates() {
        let mut chain = Vec::new();
        let mut next = Some(DetectionStrategy::PRIMARY);
        while let Some(strategy) = next {
            chain.push(strategy);
            next = strategy.fallback();
        }
        assert_eq!(
            chain,
            vec![DetectionStrategy::GridLines, DetectionStrategy::RawBinary]
        );
    }

    #[test]
    fn test_detector_uses_odd_block_size() {
        let detector = GridDetector::new(&SplitConfig::new().with_thresh_block_size(16));
        assert_eq!(detector.config().effective_block_size(), 17);
    }

    #[test]
    fn test_blank_gray_image_is_empty() {
        let gray = GrayImage::from_pixel(120, 80, image::Luma([255]));
        let detection = GridDetector::default().detect_gray(&gray);
        assert!(detection.is_empty());
        assert_eq!(detection.strategy, None);
    }
}
