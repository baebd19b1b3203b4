//! cellsplit-algorithms: Grid detection and row clustering.
//!
//! This crate provides the algorithmic stages of table segmentation:
//! - **Binarization** - adaptive mean threshold, ink bright on dark
//! - **Line morphology** - directional opening isolating long strokes
//! - **Contours** - contour tracing reduced to bounding rectangles
//! - **Detection** - primary grid-line strategy with a raw-mask fallback
//! - **Clustering** - first-match and nearest-center row grouping
//!
#![warn(missing_docs)]

pub mod binarize;
mod clustering;
pub mod contours;
mod detection;
pub mod morphology;

pub use clustering::{cluster_rows, FirstMatchClustering, NearestCenterClustering};
pub use detection::{Detection, DetectionStrategy, GridDetector};
pub use morphology::Axis;

// Re-export core clustering types
pub use cellsplit_core::row::{Row, RowCenter, RowClustering};
