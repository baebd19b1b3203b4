//! cellsplit-core: Core types for table grid segmentation.
//!
//! This crate provides the data model shared by the detection, clustering
//! and export stages: pixel rectangles, rows with a running vertical
//! center, padded cell boxes, cell records and the pipeline configuration.
//!

pub mod cell;
pub mod config;
pub mod error;
pub mod geometry;
pub mod row;

pub use cell::{CellBox, CellRecord};
pub use config::{ContourMode, RowPolicy, SplitConfig};
pub use error::{Error, Result};
pub use geometry::Rect;
pub use row::{Row, RowCenter, RowClustering};
