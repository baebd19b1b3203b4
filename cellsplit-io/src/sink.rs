//! Destinations for cell crops.

use crate::{Error, Result};
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};

/// File name used for the crop at 1-based (`row`, `col`).
#[must_use]
pub fn cell_file_name(row: usize, col: usize) -> String {
    format!("cell_r{row}_c{col}.png")
}

/// Receives one crop per cell and reports where it went.
pub trait CropSink {
    /// Persists the crop at 1-based (`row`, `col`).
    fn write(&mut self, row: usize, col: usize, crop: &DynamicImage) -> Result<PathBuf>;
}

/// Writes crops as PNG files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing into `dir`. The directory must exist.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the crop at 1-based (`row`, `col`).
    #[must_use]
    pub fn cell_path(&self, row: usize, col: usize) -> PathBuf {
        self.dir.join(cell_file_name(row, col))
    }
}

impl CropSink for DirectorySink {
    fn write(&mut self, row: usize, col: usize, crop: &DynamicImage) -> Result<PathBuf> {
        let path = self.cell_path(row, col);
        crop.save_with_format(&path, ImageFormat::Png)
            .map_err(|source| Error::CropWrite {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

/// A crop kept in memory by [`MemorySink`].
#[derive(Debug, Clone)]
pub struct StoredCrop {
    /// 1-based row.
    pub row: usize,
    /// 1-based column.
    pub col: usize,
    /// Cropped pixels.
    pub image: DynamicImage,
}

/// Keeps crops in memory; reported paths are bare file names.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    crops: Vec<StoredCrop>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Crops received so far, in write order.
    #[must_use]
    pub fn crops(&self) -> &[StoredCrop] {
        &self.crops
    }

    /// Consumes the sink and returns its crops.
    #[must_use]
    pub fn into_crops(self) -> Vec<StoredCrop> {
        self.crops
    }
}

impl CropSink for MemorySink {
    fn write(&mut self, row: usize, col: usize, crop: &DynamicImage) -> Result<PathBuf> {
        self.crops.push(StoredCrop {
            row,
            col,
            image: crop.clone(),
        });
        Ok(PathBuf::from(cell_file_name(row, col)))
    }
}
