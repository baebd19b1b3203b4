//! The end-to-end split: detect, cluster, export.

use crate::exporter::CellExporter;
use crate::image_io::load_image;
use crate::output::prepare_output_dir;
use crate::sink::{CropSink, DirectorySink};
use crate::Result;
use cellsplit_algorithms::{cluster_rows, DetectionStrategy, GridDetector};
use cellsplit_core::{CellRecord, Row, SplitConfig};
use image::DynamicImage;
use log::{info, warn};
use std::path::Path;

/// Rows recovered from an image, before any crop is written.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// Strategy that produced the rectangles, `None` if nothing was found.
    pub strategy: Option<DetectionStrategy>,
    /// Rows top to bottom, members left to right.
    pub rows: Vec<Row>,
}

impl TableLayout {
    /// Total number of cells across all rows.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }
}

/// Table segmentation pipeline with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: SplitConfig,
}

impl Pipeline {
    /// Creates a pipeline after validating `config`.
    pub fn new(config: SplitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Decodes `image_path` and splits it into `output_dir`.
    ///
    /// Decoding happens first, so an unreadable input leaves the output
    /// directory untouched.
    pub fn run(&self, image_path: &Path, output_dir: &Path) -> Result<Vec<CellRecord>> {
        let image = load_image(image_path)?;
        info!(
            "loaded {} ({}x{})",
            image_path.display(),
            image.width(),
            image.height()
        );
        self.run_image(&image, output_dir)
    }

    /// Splits an already decoded image into `output_dir`, clearing it first.
    pub fn run_image(&self, image: &DynamicImage, output_dir: &Path) -> Result<Vec<CellRecord>> {
        prepare_output_dir(output_dir)?;
        let mut sink = DirectorySink::new(output_dir);
        self.run_with_sink(image, &mut sink)
    }

    /// Splits `image`, handing every crop to `sink`.
    pub fn run_with_sink<S>(&self, image: &DynamicImage, sink: &mut S) -> Result<Vec<CellRecord>>
    where
        S: CropSink + ?Sized,
    {
        let layout = self.analyze(image);
        let records = CellExporter::new(self.config.pad).export(&layout.rows, image, sink)?;
        info!("exported {} cell crop(s)", records.len());
        Ok(records)
    }

    /// Detects and clusters cells without exporting anything.
    #[must_use]
    pub fn analyze(&self, image: &DynamicImage) -> TableLayout {
        let detection = GridDetector::new(&self.config).detect(image);
        match detection.strategy {
            Some(strategy) => info!(
                "{} strategy found {} candidate cell(s)",
                strategy.name(),
                detection.rects.len()
            ),
            None => warn!("no table cells found"),
        }

        let rows = cluster_rows(
            &detection.rects,
            self.config.row_tolerance,
            self.config.row_policy,
        );
        info!("clustered into {} row(s)", rows.len());

        TableLayout {
            strategy: detection.strategy,
            rows,
        }
    }
}

/// One-shot helper: validate `config`, then [`Pipeline::run`].
pub fn split_table(
    image_path: &Path,
    output_dir: &Path,
    config: &SplitConfig,
) -> Result<Vec<CellRecord>> {
    Pipeline::new(config.clone())?.run(image_path, output_dir)
}
