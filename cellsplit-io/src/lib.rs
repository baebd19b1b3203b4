//! cellsplit-io: Image I/O, cell export and pipeline glue for cellsplit.
//!
//! This crate decodes source images, writes one crop per detected cell,
//! composes detection, clustering and export into a single [`Pipeline`],
//! and hosts the seam to the external per-cell symbol classifier.
//!

pub mod classify;
mod error;
mod exporter;
mod image_io;
pub mod manifest;
mod output;
mod pipeline;
pub mod sink;

pub use classify::{
    classify_cells, merge_table, parse_label, CellLabel, ClassifiedCell, CommandClassifier,
    Symbol, SymbolClassifier, TableEntry,
};
pub use error::{Error, Result};
pub use exporter::CellExporter;
pub use image_io::load_image;
pub use output::prepare_output_dir;
pub use pipeline::{split_table, Pipeline, TableLayout};
pub use sink::{cell_file_name, CropSink, DirectorySink, MemorySink};
