//! Cell export: padded crops in row-major order.

use crate::sink::CropSink;
use crate::Result;
use cellsplit_core::{CellBox, CellRecord, Row};
use image::{DynamicImage, GenericImageView};
use log::debug;

/// Crops every clustered rectangle out of the source image.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellExporter {
    pad: u32,
}

impl CellExporter {
    /// Creates an exporter adding `pad` pixels around each cell.
    #[must_use]
    pub fn new(pad: u32) -> Self {
        Self { pad }
    }

    /// Writes one crop per rectangle in `rows` and returns the matching
    /// records, row by row and left to right within a row.
    ///
    /// The first sink failure aborts the export: a partial grid would leave
    /// gaps in the row/column numbering.
    pub fn export<S>(
        &self,
        rows: &[Row],
        source: &DynamicImage,
        sink: &mut S,
    ) -> Result<Vec<CellRecord>>
    where
        S: CropSink + ?Sized,
    {
        let (width, height) = source.dimensions();
        let total = rows.iter().map(Row::len).sum();
        let mut records = Vec::with_capacity(total);

        for (r, row) in rows.iter().enumerate() {
            for (c, rect) in row.items().iter().enumerate() {
                let bbox = CellBox::padded(rect, self.pad, width, height);
                let crop = source.crop_imm(bbox.x, bbox.y, bbox.w, bbox.h);
                let path = sink.write(r + 1, c + 1, &crop)?;
                records.push(CellRecord {
                    row: r + 1,
                    col: c + 1,
                    path,
                    bbox,
                });
            }
        }

        debug!("exported {} cell(s) from {} row(s)", records.len(), rows.len());
        Ok(records)
    }
}
