//! Row clustering by vertical-center proximity.
//!
//! Rectangles are visited top to bottom (stable sort on `y`). Each one either
//! joins an existing row whose running center is within tolerance or opens a
//! new row. Rows keep creation order; members end up sorted by `x`.

use cellsplit_core::{Rect, Row, RowClustering, RowPolicy};

/// Greedy first-match row clustering.
///
/// A rectangle joins the earliest created row within tolerance, even when a
/// later row's center is closer. Output depends only on the `y` scan order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatchClustering;

/// Nearest-center row clustering.
///
/// A rectangle joins the row within tolerance whose current center is
/// closest to its own; equal distances go to the earliest row. Same scan
/// order as [`FirstMatchClustering`], so still greedy, but it can produce
/// different rows whenever two row bands overlap.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestCenterClustering;

impl RowClustering for FirstMatchClustering {
    fn cluster(&self, rects: &[Rect], tolerance: f64) -> Vec<Row> {
        assign_rows(rects, |rows, cy| {
            rows.iter()
                .position(|row| row.center().distance(cy) <= tolerance)
        })
    }

    fn name(&self) -> &'static str {
        "first-match"
    }
}

impl RowClustering for NearestCenterClustering {
    fn cluster(&self, rects: &[Rect], tolerance: f64) -> Vec<Row> {
        assign_rows(rects, |rows, cy| {
            let mut best: Option<(usize, f64)> = None;
            for (idx, row) in rows.iter().enumerate() {
                let dist = row.center().distance(cy);
                if dist > tolerance {
                    continue;
                }
                let closer = match best {
                    Some((_, best_dist)) => dist < best_dist,
                    None => true,
                };
                if closer {
                    best = Some((idx, dist));
                }
            }
            best.map(|(idx, _)| idx)
        })
    }

    fn name(&self) -> &'static str {
        "nearest-center"
    }
}

/// Clusters `rects` into rows with the selected policy.
#[must_use]
pub fn cluster_rows(rects: &[Rect], tolerance: f64, policy: RowPolicy) -> Vec<Row> {
    match policy {
        RowPolicy::FirstMatch => FirstMatchClustering.cluster(rects, tolerance),
        RowPolicy::NearestCenter => NearestCenterClustering.cluster(rects, tolerance),
    }
}

fn assign_rows<F>(rects: &[Rect], mut pick: F) -> Vec<Row>
where
    F: FnMut(&[Row], f64) -> Option<usize>,
{
    let mut ordered = rects.to_vec();
    ordered.sort_by_key(|rect| rect.y);

    let mut rows: Vec<Row> = Vec::new();
    for rect in ordered {
        match pick(&rows, rect.center_y()) {
            Some(idx) => rows[idx].absorb(rect),
            None => rows.push(Row::new(rect)),
        }
    }

    for row in &mut rows {
        row.sort_by_x();
    }
    rows
}
