//! Contour tracing reduced to bounding rectangles.

use cellsplit_core::{ContourMode, Rect};
use image::{imageops, GrayImage};
use imageproc::contours::{find_contours, BorderType, Contour};

/// Bounding rectangles of the contours selected by `mode`, keeping those
/// with `width × height >= min_area`.
///
/// [`ContourMode::External`] keeps the outer borders of top-level
/// components; [`ContourMode::CellInteriors`] keeps hole borders, one per
/// background region enclosed by foreground. Rectangles come back in
/// tracing order, which callers must not rely on.
#[must_use]
pub fn contour_rects(mask: &GrayImage, mode: ContourMode, min_area: u64) -> Vec<Rect> {
    if mask.width() == 0 || mask.height() == 0 {
        return Vec::new();
    }

    let (width, height) = mask.dimensions();
    find_contours::<u32>(&with_zero_frame(mask))
        .iter()
        .filter(|contour| selected(contour, mode))
        .filter_map(bounding_rect)
        .filter_map(|rect| unframe(&rect, width, height))
        .filter(|rect| rect.area() >= min_area)
        .collect()
}

/// Copy of `mask` surrounded by a one pixel background frame.
///
/// The tracer needs background on every side of a component to report its
/// outer border; ink touching the image edge would otherwise only produce
/// hole borders.
fn with_zero_frame(mask: &GrayImage) -> GrayImage {
    let mut framed = GrayImage::new(mask.width() + 2, mask.height() + 2);
    imageops::replace(&mut framed, mask, 1, 1);
    framed
}

/// Maps a rectangle traced on the framed mask back into `width × height`.
fn unframe(rect: &Rect, width: u32, height: u32) -> Option<Rect> {
    let max_x = (rect.right() - 1).saturating_sub(1).min(width - 1);
    let max_y = (rect.bottom() - 1).saturating_sub(1).min(height - 1);
    Rect::from_extents(
        rect.x.saturating_sub(1).min(max_x),
        rect.y.saturating_sub(1).min(max_y),
        max_x,
        max_y,
    )
    .ok()
}

/// Shorthand for [`contour_rects`] with [`ContourMode::External`].
#[must_use]
pub fn external_rects(mask: &GrayImage, min_area: u64) -> Vec<Rect> {
    contour_rects(mask, ContourMode::External, min_area)
}

fn selected(contour: &Contour<u32>, mode: ContourMode) -> bool {
    match mode {
        ContourMode::External => {
            contour.border_type == BorderType::Outer && contour.parent.is_none()
        }
        ContourMode::CellInteriors => contour.border_type == BorderType::Hole,
    }
}

/// Axis-aligned bounding rectangle of a traced contour.
#[must_use]
pub fn bounding_rect(contour: &Contour<u32>) -> Option<Rect> {
    let first = contour.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &contour.points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect::from_extents(min_x, min_y, max_x, max_y).ok()
}
