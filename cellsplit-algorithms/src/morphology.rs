//! Directional morphology on binary masks.
//!
//! The structuring elements here are straight lines one pixel thick. An
//! opening (erode then dilate) with a line of length `k` keeps only strokes
//! that run at least `k` pixels along that axis, which is what separates
//! ruled grid lines from handwriting and glyphs.
#![allow(clippy::cast_possible_truncation)]

use crate::binarize::FOREGROUND;
use image::GrayImage;

/// Orientation of a line structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// `len × 1` element along image rows.
    Horizontal,
    /// `1 × len` element along image columns.
    Vertical,
}

#[derive(Clone, Copy)]
enum LineOp {
    Erode,
    Dilate,
}

/// Erodes `mask` with a line element of `len` pixels along `axis`.
///
/// Pixels outside the image do not constrain the result.
#[must_use]
pub fn erode_line(mask: &GrayImage, axis: Axis, len: u32) -> GrayImage {
    apply_line(mask, axis, len, LineOp::Erode)
}

/// Dilates `mask` with a line element of `len` pixels along `axis`.
#[must_use]
pub fn dilate_line(mask: &GrayImage, axis: Axis, len: u32) -> GrayImage {
    apply_line(mask, axis, len, LineOp::Dilate)
}

/// Erode followed by dilate with the same line element.
#[must_use]
pub fn open_line(mask: &GrayImage, axis: Axis, len: u32) -> GrayImage {
    let eroded = erode_line(mask, axis, len);
    dilate_line(&eroded, axis, len)
}

/// Pixelwise saturating sum of two masks of equal size.
///
/// # Panics
/// Panics if the masks differ in size.
#[must_use]
pub fn saturating_add(a: &GrayImage, b: &GrayImage) -> GrayImage {
    assert_eq!(a.dimensions(), b.dimensions(), "mask sizes differ");
    let mut out = a.clone();
    for (dst, src) in out.iter_mut().zip(b.as_raw()) {
        *dst = dst.saturating_add(*src);
    }
    out
}

fn apply_line(mask: &GrayImage, axis: Axis, len: u32, op: LineOp) -> GrayImage {
    let (width, height) = mask.dimensions();
    if len <= 1 || width == 0 || height == 0 {
        return mask.clone();
    }

    let (w, h) = (width as usize, height as usize);
    let (lines, line_len, step, line_step) = match axis {
        Axis::Horizontal => (h, w, 1, w),
        Axis::Vertical => (w, h, w, 1),
    };

    // The element covers [i - anchor, i - anchor + len - 1] for output i.
    let len = len as usize;
    let anchor = len / 2;
    let reach = len - 1 - anchor;

    let src = mask.as_raw();
    let mut out = vec![0u8; src.len()];
    let mut prefix = vec![0usize; line_len + 1];

    for line in 0..lines {
        let base = line * line_step;
        for i in 0..line_len {
            prefix[i + 1] = prefix[i] + usize::from(src[base + i * step] != 0);
        }
        for i in 0..line_len {
            let lo = i.saturating_sub(anchor);
            let hi = (i + reach).min(line_len - 1);
            let on = prefix[hi + 1] - prefix[lo];
            let keep = match op {
                LineOp::Erode => on == hi + 1 - lo,
                LineOp::Dilate => on > 0,
            };
            if keep {
                out[base + i * step] = FOREGROUND;
            }
        }
    }

    GrayImage::from_raw(width, height, out).unwrap_or_else(|| GrayImage::new(width, height))
}
