//! Adaptive mean binarization.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::box_filter;

/// Value written for foreground (ink) pixels in every mask.
pub const FOREGROUND: u8 = 255;

/// Intensity image using BT.601 weights (0.299, 0.587, 0.114), rounded.
///
/// [`DynamicImage::to_luma8`] uses Rec. 709 weights instead, which shifts
/// the threshold input on colored ink or paper.
#[must_use]
pub fn luma_bt601(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    let mut gray = GrayImage::new(rgb.width(), rgb.height());
    for (src, dst) in rgb.pixels().zip(gray.pixels_mut()) {
        let [r, g, b] = src.0.map(u32::from);
        let value = (299 * r + 587 * g + 114 * b + 500) / 1000;
        *dst = Luma([u8::try_from(value).unwrap_or(u8::MAX)]);
    }
    gray
}

/// Inverted adaptive mean threshold.
///
/// A pixel becomes [`FOREGROUND`] when it is at least `c` levels darker
/// than the mean of its `block_size × block_size` neighborhood (borders
/// replicate the edge pixels). Everything else becomes 0, so dark lines on
/// light paper come out bright. `block_size` must be odd.
#[must_use]
pub fn adaptive_threshold_inv(gray: &GrayImage, block_size: u32, c: i32) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut out = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let radius = block_size / 2;
    let mean = box_filter(gray, radius, radius);
    for ((src, local), dst) in gray.pixels().zip(mean.pixels()).zip(out.pixels_mut()) {
        let ink = i32::from(src[0]) <= i32::from(local[0]) - c;
        *dst = Luma([if ink { FOREGROUND } else { 0 }]);
    }
    out
}

/// Number of foreground pixels in a mask.
#[must_use]
pub fn foreground_count(mask: &GrayImage) -> usize {
    mask.as_raw().iter().filter(|&&v| v != 0).count()
}
