//! Source image decoding.

use crate::{Error, Result};
use image::DynamicImage;
use std::path::Path;

/// Reads and decodes an image file as 8-bit RGB.
///
/// Any alpha channel is dropped. Decoding failures are fatal for a run.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(DynamicImage::ImageRgb8(image.into_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_load_drops_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        RgbaImage::from_pixel(8, 4, Rgba([10, 20, 30, 128]))
            .save(&path)
            .unwrap();

        let image = load_image(&path).unwrap();
        let rgb = image.as_rgb8().unwrap();
        assert_eq!(rgb.dimensions(), (8, 4));
        assert_eq!(rgb.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_load_missing_file_is_decode_error() {
        let dir = tempdir().unwrap();
        let err = load_image(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "{err}");
    }

    #[test]
    fn test_load_garbage_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(load_image(&path), Err(Error::Decode { .. })));
    }
}
