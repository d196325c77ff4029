// Copyright @yucwang 2026

use crate::io::{bmp_utils, exr_utils};
use crate::math::bitmap::Bitmap;

use image::{ImageFormat, Rgba, RgbaImage};
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum ImageWriteError {
    Io(std::io::Error),
    Exr(String),
    Image(image::ImageError),
    Unsupported(String),
}

impl From<std::io::Error> for ImageWriteError {
    fn from(err: std::io::Error) -> Self {
        ImageWriteError::Io(err)
    }
}

impl From<image::ImageError> for ImageWriteError {
    fn from(err: image::ImageError) -> Self {
        ImageWriteError::Image(err)
    }
}

impl fmt::Display for ImageWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageWriteError::Io(err) => write!(f, "io error: {}", err),
            ImageWriteError::Exr(err) => write!(f, "exr error: {}", err),
            ImageWriteError::Image(err) => write!(f, "image error: {}", err),
            ImageWriteError::Unsupported(ext) => write!(f, "unsupported output format: {}", ext),
        }
    }
}

impl std::error::Error for ImageWriteError {}

/// Saves `bitmap`, choosing the encoder from the file extension: `bmp`
/// keeps the raw BGRA buffer, `png` stores the same display colors and
/// `exr` the linear radiance.
pub fn write_bitmap<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> Result<(), ImageWriteError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "bmp" => bmp_utils::write_bmp_to_file(path, bitmap.width(), bitmap.height(), bitmap.raw_bytes())?,
        "png" => to_rgba_image(bitmap).save_with_format(path, ImageFormat::Png)?,
        "exr" => exr_utils::write_exr_to_file(bitmap, path).map_err(ImageWriteError::Exr)?,
        other => return Err(ImageWriteError::Unsupported(other.to_string())),
    }

    log::info!("Image written to: {}.", path.display());
    Ok(())
}

/// Display colors as RGBA8, top row first.
pub fn to_rgba_image(bitmap: &Bitmap) -> RgbaImage {
    let height = bitmap.height();
    RgbaImage::from_fn(bitmap.width() as u32, height as u32, |x, y| {
        let [b, g, r, a] = bitmap.bgra(x as usize, height - 1 - y as usize);
        Rgba([r, g, b, a])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::Vector3f;

    fn two_by_two() -> Bitmap {
        let mut bitmap = Bitmap::new(2, 2);
        bitmap.set_pixel(0, 0, [10, 20, 30, 255], Vector3f::zeros());
        bitmap.set_pixel(1, 1, [40, 50, 60, 255], Vector3f::zeros());
        bitmap
    }

    #[test]
    fn test_rgba_conversion_flips_rows() {
        let image = to_rgba_image(&two_by_two());
        assert_eq!(image.get_pixel(0, 1), &Rgba([30, 20, 10, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([60, 50, 40, 255]));
    }

    #[test]
    fn test_png_round_trip() {
        let path = std::env::temp_dir().join("volpath_image_test.png");
        write_bitmap(&two_by_two(), &path).expect("write png");
        let back = image::open(&path).expect("read png").to_rgba8();
        assert_eq!(back.get_pixel(0, 1), &Rgba([30, 20, 10, 255]));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_extension() {
        let result = write_bitmap(&two_by_two(), std::env::temp_dir().join("volpath_image_test.tga"));
        assert!(matches!(result, Err(ImageWriteError::Unsupported(_))));
    }

    #[test]
    fn test_unwritable_path() {
        let result = write_bitmap(&two_by_two(), "/nonexistent/volpath/out.bmp");
        assert!(matches!(result, Err(ImageWriteError::Io(_))));
    }
}
