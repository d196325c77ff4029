/* Copyright 2020 @TwoCookingMice */

use crate::math::bitmap::Bitmap;

use exr::prelude::*;
use std::path::Path;

/// Writes the linear radiance of `bitmap` as an RGB OpenEXR file, top row
/// first.
pub fn write_exr_to_file<P: AsRef<Path>>(bitmap: &Bitmap, file_path: P) -> std::result::Result<(), String> {
    let file_path = file_path.as_ref();
    log::info!("Starting writing openexr images: {}.", file_path.display());

    let width = bitmap.width();
    let height = bitmap.height();
    write_rgb_file(file_path, width, height, |x, y| {
        let rgb = bitmap.radiance(x, height - 1 - y);
        (rgb.x, rgb.y, rgb.z)
    })
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::Vector3f;

    #[test]
    fn test_exr_round_trip_orientation() {
        let mut bitmap = Bitmap::new(2, 2);
        bitmap.set_pixel(0, 0, [0, 0, 0, 255], Vector3f::new(1.0, 2.0, 3.0));
        bitmap.set_pixel(1, 1, [0, 0, 0, 255], Vector3f::new(4.0, 5.0, 6.0));

        let path = std::env::temp_dir().join("volpath_exr_test.exr");
        write_exr_to_file(&bitmap, &path).expect("write exr");

        let image = read()
            .no_deep_data()
            .largest_resolution_level()
            .rgba_channels(
                |resolution, _| vec![(0.0f32, 0.0f32, 0.0f32); resolution.width() * resolution.height()],
                |pixels, position, (r, g, b, _a): (f32, f32, f32, f32)| {
                    pixels[position.y() * 2 + position.x()] = (r, g, b);
                },
            )
            .first_valid_layer()
            .all_attributes()
            .from_file(&path)
            .expect("read exr");
        let pixels = image.layer_data.channel_data.pixels;

        // Bitmap row 0 is the bottom, EXR row 0 is the top.
        assert_eq!(pixels[2], (1.0, 2.0, 3.0));
        assert_eq!(pixels[1], (4.0, 5.0, 6.0));
        let _ = std::fs::remove_file(&path);
    }
}
