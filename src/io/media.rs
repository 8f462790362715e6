// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Reference image loading.
//!
//! This module decodes image files into RGBA pixels suitable for display
//! in egui.

use crate::error::Result;
use image::RgbaImage;
use std::path::Path;

/// File extensions offered in the open dialog.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff", "tif"];

/// A decoded image.
///
/// `width` and `height` are the native size used for guide placement and
/// export. `display` holds unmultiplied RGBA8 pixels for the texture and
/// may be smaller when the native image exceeds the GPU texture limit.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub display: RgbaImage,
}

/// Decode an image file. Unknown or corrupt files yield `GuideError::Image`.
pub fn load_image(path: &Path, max_texture_side: u32) -> Result<LoadedImage> {
    let img = image::open(path)?;
    let (width, height) = (img.width(), img.height());
    let max_side = max_texture_side.max(1);

    let display = if width > max_side || height > max_side {
        log::debug!("Downscaling {}x{} image to fit {} px texture", width, height, max_side);
        img.thumbnail(max_side, max_side).to_rgba8()
    } else {
        img.to_rgba8()
    };

    Ok(LoadedImage { width, height, display })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuideError;

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ref.png");
        image::RgbaImage::from_pixel(7, 3, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_image(&path, 2048).unwrap();
        assert_eq!((loaded.width, loaded.height), (7, 3));
        assert_eq!(loaded.display.dimensions(), (7, 3));
        assert_eq!(loaded.display.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_oversized_image_keeps_native_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbaImage::from_pixel(40, 10, image::Rgba([200, 100, 50, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_image(&path, 16).unwrap();
        assert_eq!((loaded.width, loaded.height), (40, 10));
        let (w, h) = loaded.display.dimensions();
        assert!(w <= 16 && h <= 16);
        assert_eq!(w, 16);
    }

    #[test]
    fn test_non_image_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(load_image(&path, 2048), Err(GuideError::Image(_))));
    }
}
