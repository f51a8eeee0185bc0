//! PNG export of a rasterized frame.
//!
//! Feature-gated behind `png` (default on) so WASM builds can depend on
//! this crate without pulling in `image`. The pixel work itself lives in
//! [`crate::pixel`].

use particle_field_core::color::Rgba;
use particle_field_core::error::FieldError;
use particle_field_core::surface::DrawSurface;
use std::path::Path;

use crate::pixel::PixelSurface;

/// Writes the surface as an opaque PNG composited over `background`.
///
/// Returns `FieldError::InvalidDimensions` for an empty surface, or
/// `FieldError::Io` on encode/write failure.
pub fn write_png(surface: &PixelSurface, background: Rgba, path: &Path) -> Result<(), FieldError> {
    let (w, h) = surface.size();
    if w == 0 || h == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    let img = image::RgbaImage::from_raw(w, h, surface.to_rgba8_over(background))
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    log::info!("wrote {w}x{h} frame to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn write_png_round_trip() {
        let mut surface = PixelSurface::new(16, 8);
        surface.fill_circle(DVec2::new(8.0, 4.0), 3.0, Rgba::new(255, 255, 255, 1.0));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        write_png(&surface, Rgba::new(0, 0, 0, 1.0), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (16, 8));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(8, 4).0, [255, 255, 255, 255]);
    }

    #[test]
    fn write_png_rejects_empty_surface() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let result = write_png(&PixelSurface::new(0, 10), Rgba::new(0, 0, 0, 1.0), &path);
        assert!(matches!(result, Err(FieldError::InvalidDimensions)));
        assert!(!path.exists());
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/frame.png");
        let result = write_png(&PixelSurface::new(4, 4), Rgba::new(0, 0, 0, 1.0), &path);
        assert!(matches!(result, Err(FieldError::Io(_))));
    }
}
