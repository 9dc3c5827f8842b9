//! Fixed-size drawing surface
//!
//! Wraps a tiny-skia pixmap and offers the handful of operations the
//! state machine's effects need: clear, background fill and image blit.

use std::path::Path;

use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::domain::core::{Placement, Size};
use crate::platform::decode::SourceImage;

/// Surface errors
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Failed to create pixmap for a {width}x{height} surface")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Failed to encode surface as PNG: {0}")]
    EncodingFailed(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Converts an `[r, g, b, a]` quadruple into a tiny-skia colour
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// The raster target images and captions are drawn onto
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    pixmap: Pixmap,
}

impl DrawingSurface {
    /// Creates a transparent surface
    pub fn new(size: Size) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(size.w, size.h).ok_or(SurfaceError::PixmapCreationFailed {
            width: size.w,
            height: size.h,
        })?;
        Ok(Self { pixmap })
    }

    pub fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }

    /// Resets every pixel to transparent
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Paints the whole surface with a solid colour
    pub fn fill_background(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    /// Draws `image` scaled into `placement`
    pub fn draw_image(&mut self, image: &SourceImage, placement: &Placement) {
        let (scale_x, scale_y) = placement.scale_from(image.natural_size());
        let transform = Transform::from_row(
            scale_x,
            0.0,
            0.0,
            scale_y,
            placement.start_x,
            placement.start_y,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };

        self.pixmap
            .draw_pixmap(0, 0, image.pixmap().as_ref(), &paint, transform, None);
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Straight (non-premultiplied) RGBA of one pixel
    pub fn pixel_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some([px.red(), px.green(), px.blue(), px.alpha()])
    }

    /// True when every pixel is fully transparent
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|px| px.alpha() == 0)
    }

    /// Encodes the current contents as PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.pixmap
            .encode_png()
            .map_err(|e| SurfaceError::EncodingFailed(e.to_string()))
    }

    /// Writes the current contents to a PNG file
    pub fn save_png(&self, path: &Path) -> Result<(), SurfaceError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(|source| SurfaceError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::fit;

    fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
        let mut pixmap = Pixmap::new(w, h).unwrap();
        pixmap.fill(color_from_rgba(rgba));
        SourceImage::from_pixmap(pixmap)
    }

    #[test]
    fn new_surface_is_transparent() {
        let surface = DrawingSurface::new(Size::new(40, 30)).unwrap();
        assert_eq!(surface.size(), Size::new(40, 30));
        assert!(surface.is_blank());
    }

    #[test]
    fn zero_sized_surface_fails() {
        assert!(matches!(
            DrawingSurface::new(Size::new(0, 10)),
            Err(SurfaceError::PixmapCreationFailed { .. })
        ));
    }

    #[test]
    fn background_then_clear() {
        let mut surface = DrawingSurface::new(Size::new(10, 10)).unwrap();
        surface.fill_background(Color::BLACK);
        assert_eq!(surface.pixel_rgba(5, 5), Some([0, 0, 0, 255]));

        surface.clear();
        assert!(surface.is_blank());
    }

    #[test]
    fn landscape_image_is_letterboxed() {
        let canvas = Size::new(100, 100);
        let mut surface = DrawingSurface::new(canvas).unwrap();
        let image = solid_image(20, 10, [255, 0, 0, 255]);
        let placement = fit(canvas, image.natural_size()).unwrap();

        surface.fill_background(Color::BLACK);
        surface.draw_image(&image, &placement);

        // Bars above and below, image band in the middle (y in 25..75)
        assert_eq!(surface.pixel_rgba(50, 5), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel_rgba(50, 95), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel_rgba(50, 50), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel_rgba(2, 50), Some([255, 0, 0, 255]));
    }

    #[test]
    fn portrait_image_is_pillarboxed() {
        let canvas = Size::new(100, 100);
        let mut surface = DrawingSurface::new(canvas).unwrap();
        let image = solid_image(10, 20, [0, 0, 255, 255]);
        let placement = fit(canvas, image.natural_size()).unwrap();

        surface.fill_background(Color::BLACK);
        surface.draw_image(&image, &placement);

        assert_eq!(surface.pixel_rgba(5, 50), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel_rgba(95, 50), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel_rgba(50, 50), Some([0, 0, 255, 255]));
    }

    #[test]
    fn png_encoding_produces_signature() {
        let surface = DrawingSurface::new(Size::new(4, 4)).unwrap();
        let bytes = surface.encode_png().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
