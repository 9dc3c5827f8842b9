//! Image decoding
//!
//! Turns user-selected bytes into a premultiplied tiny-skia pixmap that
//! the drawing surface can sample from.

use std::path::Path;

use thiserror::Error;
use tiny_skia::{IntSize, Pixmap};

use crate::domain::core::Size;

/// Image decoding errors
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read image file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Unsupported or corrupt image data: {0}")]
    Format(#[from] image::ImageError),

    #[error("Image has zero dimensions: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Failed to create pixmap for a {width}x{height} image")]
    PixmapCreationFailed { width: u32, height: u32 },
}

/// A decoded source image with its natural dimensions
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixmap: Pixmap,
}

impl SourceImage {
    /// Wraps an existing premultiplied pixmap
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    /// Intrinsic pixel dimensions
    pub fn natural_size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// Decodes an encoded image (PNG, JPEG, GIF, BMP, WebP) from memory
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    let size = IntSize::from_wh(width, height).ok_or(DecodeError::EmptyImage { width, height })?;

    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);

    let pixmap =
        Pixmap::from_vec(data, size).ok_or(DecodeError::PixmapCreationFailed { width, height })?;

    log::debug!("Decoded {}x{} image", width, height);
    Ok(SourceImage::from_pixmap(pixmap))
}

/// Reads and decodes an image file
pub fn load_image(path: &Path) -> Result<SourceImage, DecodeError> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    decode_image(&bytes)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn encode_png(img: image::RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decode_png_keeps_natural_size() {
        let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([10, 20, 30, 255]));
        let source = decode_image(&encode_png(img)).unwrap();

        assert_eq!(source.natural_size(), Size::new(8, 4));
        let px = source.pixmap().pixel(0, 0).unwrap();
        assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (10, 20, 30, 255));
    }

    #[test]
    fn decode_premultiplies_alpha() {
        let img = image::RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
        let source = decode_image(&encode_png(img)).unwrap();

        let px = source.pixmap().pixel(0, 0).unwrap();
        assert_eq!(px.red(), ((100u16 * 128 + 127) / 255) as u8);
        assert_eq!(px.green(), ((50u16 * 128 + 127) / 255) as u8);
        assert_eq!(px.blue(), ((200u16 * 128 + 127) / 255) as u8);
        assert_eq!(px.alpha(), 128);
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DecodeError::Format(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_image(Path::new("/nonexistent/meme.png")).unwrap_err();
        assert!(matches!(err, DecodeError::Io { .. }));
    }
}
