//! Image-fit layout calculation
//!
//! Maps a canvas size and a source image size to the rectangle the image is
//! drawn at. One axis fills the canvas, the other is centred. The image is
//! never cropped or distorted.

use thiserror::Error;

use crate::domain::core::{Placement, Size};

/// Errors produced by the layout engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Invalid dimensions: canvas {canvas_w}x{canvas_h}, image {image_w}x{image_h}")]
    InvalidDimensions {
        canvas_w: u32,
        canvas_h: u32,
        image_w: u32,
        image_h: u32,
    },
}

/// Computes where `image` should be drawn on `canvas`
///
/// Portrait images (aspect ratio below 1) take the full canvas height and
/// are centred horizontally. Landscape and square images take the full
/// canvas width and are centred vertically. No rounding is applied.
///
/// # Example
/// ```rust
/// use meme_maker::domain::core::{Placement, Size};
/// use meme_maker::domain::layout::fit;
///
/// let placement = fit(Size::new(400, 400), Size::new(800, 400)).unwrap();
/// assert_eq!(placement, Placement::new(400.0, 200.0, 0.0, 100.0));
/// ```
pub fn fit(canvas: Size, image: Size) -> Result<Placement, LayoutError> {
    let invalid = || LayoutError::InvalidDimensions {
        canvas_w: canvas.w,
        canvas_h: canvas.h,
        image_w: image.w,
        image_h: image.h,
    };

    if canvas.is_empty() {
        return Err(invalid());
    }
    let aspect = image.aspect_ratio().ok_or_else(invalid)?;

    let canvas_w = canvas.w as f32;
    let canvas_h = canvas.h as f32;

    let placement = if aspect < 1.0 {
        let width = canvas_h * aspect;
        Placement::new(width, canvas_h, (canvas_w - width) / 2.0, 0.0)
    } else {
        let height = canvas_w / aspect;
        Placement::new(canvas_w, height, 0.0, (canvas_h - height) / 2.0)
    };

    Ok(placement)
}
