//! Core domain types and operations
//!
//! Pure geometric types shared by the layout engine, the state machine and
//! the rendering layer. Nothing in here knows about pixmaps or fonts.

/// Integer pixel dimensions of a canvas or a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    /// Creates a new size
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Returns true if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Width divided by height, or None for an empty size
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.w as f32 / self.h as f32)
        }
    }

    /// Returns the number of pixels covered
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
}

/// Rectangle at which a source image is drawn onto the surface
///
/// Coordinates are surface pixels. Values are fractional on purpose; the
/// raster backend decides how to sample partial pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub width: f32,
    pub height: f32,
    pub start_x: f32,
    pub start_y: f32,
}

impl Placement {
    /// Creates a placement from its four components
    pub fn new(width: f32, height: f32, start_x: f32, start_y: f32) -> Self {
        Self {
            width,
            height,
            start_x,
            start_y,
        }
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> f32 {
        self.start_x + self.width
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> f32 {
        self.start_y + self.height
    }

    /// Returns true if the placement lies entirely inside `canvas`
    pub fn is_contained_in(&self, canvas: Size) -> bool {
        self.start_x >= 0.0
            && self.start_y >= 0.0
            && self.width <= canvas.w as f32
            && self.height <= canvas.h as f32
            && self.right() <= canvas.w as f32
            && self.bottom() <= canvas.h as f32
    }

    /// Returns true if the placement spans the whole canvas width
    pub fn fills_width(&self, canvas: Size) -> bool {
        self.width == canvas.w as f32
    }

    /// Returns true if the placement spans the whole canvas height
    pub fn fills_height(&self, canvas: Size) -> bool {
        self.height == canvas.h as f32
    }

    /// Horizontal and vertical scale factors from `source` to this placement
    pub fn scale_from(&self, source: Size) -> (f32, f32) {
        (
            self.width / source.w.max(1) as f32,
            self.height / source.h.max(1) as f32,
        )
    }
}
