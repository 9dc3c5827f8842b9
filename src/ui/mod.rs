//! Drawing surface and caption rendering

pub mod renderer;
pub mod surface;

pub use renderer::{CaptionLayout, CaptionRenderer, RendererError};
pub use surface::{DrawingSurface, SurfaceError};
