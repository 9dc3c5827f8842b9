//! Domain logic and core data structures
//!
//! Pure types and calculations with no dependency on the raster backend,
//! image decoding or the speech platform.

pub mod caption;
pub mod core;
pub mod layout;
pub mod voice;
pub mod volume;
