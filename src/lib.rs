//! meme-maker: caption an image and read the captions aloud
//!
//! The crate is split the same way the application is layered:
//!
//! - [`domain`]: pure types, the image-fit layout and caption/voice/volume logic
//! - [`app`]: the UI state machine and the controller applying its effects
//! - [`ui`]: the tiny-skia drawing surface and ab_glyph caption renderer
//! - [`platform`]: image decoding and the speech synthesis boundary
//! - [`config`]: canvas and caption settings

pub mod app;
pub mod config;
pub mod domain;
pub mod platform;
pub mod ui;

pub use app::controller::{AppError, MemeController};
pub use app::state::{Effect, Enablement, StateEvent, StateMachine, UiState};
pub use config::MemeConfig;
pub use domain::core::{Placement, Size};
pub use domain::layout::fit;
