//! Configuration module for meme-maker
//!
//! Canvas dimensions, caption typography and speech defaults. Everything
//! has a built-in default; a JSON file may override any subset.

pub mod meme;

pub use meme::{CaptionConfig, ConfigError, MemeConfig};
