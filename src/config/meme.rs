use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::core::Size;
use crate::domain::voice::Voice;

/// Font files tried, in order, when no explicit font path is configured
pub const DEFAULT_FONT_SEARCH_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\impact.ttf",
    "/Library/Fonts/Impact.ttf",
    "/System/Library/Fonts/Supplemental/Impact.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Impact.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/impact.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
];

/// Caption typography and anchoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Glyph size in pixels
    pub font_size: f32,
    /// Baseline of the top caption, measured from the top edge
    pub top_baseline: f32,
    /// Baseline of the bottom caption, measured up from the bottom edge
    pub bottom_offset: f32,
    pub fill: [u8; 4],
    pub stroke: [u8; 4],
    pub stroke_width: f32,
    /// Explicit font file; overrides the search list
    pub font_path: Option<PathBuf>,
    pub font_search_paths: Vec<PathBuf>,
}

impl CaptionConfig {
    pub const DEFAULT_FONT_SIZE: f32 = 48.0;
    pub const DEFAULT_TOP_BASELINE: f32 = 50.0;
    pub const DEFAULT_BOTTOM_OFFSET: f32 = 24.0;
    pub const MIN_FONT_SIZE: f32 = 4.0;
    pub const MAX_FONT_SIZE: f32 = 512.0;
    pub const MAX_STROKE_WIDTH: f32 = 32.0;

    /// Font files to try, explicit path first
    pub fn font_candidates(&self) -> Vec<PathBuf> {
        self.font_path
            .iter()
            .cloned()
            .chain(self.font_search_paths.iter().cloned())
            .collect()
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            font_size: Self::DEFAULT_FONT_SIZE,
            top_baseline: Self::DEFAULT_TOP_BASELINE,
            bottom_offset: Self::DEFAULT_BOTTOM_OFFSET,
            fill: [255, 255, 255, 255],
            stroke: [0, 0, 0, 255],
            stroke_width: 1.0,
            font_path: None,
            font_search_paths: DEFAULT_FONT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemeConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Accept canvases that are not square; parts of an image may then be clipped
    pub allow_non_square: bool,
    /// Fill colour behind the image (visible as letterbox bars)
    pub background: [u8; 4],
    pub caption: CaptionConfig,
    /// Initial slider position in `[0, 100]`
    pub default_volume: u8,
    /// Voices reported by the transcript speech platform
    pub voices: Vec<Voice>,
}

impl MemeConfig {
    pub const DEFAULT_CANVAS: u32 = 400;
    pub const MIN_CANVAS: u32 = 16;
    pub const MAX_CANVAS: u32 = 8192;

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Reads a JSON configuration file and validates it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses JSON; omitted fields take their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let mut config: MemeConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Clamps soft limits and rejects values the surface cannot honour
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        for (axis, value) in [("width", self.canvas_width), ("height", self.canvas_height)] {
            if !(Self::MIN_CANVAS..=Self::MAX_CANVAS).contains(&value) {
                return Err(ConfigError::CanvasOutOfRange {
                    axis,
                    value,
                    min: Self::MIN_CANVAS,
                    max: Self::MAX_CANVAS,
                });
            }
        }

        if self.canvas_width != self.canvas_height && !self.allow_non_square {
            return Err(ConfigError::NonSquareCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }

        let caption = &mut self.caption;
        if !caption.font_size.is_finite() {
            return Err(ConfigError::InvalidCaption("font_size must be finite".into()));
        }
        caption.font_size = caption
            .font_size
            .clamp(CaptionConfig::MIN_FONT_SIZE, CaptionConfig::MAX_FONT_SIZE);

        if !caption.stroke_width.is_finite() || caption.stroke_width < 0.0 {
            return Err(ConfigError::InvalidCaption(
                "stroke_width must be a non-negative number".into(),
            ));
        }
        caption.stroke_width = caption.stroke_width.min(CaptionConfig::MAX_STROKE_WIDTH);

        let height = self.canvas_height as f32;
        if !(0.0..=height).contains(&caption.top_baseline)
            || !(0.0..=height).contains(&caption.bottom_offset)
        {
            return Err(ConfigError::InvalidCaption(format!(
                "caption baselines must lie within the {}px canvas height",
                self.canvas_height
            )));
        }

        self.default_volume = self.default_volume.min(100);
        Ok(())
    }
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            canvas_width: Self::DEFAULT_CANVAS,
            canvas_height: Self::DEFAULT_CANVAS,
            allow_non_square: false,
            background: [0, 0, 0, 255],
            caption: CaptionConfig::default(),
            default_volume: 100,
            voices: vec![Voice::new("Transcript", "en-US").with_default(true)],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Canvas {axis} {value} outside supported range {min}..={max}")]
    CanvasOutOfRange { axis: &'static str, value: u32, min: u32, max: u32 },
    #[error("Canvas {width}x{height} is not square; set allow_non_square to accept clipping")]
    NonSquareCanvas { width: u32, height: u32 },
    #[error("Invalid caption settings: {0}")]
    InvalidCaption(String),
}
