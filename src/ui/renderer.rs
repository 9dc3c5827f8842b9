//! Caption rendering
//!
//! Lays out the two caption lines against the canvas and rasterises them
//! with ab_glyph outlines filled and stroked through tiny-skia. Layout is
//! kept separate from rendering so it can be tested without a font.

use std::path::PathBuf;

use ab_glyph::{Font, FontArc, GlyphId, Outline, OutlineCurve, Point, PxScale, ScaleFont};
use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::config::CaptionConfig;
use crate::domain::caption::CaptionPair;
use crate::domain::core::Size;
use crate::ui::surface::color_from_rgba;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("No caption font is loaded")]
    NoFont,

    #[error("Failed to read font file {path}: {source}")]
    FontRead {
        path: String,
        source: std::io::Error,
    },

    #[error("File {path} is not a usable font")]
    InvalidFont { path: String },
}

/// Which caption a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionSlot {
    Top,
    Bottom,
}

/// One caption line anchored at its horizontal centre and baseline
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLine {
    pub slot: CaptionSlot,
    pub text: String,
    pub center_x: f32,
    pub baseline_y: f32,
}

/// Pre-calculated caption placement for one canvas
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLayout {
    /// Non-empty caption lines, top first
    pub lines: Vec<CaptionLine>,
    pub font_size: f32,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

impl CaptionLayout {
    /// Anchors the captions: both centred, top at a fixed offset from the
    /// top edge and bottom at a fixed offset from the bottom edge
    pub fn from_captions(captions: &CaptionPair, canvas: Size, style: &CaptionConfig) -> Self {
        let center_x = canvas.w as f32 / 2.0;
        let slots = [
            (CaptionSlot::Top, &captions.top, style.top_baseline),
            (
                CaptionSlot::Bottom,
                &captions.bottom,
                canvas.h as f32 - style.bottom_offset,
            ),
        ];

        let lines = slots
            .into_iter()
            .filter(|(_, text, _)| !text.is_empty())
            .map(|(slot, text, baseline_y)| CaptionLine {
                slot,
                text: text.clone(),
                center_x,
                baseline_y,
            })
            .collect();

        Self {
            lines,
            font_size: style.font_size,
            fill: color_from_rgba(style.fill),
            stroke: color_from_rgba(style.stroke),
            stroke_width: style.stroke_width,
        }
    }
}

/// Draws caption layouts onto a pixmap
#[derive(Debug, Clone, Default)]
pub struct CaptionRenderer {
    font: Option<FontArc>,
}

impl CaptionRenderer {
    pub fn new(font: Option<FontArc>) -> Self {
        Self { font }
    }

    /// Loads the first usable font among `candidates`
    ///
    /// Missing files are skipped quietly. If nothing loads, the renderer is
    /// created without a font and captions will not be drawn.
    pub fn load(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_font(path) {
                Ok(font) => {
                    log::info!("Using caption font {}", path.display());
                    return Self::new(Some(font));
                }
                Err(e) => log::warn!("Skipping font: {}", e),
            }
        }

        log::warn!("No caption font found; captions will not be rendered");
        Self::new(None)
    }

    /// Reads and parses a single font file
    pub fn load_font(path: &std::path::Path) -> Result<FontArc, RendererError> {
        let bytes = std::fs::read(path).map_err(|source| RendererError::FontRead {
            path: path.display().to_string(),
            source,
        })?;
        FontArc::try_from_vec(bytes).map_err(|_| RendererError::InvalidFont {
            path: path.display().to_string(),
        })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Advance width of `text` at `font_size`, kerning included
    pub fn measure(&self, text: &str, font_size: f32) -> Option<f32> {
        let font = self.font.as_ref()?;
        let scaled = font.as_scaled(PxScale::from(font_size));

        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        Some(width)
    }

    /// Fills and then outlines every line of `layout`
    pub fn render(&self, pixmap: &mut Pixmap, layout: &CaptionLayout) -> Result<(), RendererError> {
        let font = self.font.as_ref().ok_or(RendererError::NoFont)?;

        let mut fill = Paint::default();
        fill.set_color(layout.fill);
        fill.anti_alias = true;

        let mut outline = Paint::default();
        outline.set_color(layout.stroke);
        outline.anti_alias = true;

        let stroke = Stroke {
            width: layout.stroke_width,
            ..Stroke::default()
        };

        let paths: Vec<Path> = layout
            .lines
            .iter()
            .filter_map(|line| self.line_path(font, line, layout.font_size))
            .collect();

        for path in &paths {
            pixmap.fill_path(path, &fill, FillRule::Winding, Transform::identity(), None);
        }
        if layout.stroke_width > 0.0 {
            for path in &paths {
                pixmap.stroke_path(path, &outline, &stroke, Transform::identity(), None);
            }
        }

        Ok(())
    }

    /// Builds the outline path of one centred line, None if it has no ink
    fn line_path(&self, font: &FontArc, line: &CaptionLine, font_size: f32) -> Option<Path> {
        let width = self.measure(&line.text, font_size)?;
        let scaled = font.as_scaled(PxScale::from(font_size));
        let (scale_x, scale_y) = (scaled.h_scale_factor(), scaled.v_scale_factor());

        let mut builder = PathBuilder::new();
        let mut caret = line.center_x - width / 2.0;
        let mut previous: Option<GlyphId> = None;

        for ch in line.text.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            if let Some(glyph) = font.outline(id) {
                append_outline(
                    &mut builder,
                    &glyph,
                    caret,
                    line.baseline_y,
                    scale_x,
                    scale_y,
                );
            }
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        builder.finish()
    }
}

/// Appends one glyph outline, converting font units (y up) to surface
/// pixels (y down) at the given pen position
fn append_outline(
    builder: &mut PathBuilder,
    outline: &Outline,
    origin_x: f32,
    baseline_y: f32,
    scale_x: f32,
    scale_y: f32,
) {
    let map = |p: Point| (origin_x + p.x * scale_x, baseline_y - p.y * scale_y);
    let mut last: Option<Point> = None;

    for curve in &outline.curves {
        let start = match curve {
            OutlineCurve::Line(p0, _)
            | OutlineCurve::Quad(p0, _, _)
            | OutlineCurve::Cubic(p0, _, _, _) => *p0,
        };

        // A discontinuity starts a new contour
        if last != Some(start) {
            if last.is_some() {
                builder.close();
            }
            let (x, y) = map(start);
            builder.move_to(x, y);
        }

        let end = match curve {
            OutlineCurve::Line(_, p1) => {
                let (x, y) = map(*p1);
                builder.line_to(x, y);
                *p1
            }
            OutlineCurve::Quad(_, c, p2) => {
                let (cx, cy) = map(*c);
                let (x, y) = map(*p2);
                builder.quad_to(cx, cy, x, y);
                *p2
            }
            OutlineCurve::Cubic(_, c1, c2, p3) => {
                let (c1x, c1y) = map(*c1);
                let (c2x, c2y) = map(*c2);
                let (x, y) = map(*p3);
                builder.cubic_to(c1x, c1y, c2x, c2y, x, y);
                *p3
            }
        };
        last = Some(end);
    }

    if last.is_some() {
        builder.close();
    }
}
