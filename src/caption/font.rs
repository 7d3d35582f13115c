//! Caption fonts.
//!
//! Two implementations of [`CaptionFont`]:
//!
//! - [`TtfFont`]: a TrueType/OpenType file rendered with ab_glyph, with
//!   anti-aliased edges blended into the canvas.
//! - [`BitmapFont`]: the built-in Spleen 8x16 bitmap font. Always available,
//!   but characters outside its repertoire render as a hollow box.
//!
//! [`resolve_font`] walks a list of font files and falls back to the bitmap
//! font, so caption rendering never fails outright.

use ab_glyph::{Font, FontArc, GlyphId, OutlinedGlyph, PxScale, ScaleFont, point};
use image::{Rgb, RgbImage};
use spleen_font::{FONT_8X16, PSF2Font};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::style::Color;

/// Errors loading a font file.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Failed to read font: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid font data: {0}")]
    Invalid(#[from] ab_glyph::InvalidFont),
}

/// Size of a rendered piece of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub width: u32,
    pub height: u32,
}

/// Something that can measure and draw a single line of text.
///
/// `draw` must place the top-left corner of the box reported by `measure`
/// at `(x, y)`. Pixels falling outside the canvas are dropped.
pub trait CaptionFont: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn measure(&self, text: &str) -> TextBounds;

    fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Color);
}

/// Blend `color` over the canvas pixel at `(x, y)` with the given coverage.
fn blend(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    let a = coverage.clamp(0.0, 1.0);
    let px = canvas.get_pixel_mut(x as u32, y as u32);
    for (dst, src) in px.0.iter_mut().zip(color.0) {
        *dst = (*dst as f32 * (1.0 - a) + src as f32 * a).round() as u8;
    }
}

// ============================================================================
// TrueType
// ============================================================================

/// A scalable font loaded from a TrueType/OpenType file.
pub struct TtfFont {
    name: String,
    font: FontArc,
    scale: PxScale,
}

impl TtfFont {
    /// Load a font from raw file bytes, rendered at `pixel_height`.
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: Vec<u8>,
        pixel_height: f32,
    ) -> Result<Self, FontError> {
        Ok(Self {
            name: name.into(),
            font: FontArc::try_from_vec(bytes)?,
            scale: PxScale::from(pixel_height),
        })
    }

    /// Load a font file, rendered at `pixel_height`.
    pub fn from_file(path: &Path, pixel_height: f32) -> Result<Self, FontError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(path.display().to_string(), bytes, pixel_height)
    }

    /// Lay out `text` on a single line and outline every visible glyph.
    fn outline(&self, text: &str) -> Vec<OutlinedGlyph> {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = scaled.ascent();

        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;
        let mut outlined = Vec::new();

        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(g) = self.font.outline_glyph(glyph) {
                outlined.push(g);
            }
        }

        outlined
    }
}

/// Union of the pixel bounds of `glyphs` as `(min_x, min_y, max_x, max_y)`.
fn ink_box(glyphs: &[OutlinedGlyph]) -> Option<(f32, f32, f32, f32)> {
    glyphs.iter().map(|g| g.px_bounds()).fold(None, |acc, b| {
        Some(match acc {
            None => (b.min.x, b.min.y, b.max.x, b.max.y),
            Some((x0, y0, x1, y1)) => (
                x0.min(b.min.x),
                y0.min(b.min.y),
                x1.max(b.max.x),
                y1.max(b.max.y),
            ),
        })
    })
}

impl CaptionFont for TtfFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn measure(&self, text: &str) -> TextBounds {
        match ink_box(&self.outline(text)) {
            Some((x0, y0, x1, y1)) => TextBounds {
                width: (x1 - x0).ceil() as u32,
                height: (y1 - y0).ceil() as u32,
            },
            None => TextBounds::default(),
        }
    }

    fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Color) {
        let glyphs = self.outline(text);
        let Some((min_x, min_y, _, _)) = ink_box(&glyphs) else {
            return;
        };
        let color = color.to_rgb();

        for glyph in &glyphs {
            let bounds = glyph.px_bounds();
            let ox = x + (bounds.min.x - min_x) as i32;
            let oy = y + (bounds.min.y - min_y) as i32;
            glyph.draw(|gx, gy, coverage| {
                blend(canvas, ox + gx as i32, oy + gy as i32, color, coverage);
            });
        }
    }
}

// ============================================================================
// Built-in bitmap
// ============================================================================

/// The built-in Spleen 8x16 bitmap font.
///
/// Every character occupies a full 8x16 cell, so the measured box is the
/// cell box rather than the ink box.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl BitmapFont {
    pub const CELL_WIDTH: u32 = 8;
    pub const CELL_HEIGHT: u32 = 16;
}

/// Outline a cell for characters the bitmap font lacks.
fn draw_box(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    let w = BitmapFont::CELL_WIDTH as i32;
    let h = BitmapFont::CELL_HEIGHT as i32;
    for dx in 1..w - 1 {
        blend(canvas, x + dx, y + 2, color, 1.0);
        blend(canvas, x + dx, y + h - 3, color, 1.0);
    }
    for dy in 2..h - 2 {
        blend(canvas, x + 1, y + dy, color, 1.0);
        blend(canvas, x + w - 2, y + dy, color, 1.0);
    }
}

impl CaptionFont for BitmapFont {
    fn name(&self) -> &str {
        "spleen-8x16"
    }

    fn measure(&self, text: &str) -> TextBounds {
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return TextBounds::default();
        }
        TextBounds {
            width: chars * Self::CELL_WIDTH,
            height: Self::CELL_HEIGHT,
        }
    }

    fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Color) {
        let color = color.to_rgb();
        let mut spleen = PSF2Font::new(FONT_8X16).ok();

        for (i, ch) in text.chars().enumerate() {
            let cell_x = x + (i as u32 * Self::CELL_WIDTH) as i32;
            let utf8 = ch.to_string();

            let glyph = spleen
                .as_mut()
                .and_then(|font| font.glyph_for_utf8(utf8.as_bytes()));

            match glyph {
                Some(glyph) => {
                    for (row_y, row) in glyph.enumerate() {
                        for (col_x, on) in row.enumerate() {
                            if on {
                                blend(canvas, cell_x + col_x as i32, y + row_y as i32, color, 1.0);
                            }
                        }
                    }
                }
                None => draw_box(canvas, cell_x, y, color),
            }
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Pick the first loadable font in `paths`, else the built-in bitmap font.
pub fn resolve_font(paths: &[PathBuf], pixel_height: f32) -> Box<dyn CaptionFont> {
    for path in paths {
        match TtfFont::from_file(path, pixel_height) {
            Ok(font) => {
                tracing::info!(path = %path.display(), "using caption font");
                return Box::new(font);
            }
            Err(FontError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "caption font not present");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "skipping caption font: {}", e);
            }
        }
    }

    tracing::warn!("no TrueType caption font found, falling back to built-in bitmap font");
    Box::new(BitmapFont)
}
