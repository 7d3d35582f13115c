//! # Caption Compositor
//!
//! Extends a barcode image downwards and draws a centered caption in the new
//! strip.
//!
//! ```text
//! ┌───────────────┐
//! │               │
//! │   QR (W × H)  │
//! │               │
//! ├───────────────┤  ← y = H
//! │   margin 12   │
//! │    caption    │  ← text box h, x = (W - w) / 2
//! │   margin 12   │
//! └───────────────┘  height = H + h + 24
//! ```

pub mod font;

pub use font::{BitmapFont, CaptionFont, TextBounds, TtfFont, resolve_font};

use image::{RgbImage, imageops};

use crate::style::Color;

/// Blank space above and below the caption, in pixels.
pub const CAPTION_MARGIN: u32 = 12;

/// Append `text` beneath `img`.
///
/// Returns `img` untouched when `text` is blank. Otherwise the result keeps
/// the original width, grows by `text height + 2 × CAPTION_MARGIN`, and holds
/// the original pixels unchanged in its top-left region.
///
/// The caption is measured and drawn with the same `font`. Text wider than
/// the image is centered and clipped on both sides.
pub fn add_caption(
    img: RgbImage,
    text: &str,
    font: &dyn CaptionFont,
    text_color: Color,
    background: Color,
) -> RgbImage {
    let text = text.trim();
    if text.is_empty() {
        return img;
    }

    let bounds = font.measure(text);
    let (width, height) = img.dimensions();
    let extra = bounds.height + 2 * CAPTION_MARGIN;

    let mut canvas = RgbImage::from_pixel(width, height + extra, background.to_rgb());
    imageops::replace(&mut canvas, &img, 0, 0);

    // Floor division, so an odd leftover puts the extra pixel on the right
    let x = (width as i64 - bounds.width as i64).div_euclid(2);
    let y = (height + CAPTION_MARGIN) as i64;

    tracing::debug!(
        font = font.name(),
        text_width = bounds.width,
        text_height = bounds.height,
        "drawing caption"
    );
    font.draw(&mut canvas, x as i32, y as i32, text, text_color);

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix;

    /// Fixed-metric font: every character is a solid 10x10 block.
    struct BlockFont;

    impl CaptionFont for BlockFont {
        fn name(&self) -> &str {
            "block"
        }

        fn measure(&self, text: &str) -> TextBounds {
            TextBounds {
                width: 10 * text.chars().count() as u32,
                height: 10,
            }
        }

        fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Color) {
            let w = self.measure(text).width as i32;
            for py in y..y + 10 {
                for px in x..x + w {
                    if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height() {
                        canvas.put_pixel(px as u32, py as u32, color.to_rgb());
                    }
                }
            }
        }
    }

    fn sample() -> RgbImage {
        matrix::encode("caption test", Color::BLACK, Color::WHITE).unwrap()
    }

    #[test]
    fn test_blank_caption_is_noop() {
        let img = sample();
        for text in ["", "   ", "\t\n"] {
            let out = add_caption(img.clone(), text, &BlockFont, Color::BLACK, Color::WHITE);
            assert_eq!(out, img);
        }
    }

    #[test]
    fn test_caption_extends_height_only() {
        let img = sample();
        let (w, h) = img.dimensions();
        let out = add_caption(img, "Hello", &BlockFont, Color::BLACK, Color::WHITE);
        assert_eq!(out.width(), w);
        assert_eq!(out.height(), h + 10 + 24);
    }

    #[test]
    fn test_original_pixels_preserved() {
        let img = sample();
        let (w, h) = img.dimensions();
        let out = add_caption(img.clone(), "Hello", &BlockFont, Color::BLACK, Color::WHITE);

        let top = imageops::crop_imm(&out, 0, 0, w, h).to_image();
        assert_eq!(top, img);
    }

    #[test]
    fn test_caption_is_centered_with_floor() {
        // 201 wide canvas, 30 wide text → x = 85 (171 / 2 floored)
        let img = RgbImage::from_pixel(201, 50, Color::WHITE.to_rgb());
        let red = Color::rgb(255, 0, 0);
        let out = add_caption(img, "abc", &BlockFont, red, Color::WHITE);

        let y = 50 + CAPTION_MARGIN;
        assert_eq!(*out.get_pixel(84, y), Color::WHITE.to_rgb());
        assert_eq!(*out.get_pixel(85, y), red.to_rgb());
        assert_eq!(*out.get_pixel(114, y), red.to_rgb());
        assert_eq!(*out.get_pixel(115, y), Color::WHITE.to_rgb());

        // Margins above and below the text stay background
        assert_eq!(*out.get_pixel(100, y - 1), Color::WHITE.to_rgb());
        assert_eq!(*out.get_pixel(100, y + 10), Color::WHITE.to_rgb());
        assert_eq!(out.height(), 50 + 10 + 2 * CAPTION_MARGIN);
    }

    #[test]
    fn test_caption_strip_uses_background_color() {
        let bg = Color::rgb(255, 255, 200);
        let img = RgbImage::from_pixel(100, 100, bg.to_rgb());
        let out = add_caption(img, "x", &BlockFont, Color::BLACK, bg);
        assert_eq!(*out.get_pixel(0, 100), bg.to_rgb());
        assert_eq!(*out.get_pixel(99, out.height() - 1), bg.to_rgb());
    }

    #[test]
    fn test_caption_text_is_trimmed() {
        let img = RgbImage::from_pixel(100, 40, Color::WHITE.to_rgb());
        let padded = add_caption(img.clone(), "  ab  ", &BlockFont, Color::BLACK, Color::WHITE);
        let plain = add_caption(img, "ab", &BlockFont, Color::BLACK, Color::WHITE);
        assert_eq!(padded, plain);
    }

    #[test]
    fn test_wide_caption_is_clipped() {
        let img = RgbImage::from_pixel(20, 20, Color::WHITE.to_rgb());
        let out = add_caption(img, "much too wide", &BlockFont, Color::BLACK, Color::WHITE);
        assert_eq!(out.dimensions(), (20, 20 + 10 + 24));
        assert_eq!(*out.get_pixel(0, 20 + CAPTION_MARGIN), Color::BLACK.to_rgb());
        assert_eq!(*out.get_pixel(19, 20 + CAPTION_MARGIN), Color::BLACK.to_rgb());
    }

    #[test]
    fn test_bitmap_font_caption_height() {
        let img = sample();
        let h = img.height();
        let out = add_caption(img, "Wi-Fi de casa", &BitmapFont, Color::BLACK, Color::WHITE);
        assert_eq!(out.height(), h + BitmapFont::CELL_HEIGHT + 2 * CAPTION_MARGIN);
    }
}
