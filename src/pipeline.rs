//! # Generation Pipeline
//!
//! ```text
//! ContentSpec ─► build_payload ─► encoder ─► rasterize ─► add_caption ─► Generated
//!                                                                          │
//!                                                    ┌─────────────────────┤
//!                                                    ▼                     ▼
//!                                              scale_preview          save_png
//! ```
//!
//! A [`Generator`] owns the long-lived collaborators (block-code encoder,
//! caption font) and is shared read-only between requests. Everything that
//! varies per request comes in through [`ContentSpec`] and [`StyleSpec`].

use image::RgbImage;

use crate::caption::{self, CaptionFont, resolve_font};
use crate::config::RenderConfig;
use crate::error::QrStampError;
use crate::matrix::{self, EncodeProfile, MatrixEncoder, QrCodeEncoder};
use crate::payload::{ContentSpec, build_payload};
use crate::preview::scale_preview;
use crate::style::StyleSpec;

/// The full-resolution result of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// Exact text encoded in the symbol.
    pub payload: String,
    /// QR code plus caption strip, if any.
    pub image: RgbImage,
}

pub struct Generator {
    encoder: Box<dyn MatrixEncoder>,
    font: Box<dyn CaptionFont>,
    profile: EncodeProfile,
    preview_max_dim: u32,
}

impl Generator {
    /// Build a generator with the `qrcode` encoder and the first caption
    /// font that loads from `config.font_paths`.
    pub fn new(config: &RenderConfig) -> Self {
        let font = resolve_font(&config.font_paths, config.font_size);
        Self::with_parts(Box::new(QrCodeEncoder), font, config)
    }

    /// Build a generator from explicit collaborators.
    pub fn with_parts(
        encoder: Box<dyn MatrixEncoder>,
        font: Box<dyn CaptionFont>,
        config: &RenderConfig,
    ) -> Self {
        Self {
            encoder,
            font,
            profile: config.profile,
            preview_max_dim: config.preview_max_dim,
        }
    }

    /// Name of the caption font in use.
    pub fn font_name(&self) -> &str {
        self.font.name()
    }

    /// Run the pipeline for one request.
    ///
    /// Validation happens first; no encoding is attempted for invalid
    /// content.
    pub fn generate(
        &self,
        content: &ContentSpec,
        style: &StyleSpec,
    ) -> Result<Generated, QrStampError> {
        let payload = build_payload(content)?;
        tracing::debug!(kind = content.kind_name(), "built payload");

        let image = matrix::encode_with(
            self.encoder.as_ref(),
            &self.profile,
            &payload,
            style.foreground,
            style.background,
        )?;

        let image = caption::add_caption(
            image,
            &style.caption,
            self.font.as_ref(),
            style.text_color(),
            style.background,
        );

        tracing::info!(
            kind = content.kind_name(),
            width = image.width(),
            height = image.height(),
            "generated QR code"
        );

        Ok(Generated { payload, image })
    }

    /// Bounded-size copy of `generated` for display.
    pub fn preview(&self, generated: &Generated) -> RgbImage {
        scale_preview(&generated.image, self.preview_max_dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::{BitmapFont, TextBounds};
    use crate::error::{EncodingError, ValidationError};
    use crate::matrix::{ErrorCorrection, ModuleMatrix};
    use crate::style::Color;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn generator() -> Generator {
        Generator::with_parts(
            Box::new(QrCodeEncoder),
            Box::new(BitmapFont),
            &RenderConfig::default(),
        )
    }

    /// Encoder that records calls and returns a fixed 21x21 blank matrix.
    #[derive(Default)]
    struct CountingEncoder {
        calls: AtomicUsize,
        last_level: Mutex<Option<ErrorCorrection>>,
    }

    impl MatrixEncoder for CountingEncoder {
        fn encode(&self, _: &str, level: ErrorCorrection) -> Result<ModuleMatrix, EncodingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_level.lock().unwrap() = Some(level);
            Ok(ModuleMatrix::from_modules(1, 21, vec![false; 21 * 21]).unwrap())
        }
    }

    impl MatrixEncoder for std::sync::Arc<CountingEncoder> {
        fn encode(&self, payload: &str, level: ErrorCorrection) -> Result<ModuleMatrix, EncodingError> {
            self.as_ref().encode(payload, level)
        }
    }

    #[test]
    fn test_generate_without_caption() {
        let g = generator();
        let out = g
            .generate(
                &ContentSpec::Link {
                    value: "https://example.com".into(),
                },
                &StyleSpec::default(),
            )
            .unwrap();
        assert_eq!(out.payload, "https://example.com");
        assert_eq!(out.image.width(), out.image.height());
    }

    #[test]
    fn test_generate_with_caption_is_taller() {
        let g = generator();
        let content = ContentSpec::Phone { value: "123".into() };
        let plain = g.generate(&content, &StyleSpec::default()).unwrap();
        let captioned = g
            .generate(&content, &StyleSpec::default().caption("Ligue já"))
            .unwrap();

        assert_eq!(captioned.payload, "tel:123");
        assert_eq!(captioned.image.width(), plain.image.width());
        assert_eq!(
            captioned.image.height(),
            plain.image.height() + BitmapFont.measure("Ligue já").height + 24
        );
    }

    #[test]
    fn test_validation_blocks_encoding() {
        let encoder = std::sync::Arc::new(CountingEncoder::default());
        let g = Generator::with_parts(
            Box::new(encoder.clone()),
            Box::new(BitmapFont),
            &RenderConfig::default(),
        );

        let err = g
            .generate(
                &ContentSpec::Location {
                    latitude: "-23.5".into(),
                    longitude: "".into(),
                },
                &StyleSpec::default(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            QrStampError::Validation(ValidationError::MissingField("longitude"))
        ));
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);

        g.generate(&ContentSpec::FreeText { value: "ok".into() }, &StyleSpec::default())
            .unwrap();
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*encoder.last_level.lock().unwrap(), Some(ErrorCorrection::High));
    }

    #[test]
    fn test_payload_too_large_surfaces() {
        let err = generator()
            .generate(
                &ContentSpec::FreeText {
                    value: "q".repeat(4000),
                },
                &StyleSpec::default(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            QrStampError::Encoding(EncodingError::PayloadTooLarge)
        ));
    }

    #[test]
    fn test_caption_color_override() {
        struct SolidFont;
        impl CaptionFont for SolidFont {
            fn name(&self) -> &str {
                "solid"
            }
            fn measure(&self, _: &str) -> TextBounds {
                TextBounds {
                    width: 4,
                    height: 4,
                }
            }
            fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, _: &str, color: Color) {
                canvas.put_pixel(x as u32, y as u32, color.to_rgb());
            }
        }

        let g = Generator::with_parts(
            Box::new(QrCodeEncoder),
            Box::new(SolidFont),
            &RenderConfig::default(),
        );
        let red = Color::rgb(255, 0, 0);
        let style = StyleSpec {
            caption: "x".into(),
            caption_color: Some(red),
            ..StyleSpec::default()
        };
        let out = g
            .generate(&ContentSpec::Link { value: "a".into() }, &style)
            .unwrap();

        let w = out.image.width();
        let qr_side = out.image.height() - 4 - 24;
        let origin = ((w - 4) / 2, qr_side + 12);
        assert_eq!(*out.image.get_pixel(origin.0, origin.1), red.to_rgb());
    }

    #[test]
    fn test_preview_is_bounded() {
        let g = generator();
        let out = g
            .generate(
                &ContentSpec::Email {
                    value: "someone@example.com".into(),
                },
                &StyleSpec::default().caption("contato"),
            )
            .unwrap();
        let preview = g.preview(&out);
        assert_eq!(preview.height(), 250);
        assert!(preview.width() < 250);
    }
}
