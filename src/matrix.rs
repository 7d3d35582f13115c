//! # Matrix Encoder
//!
//! Turns a payload into a QR module grid and rasterizes it.
//!
//! The block-code construction sits behind the [`MatrixEncoder`] trait so the
//! rest of the pipeline only deals with a plain [`ModuleMatrix`]. The default
//! implementation, [`QrCodeEncoder`], delegates to the `qrcode` crate.
//!
//! ## Committed defaults
//!
//! | Setting | Value |
//! |---------|-------|
//! | Error correction | H (~30% damage tolerated) |
//! | Module size | 8 px |
//! | Quiet zone | 2 modules |
//! | Version | smallest that fits |
//!
//! ```text
//! side = module_size × (modules + 2 × quiet_zone)
//! version 1 → 8 × (21 + 4) = 200 px
//! ```

use image::RgbImage;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

use crate::error::EncodingError;
use crate::style::Color;

/// Error-correction level, traded against capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrection {
    /// ~7% recovery
    Low,
    /// ~15% recovery
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// Square grid of QR modules, `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    version: i16,
    width: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Build a matrix from row-major module values.
    ///
    /// Returns `None` if `modules` is not `width * width` long.
    pub fn from_modules(version: i16, width: usize, modules: Vec<bool>) -> Option<Self> {
        (modules.len() == width * width).then_some(Self {
            version,
            width,
            modules,
        })
    }

    /// Symbol version (1-40 for standard QR).
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Modules per side, excluding the quiet zone.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }
}

/// A block-code encoder producing module grids.
pub trait MatrixEncoder: Send + Sync {
    fn encode(&self, payload: &str, level: ErrorCorrection) -> Result<ModuleMatrix, EncodingError>;
}

/// [`MatrixEncoder`] backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl MatrixEncoder for QrCodeEncoder {
    fn encode(&self, payload: &str, level: ErrorCorrection) -> Result<ModuleMatrix, EncodingError> {
        let code = QrCode::with_error_correction_level(payload, level.into()).map_err(|e| match e {
            QrError::DataTooLong => EncodingError::PayloadTooLarge,
            other => EncodingError::UnsupportedContent(other.to_string()),
        })?;

        let version = match code.version() {
            qrcode::Version::Normal(v) | qrcode::Version::Micro(v) => v,
        };
        let width = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();

        Ok(ModuleMatrix {
            version,
            width,
            modules,
        })
    }
}

/// Encoding parameters shared by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeProfile {
    pub error_correction: ErrorCorrection,
    /// Pixels per module side.
    pub module_size: u32,
    /// Blank border width, in modules.
    pub quiet_zone: u32,
}

impl EncodeProfile {
    pub const DEFAULT: EncodeProfile = EncodeProfile {
        error_correction: ErrorCorrection::High,
        module_size: 8,
        quiet_zone: 2,
    };

    /// Pixels per module side, never less than one.
    pub fn cell_px(&self) -> u32 {
        self.module_size.max(1)
    }

    /// Side length in pixels of a rasterized matrix of `modules` per side.
    pub fn side_px(&self, modules: usize) -> u32 {
        self.cell_px() * (modules as u32 + 2 * self.quiet_zone)
    }
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Paint `matrix` into an RGB image: dark modules in `fg`, everything else
/// (light modules and the quiet zone) in `bg`.
pub fn rasterize(matrix: &ModuleMatrix, profile: &EncodeProfile, fg: Color, bg: Color) -> RgbImage {
    let side = profile.side_px(matrix.width());
    let cell = profile.cell_px();
    let border = profile.quiet_zone * cell;

    let mut img = RgbImage::from_pixel(side, side, bg.to_rgb());
    let fg = fg.to_rgb();

    for qy in 0..matrix.width() {
        for qx in 0..matrix.width() {
            if !matrix.is_dark(qx, qy) {
                continue;
            }
            let px0 = border + qx as u32 * cell;
            let py0 = border + qy as u32 * cell;
            for cy in 0..cell {
                for cx in 0..cell {
                    img.put_pixel(px0 + cx, py0 + cy, fg);
                }
            }
        }
    }

    img
}

/// Encode `payload` with `encoder` and rasterize it using `profile`.
pub fn encode_with(
    encoder: &dyn MatrixEncoder,
    profile: &EncodeProfile,
    payload: &str,
    fg: Color,
    bg: Color,
) -> Result<RgbImage, EncodingError> {
    let matrix = encoder.encode(payload, profile.error_correction)?;
    tracing::debug!(
        version = matrix.version(),
        modules = matrix.width(),
        "encoded payload of {} bytes",
        payload.len()
    );
    Ok(rasterize(&matrix, profile, fg, bg))
}

/// Encode `payload` as a QR code with the committed defaults.
pub fn encode(payload: &str, fg: Color, bg: Color) -> Result<RgbImage, EncodingError> {
    encode_with(&QrCodeEncoder, &EncodeProfile::DEFAULT, payload, fg, bg)
}
