//! # Persistence
//!
//! Writes the full-resolution image as PNG. PNG is lossless with no chroma
//! subsampling, so every module edge survives byte-for-byte.

use image::{ImageEncoder, ImageFormat, RgbImage};
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

/// `path` with `.png` appended when it has no extension.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

/// Save `img` as PNG at `path` and return the path actually written.
///
/// A missing extension becomes `.png`; any extension other than `.png` is
/// rejected. The parent directory must already exist.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<PathBuf, PersistenceError> {
    let path = with_default_extension(path);

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !ext.eq_ignore_ascii_case("png") {
        return Err(PersistenceError::UnsupportedFormat(ext));
    }

    img.save_with_format(&path, ImageFormat::Png)
        .map_err(|e| PersistenceError::WriteFailed(format!("{}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), width = img.width(), height = img.height(), "saved image");
    Ok(path)
}

/// Encode `img` to PNG bytes in memory.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, PersistenceError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e: image::ImageError| PersistenceError::WriteFailed(e.to_string()))?;

    Ok(png_bytes)
}
