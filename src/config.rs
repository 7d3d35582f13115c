//! # Render Configuration
//!
//! Settings that stay fixed across requests. Nothing is persisted; the CLI
//! builds a [`RenderConfig`] from its flags and hands it to the
//! [`Generator`](crate::pipeline::Generator).
//!
//! ```
//! use qrstamp::config::RenderConfig;
//!
//! let config = RenderConfig::default().prepend_fonts(["/opt/fonts/Inter.ttf"]);
//! assert_eq!(config.font_paths[0].to_str(), Some("/opt/fonts/Inter.ttf"));
//! assert_eq!(config.preview_max_dim, 250);
//! ```

use std::path::PathBuf;

use crate::matrix::EncodeProfile;
use crate::preview::DEFAULT_PREVIEW_MAX_DIM;

/// Conventional TrueType locations probed for the caption font, in order.
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    // Windows
    r"C:\Windows\Fonts\arial.ttf",
    r"C:\Windows\Fonts\ARIAL.TTF",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    // macOS
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// Caption font size in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Font files tried in order; the built-in bitmap font is the last resort.
    pub font_paths: Vec<PathBuf>,
    pub font_size: f32,
    /// Longest side of preview images.
    pub preview_max_dim: u32,
    pub profile: EncodeProfile,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_paths: DEFAULT_FONT_PATHS.iter().map(PathBuf::from).collect(),
            font_size: DEFAULT_FONT_SIZE,
            preview_max_dim: DEFAULT_PREVIEW_MAX_DIM,
            profile: EncodeProfile::DEFAULT,
        }
    }
}

impl RenderConfig {
    /// Put `paths` ahead of the current search list.
    pub fn prepend_fonts<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut font_paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        font_paths.append(&mut self.font_paths);
        self.font_paths = font_paths;
        self
    }

    /// Set the preview bound.
    pub fn preview_max_dim(mut self, max_dim: u32) -> Self {
        self.preview_max_dim = max_dim;
        self
    }
}
