//! # qrstamp - Captioned QR Code Generator
//!
//! qrstamp turns a structured description of some content (a link, a phone
//! number, Wi-Fi credentials, a map location, ...) into a QR code image. It
//! provides:
//!
//! - **Payloads**: the conventional text format for each content kind
//! - **Encoding**: high error correction, 8 px modules, 2-module quiet zone
//! - **Captions**: optional text strip centered beneath the code
//! - **Previews**: aspect-preserving, bounded-size copies for display
//! - **Persistence**: PNG files and in-memory PNG bytes
//!
//! ## Quick Start
//!
//! ```no_run
//! use qrstamp::{ContentSpec, Generator, StyleSpec, config::RenderConfig, persist};
//!
//! let generator = Generator::new(&RenderConfig::default());
//!
//! let content = ContentSpec::Link {
//!     value: "https://example.com".to_string(),
//! };
//! let style = StyleSpec::default().caption("Scan me");
//!
//! let generated = generator.generate(&content, &style)?;
//! persist::save_png(&generated.image, "qrcode.png".as_ref())?;
//!
//! # Ok::<(), qrstamp::QrStampError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`payload`] | Content kinds and payload text |
//! | [`matrix`] | QR symbol encoding and rasterization |
//! | [`caption`] | Caption strip and fonts |
//! | [`preview`] | Bounded-size scaling |
//! | [`persist`] | PNG output |
//! | [`pipeline`] | The generator tying the stages together |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod caption;
pub mod config;
pub mod error;
pub mod logger;
pub mod matrix;
pub mod payload;
pub mod persist;
pub mod pipeline;
pub mod preview;
pub mod server;
pub mod style;

// Re-exports for convenience
pub use error::QrStampError;
pub use payload::{ContentSpec, WifiSecurity};
pub use pipeline::{Generated, Generator};
pub use style::{Color, StyleSpec};
