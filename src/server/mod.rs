//! # HTTP Server for QR Generation
//!
//! JSON in, PNG out. Every request carries its own content and style, so
//! requests never share mutable state.
//!
//! ## Usage
//!
//! ```bash
//! qrstamp serve --listen 0.0.0.0:8080
//!
//! curl -X POST localhost:8080/api/qr/image \
//!   -H 'content-type: application/json' \
//!   -d '{"content": {"type": "wifi", "ssid": "Home", "password": "pw1"},
//!        "style": {"caption": "Guest Wi-Fi"}}' \
//!   -o wifi.png
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/api/qr/types` | JSON list of content types |
//! | POST | `/api/qr/preview` | preview PNG (bounded size) |
//! | POST | `/api/qr/image` | full-resolution PNG |

mod handlers;
mod state;

pub use state::ServerConfig;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::QrStampError;
use state::AppState;

/// Build the router with its shared state.
pub fn router(config: ServerConfig) -> Router {
    let app_state = Arc::new(AppState::new(config));

    Router::new()
        .route("/api/qr/types", get(handlers::qr::types))
        .route("/api/qr/preview", post(handlers::qr::preview))
        .route("/api/qr/image", post(handlers::qr::image))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use qrstamp::config::RenderConfig;
/// use qrstamp::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), qrstamp::QrStampError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     render: RenderConfig::default(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), QrStampError> {
    let listen_addr = config.listen_addr.clone();
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| QrStampError::Server(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    tracing::info!(addr = %listen_addr, "qrstamp HTTP server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| QrStampError::Server(e.to_string()))?;

    Ok(())
}
