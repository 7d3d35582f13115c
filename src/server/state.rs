//! Server state and configuration.

use crate::config::RenderConfig;
use crate::pipeline::Generator;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Font search list and preview bound
    pub render: RenderConfig,
}

/// Application state shared across handlers.
pub struct AppState {
    /// Read-only after startup; each request brings its own content and style.
    pub generator: Generator,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let generator = Generator::new(&config.render);
        Self { generator }
    }
}
