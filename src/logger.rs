//! `tracing` setup for the CLI, the HTTP server and tests.
//!
//! Events go to stderr so `qrstamp generate` output on stdout stays clean.
//! `RUST_LOG` takes per-target directives (`qrstamp=debug,tower_http=info`);
//! without it, INFO and above are shown.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{
    filter::Targets,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

/// Install the global subscriber. Fails if one is already set.
pub fn try_init() -> Result<(), TryInitError> {
    let targets = std::env::var("RUST_LOG")
        .ok()
        .and_then(|directives| Targets::from_str(&directives).ok())
        .unwrap_or_else(|| Targets::new().with_default(Level::INFO));

    let stderr = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(targets);

    tracing_subscriber::registry().with(stderr).try_init()
}

/// Quiet unless `RUST_LOG` is set. Safe to call from every test.
pub fn init_for_testing() {
    if std::env::var_os("RUST_LOG").is_some() {
        let _ = try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        init_for_testing();
        let _ = try_init();
        assert!(try_init().is_err());
    }
}
