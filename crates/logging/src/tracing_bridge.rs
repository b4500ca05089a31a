//! Subscriber installation.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] built from
//! [`LogConfig`] and a fmt layer writing to stderr.
//!
//! ```rust,ignore
//! use logging::{LogConfig, init_tracing};
//!
//! init_tracing(&LogConfig::new().with_default_directive("polyhash=debug"));
//! let hash = polyhash::hash(b"abc");
//! ```
//!
//! [`EnvFilter`]: tracing_subscriber::EnvFilter

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use super::config::LogConfig;

/// Installs the global subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already set; use [`try_init_tracing`] when
/// that can happen.
pub fn init_tracing(config: &LogConfig) {
    if let Err(err) = try_init_tracing(config) {
        panic!("failed to install tracing subscriber: {err}");
    }
}

/// Installs the global subscriber, returning an error if one is already set.
pub fn try_init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi())
        .with_target(config.shows_target());

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_installation_is_rejected() {
        let config = LogConfig::new().with_ansi(false);
        // Another test may already have installed one.
        let _ = try_init_tracing(&config);
        assert!(try_init_tracing(&config).is_err());
    }
}
