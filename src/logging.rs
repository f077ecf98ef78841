//! Logging setup for programs driving a retrieval
//!
//! The library itself only emits `tracing` events. Callers that want them
//! printed install the subscriber here once, before the first retrieval.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Install a stderr subscriber
///
/// An explicit level wins; otherwise `RUST_LOG` is honoured, falling back to
/// INFO so version tables show up in CI logs. Later calls are no-ops, and a
/// subscriber installed elsewhere is left in place.
pub fn init_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = match level {
            Some(level) => EnvFilter::new(level.to_string()),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string())),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(Some(Level::DEBUG));
        init_logging(None);
        tracing::info!("logging initialised");
    }
}
