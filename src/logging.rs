//! Structured logging setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info,hashtag_server=debug,tower_http=info";

/// Installs the global subscriber.
///
/// `LogFormat::Json` emits one JSON object per event with the current span
/// attached, `LogFormat::Pretty` is the human-readable format for local runs.
/// A subscriber that is already installed is left in place.
pub fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(false),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .try_init(),
    };

    if let Err(err) = result {
        use std::error::Error;
        let already_set = err
            .source()
            .and_then(|s| s.downcast_ref::<tracing::dispatcher::SetGlobalDefaultError>())
            .is_some();
        if !already_set {
            eprintln!("Failed to initialize tracing: {}", err);
        }
    }
}
