use std::sync::Once;

use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::formatter::CustomFormatter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn,pacman_ui=info";

static INIT: Once = Once::new();

/// Installs the global subscriber. Later calls, and calls after another subscriber was
/// installed elsewhere, do nothing.
pub fn setup_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let result = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(cfg!(not(target_os = "emscripten")))
                    .event_format(CustomFormatter),
            )
            .with(ErrorLayer::default())
            .try_init();

        if let Err(e) = result {
            eprintln!("Logging already initialized: {e}");
        }
    });
}
