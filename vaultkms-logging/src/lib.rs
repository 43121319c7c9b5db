//! Structured logging setup for vaultkms hosts

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins over the configured level when set
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the JSON subscriber used by hosts of the key backend.
///
/// Hosts often bring their own subscriber, so an already installed one is
/// left in place. Returns true when this call installed the subscriber.
pub fn init_logging(component: &str, default_level: &str) -> bool {
    let installed = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(false)
                .with_span_list(false),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(component = component, level = default_level, "Logging initialized");
    } else {
        tracing::debug!(component = component, "Subscriber already installed, keeping it");
    }
    installed
}

/// Install a test-writer subscriber; later calls are ignored
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("debug"))
        .with_test_writer()
        .try_init();
}
