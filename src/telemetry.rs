//! Tracing setup for applications embedding the store.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "reviewstore=info";

/// Initialize tracing subscriber with env filter.
///
/// Reads `RUST_LOG`, falling back to `reviewstore=info`. Returns `false`
/// when a global subscriber was already installed, so calling it more than
/// once is harmless.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
