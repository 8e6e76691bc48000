use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Installs the global subscriber: `RUST_LOG` filter (default `info`) plus a
/// fmt layer. Later calls are no-ops, so tests can call it freely.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));

        // Another subscriber may already be installed by a test harness.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}
