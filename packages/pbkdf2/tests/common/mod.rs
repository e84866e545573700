//! Shared test helpers

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber, filtered by `RUST_LOG`
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
