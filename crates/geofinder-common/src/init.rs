//! Global initialization utilities for SDK consumers

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the process environment
///
/// This should be called once at startup to:
/// - Load environment variables from a .env file
/// - Install a tracing subscriber honoring `RUST_LOG`
///
/// Safe to call multiple times - will only run once
pub fn initialize_environment() {
    INIT.call_once(|| {
        // Load .env file if it exists
        // This loads from current directory or searches up the tree
        dotenvy::dotenv().ok();

        // A subscriber may already be installed by the host application;
        // in that case keep theirs.
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init()
            .ok();
    });
}
