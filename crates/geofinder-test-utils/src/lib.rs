//! Shared test utilities for all Geofinder integration tests
//!
//! Provides a persistent Tokio runtime and an atomic counter shared across
//! ALL integration tests in ALL crates, preventing race conditions and
//! ensuring resource isolation.
//!
//! ## Usage
//!
//! In your test crate's `Cargo.toml`:
//! ```toml
//! [dev-dependencies]
//! geofinder-test-utils = { path = "../geofinder-test-utils" }
//! ```
//!
//! In your tests:
//! ```no_run
//! #[test]
//! fn my_integration_test() {
//!     geofinder_test_utils::get_test_runtime().block_on(async {
//!         let counter = geofinder_test_utils::next_fixture_counter();
//!         // ... test logic ...
//!     })
//! }
//! ```

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared Tokio runtime for integration tests driving the search façade
///
/// The runtime persists for the entire test suite lifetime, preventing:
/// - "Tokio context is being shutdown" errors
/// - Premature disposal of tasks the façade spawned for in-flight requests
/// - Resource conflicts when spawned tasks outlive their originating test
static TEST_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Global atomic counter for unique fixture names across ALL test crates
///
/// Prevents filename collisions when storage tests run in parallel across
/// multiple crates (e.g. geofinder-storage and geofinder).
static FIXTURE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Get the shared test runtime (creates on first call, reuses thereafter)
///
/// Loads the test environment on first use so every suite sees the same
/// `.env`-provided configuration.
///
/// # Panics
/// Panics if the runtime cannot be created (should never happen in normal conditions)
#[allow(clippy::expect_used)] // Test infrastructure - panic on init failure is acceptable
pub fn get_test_runtime() -> &'static tokio::runtime::Runtime {
    TEST_RUNTIME.get_or_init(|| {
        geofinder_common::initialize_environment();

        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("test-runtime")
            .build()
            .expect("Failed to create test runtime")
    })
}

/// Get next unique fixture counter value
///
/// Returns a monotonically increasing counter value that's unique across
/// ALL test crates. Combine it with the test name to generate unique
/// record filenames:
///
/// ```ignore
/// use geofinder_test_utils::next_fixture_counter;
///
/// let filename = format!("custom-record-{}.test", next_fixture_counter());
/// ```
pub fn next_fixture_counter() -> usize {
    FIXTURE_COUNTER.fetch_add(1, Ordering::SeqCst)
}
