//! Shared test utilities for the receipt system
//!
//! Provides deterministic fixtures, builder-style constructors for domain
//! types, and an in-memory [`store::InMemoryReceiptStore`] implementing the
//! receipt store port so service behavior can be tested without a database.

pub mod builders;
pub mod fixtures;
pub mod store;

pub use builders::{LineBuilder, ReceiptBuilder};
pub use store::InMemoryReceiptStore;

/// Initializes tracing output for tests
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
