//! Infrastructure layer - external adapters and integrations.
//!
//! This layer provides adapters for:
//! - Clock abstraction (system time vs mock)
//! - Timers (tokio tasks or parked threads)
//! - Construction (builder and serde configuration)

pub mod builder;
pub mod clock;
pub mod timer;

#[cfg(feature = "serde")]
pub mod config;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds. It provides a manual clock and timer for driving
/// debounce timing deterministically, plus a tracing layer that captures
/// log events.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// debounce = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
