//! Clock adapters for time operations.
//!
//! Provides SystemClock implementation for production use.
//!
//! # Testing
//!
//! See `MockClock` (in `crate::infrastructure::mocks`) for a controllable test clock.
//! Available with the `test-helpers` feature or in test builds:
//!
//! ```toml
//! [dev-dependencies]
//! debounce = { version = "*", features = ["test-helpers"] }
//! ```

use crate::application::ports::Clock;
use std::time::Instant;

/// System clock implementation.
///
/// With the `async` feature this reads tokio's clock, which is the system
/// monotonic clock unless a test paused it. Debouncers scheduled on
/// `TokioTimer` then agree with the timer about elapsed time even under
/// `#[tokio::test(start_paused = true)]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[cfg(feature = "async")]
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    #[cfg(not(feature = "async"))]
    fn now(&self) -> Instant {
        Instant::now()
    }
}
