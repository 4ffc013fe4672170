//! # debounce
//!
//! Debounced function wrappers with leading/trailing edges and a max wait cap.
//!
//! A [`Debouncer`] wraps a function and coalesces rapid calls to it: the
//! function runs once the caller has been quiet for the configured wait,
//! always with the arguments of the most recent call. Optionally it also runs
//! on the first call of a burst (leading edge), and a max wait guarantees it
//! runs at least that often during a burst that never goes quiet.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use debounce::Debouncer;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! // Inside a tokio runtime the timer is a tokio task; elsewhere a thread.
//! let search = Debouncer::builder(|query: String| println!("searching for {query}"))
//!     .with_wait(Duration::from_millis(300))
//!     .build()
//!     .unwrap();
//!
//! search.call("r".to_string()).unwrap();
//! search.call("ru".to_string()).unwrap();
//! search.call("rust".to_string()).unwrap();
//! // ~300ms later: "searching for rust", once
//! # }
//! ```
//!
//! ## Edges
//!
//! | leading | trailing | behaviour during one burst |
//! |---------|----------|----------------------------|
//! | false   | true     | one call, `wait` after the last request (default) |
//! | true    | false    | one call, immediately, with the first arguments |
//! | true    | true     | immediate call, plus a trailing call if more requests followed |
//! | false   | false    | never invoked by the timer |
//!
//! With `max_wait` set, a burst longer than `max_wait` invokes the target
//! every `max_wait` (never less than `wait`) even though it never goes quiet.
//!
//! ## Control
//!
//! - [`Debouncer::cancel`] drops the pending call and resets the burst
//! - [`Debouncer::flush`] runs the pending call now
//! - [`Debouncer::pending`] reports whether a timer is armed
//! - [`Debouncer::dispose`] (or dropping the debouncer) disables it for good
//!
//! Targets may control their own debouncer through a [`DebounceHandle`],
//! which does not keep it alive:
//!
//! ```rust
//! use debounce::infrastructure::mocks::{ManualTimer, MockClock};
//! use debounce::{DebounceHandle, Debouncer};
//! use std::sync::{Arc, OnceLock};
//! use std::time::{Duration, Instant};
//!
//! let clock = MockClock::new(Instant::now());
//! let timer = ManualTimer::new(clock.clone());
//! let handle: Arc<OnceLock<DebounceHandle<u32>>> = Arc::new(OnceLock::new());
//! let inner = Arc::clone(&handle);
//!
//! let retry = Debouncer::builder(move |attempt: u32| {
//!     if attempt < 3 {
//!         if let Some(handle) = inner.get() {
//!             handle.call(attempt + 1).unwrap();
//!         }
//!     }
//! })
//! .with_wait(Duration::from_millis(100))
//! .with_clock(Arc::new(clock.clone()))
//! .with_timer(Arc::new(timer.clone()))
//! .build()
//! .unwrap();
//! handle.set(retry.handle()).unwrap();
//!
//! retry.call(1).unwrap();
//! timer.advance(Duration::from_secs(1));
//! assert_eq!(retry.metrics().snapshot().trailing, 3);
//! ```
//!
//! ## Observability
//!
//! Invocations are logged at `DEBUG` with `name` and `edge` fields; timer
//! arming, stale timers and cancellations at `TRACE`. Counters are available
//! from [`Debouncer::metrics`]:
//!
//! ```rust,no_run
//! # use debounce::Debouncer;
//! # let debounced = Debouncer::builder(|_: ()| {}).build().unwrap();
//! let snapshot = debounced.metrics().snapshot();
//! println!("calls: {}", snapshot.calls);
//! println!("invocations: {}", snapshot.invocations());
//! println!("coalesced: {:.1}%", snapshot.coalesce_rate() * 100.0);
//! ```
//!
//! ## Features
//!
//! - `async` (default): [`TokioTimer`] and the tokio-aware [`SystemClock`]
//! - `serde`: [`DebounceConfig`] for loading options from configuration
//! - `test-helpers`: manual clock, manual timer and log capture under
//!   `infrastructure::mocks`

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    options::{DebounceOptions, OptionsError},
    state::{Arm, DebounceState, Edge, Invocation, Step, TimerAction},
};

pub use application::{
    debouncer::{DebounceError, DebounceHandle, Debouncer},
    metrics::{Metrics, MetricsSnapshot},
    ports::{Clock, ScheduleError, ScheduledTask, Timer, TimerTask},
};

pub use infrastructure::{builder::DebouncerBuilder, clock::SystemClock, timer::ThreadTimer};

#[cfg(feature = "async")]
pub use infrastructure::timer::TokioTimer;

#[cfg(feature = "serde")]
pub use infrastructure::config::DebounceConfig;
