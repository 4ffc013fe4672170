//! Builder for `Debouncer`.
//!
//! Picks the production adapters unless told otherwise: `SystemClock` for
//! time, `TokioTimer` when built inside a tokio runtime (feature `async`),
//! and `ThreadTimer` everywhere else.

use crate::application::debouncer::{DebounceError, Debouncer};
use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, Timer};
use crate::domain::options::{DebounceOptions, OptionsError};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::timer::ThreadTimer;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "async")]
use crate::infrastructure::timer::TokioTimer;

#[cfg(feature = "serde")]
use crate::infrastructure::config::DebounceConfig;

/// Builder for constructing a [`Debouncer`].
///
/// Setters never fail; the first invalid value is reported by
/// [`DebouncerBuilder::build`].
pub struct DebouncerBuilder<A, R = ()> {
    target: Box<dyn Fn(A) -> R + Send + 'static>,
    options: DebounceOptions,
    error: Option<OptionsError>,
    clock: Option<Arc<dyn Clock>>,
    timer: Option<Arc<dyn Timer>>,
    metrics: Option<Metrics>,
    name: Option<String>,
}

impl<A, R> Debouncer<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    /// Create a builder for debouncing `target`.
    ///
    /// Defaults:
    /// - Wait: zero (invoke on the next timer tick)
    /// - Edges: trailing only
    /// - Max wait: none
    /// - Clock: `SystemClock`
    /// - Timer: `TokioTimer` inside a tokio runtime, `ThreadTimer` otherwise
    ///
    /// # Example
    /// ```
    /// use debounce::Debouncer;
    /// use std::time::Duration;
    ///
    /// let save = Debouncer::builder(|doc: String| println!("saving {doc}"))
    ///     .with_wait(Duration::from_millis(500))
    ///     .with_max_wait(Duration::from_secs(5))
    ///     .with_name("autosave")
    ///     .build()
    ///     .unwrap();
    ///
    /// save.call("draft".to_string()).unwrap();
    /// save.flush().unwrap();
    /// ```
    pub fn builder<F>(target: F) -> DebouncerBuilder<A, R>
    where
        F: Fn(A) -> R + Send + 'static,
    {
        DebouncerBuilder {
            target: Box::new(target),
            options: DebounceOptions::new(Duration::ZERO),
            error: None,
            clock: None,
            timer: None,
            metrics: None,
            name: None,
        }
    }
}

impl<A, R> DebouncerBuilder<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    /// Set the quiet period.
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.options = self.options.with_wait(wait);
        self
    }

    /// Set the quiet period in signed milliseconds.
    ///
    /// A negative value will be rejected when `build()` is called.
    pub fn with_wait_millis(mut self, wait_ms: i64) -> Self {
        match DebounceOptions::from_millis(wait_ms) {
            Ok(parsed) => self.options = self.options.with_wait(parsed.wait()),
            Err(e) => self.fail(e),
        }
        self
    }

    /// Invoke the target on the leading edge of a burst.
    pub fn with_leading(mut self, leading: bool) -> Self {
        self.options = self.options.with_leading(leading);
        self
    }

    /// Invoke the target on the trailing edge of a burst.
    pub fn with_trailing(mut self, trailing: bool) -> Self {
        self.options = self.options.with_trailing(trailing);
        self
    }

    /// Cap how long continuous calls may defer an invocation.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.options = self.options.with_max_wait(max_wait);
        self
    }

    /// Cap deferral in signed milliseconds.
    ///
    /// A negative value will be rejected when `build()` is called.
    pub fn with_max_wait_millis(mut self, max_wait_ms: i64) -> Self {
        match self.options.with_max_wait_millis(max_wait_ms) {
            Ok(options) => self.options = options,
            Err(e) => self.fail(e),
        }
        self
    }

    /// Replace all debounce options at once.
    pub fn with_options(mut self, options: DebounceOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace all debounce options with values loaded from configuration.
    ///
    /// Invalid values will be rejected when `build()` is called.
    #[cfg(feature = "serde")]
    pub fn with_config(mut self, config: DebounceConfig) -> Self {
        match DebounceOptions::try_from(config) {
            Ok(options) => self.options = options,
            Err(e) => self.fail(e),
        }
        self
    }

    /// Set a custom clock (mainly for testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set a custom timer.
    pub fn with_timer(mut self, timer: Arc<dyn Timer>) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Record into an existing metrics tracker, e.g. one shared by several
    /// debouncers.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Name reported in this debouncer's log events.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the debouncer.
    ///
    /// # Errors
    /// Returns `DebounceError::InvalidArgument` if a negative wait or max
    /// wait was supplied.
    pub fn build(self) -> Result<Debouncer<A, R>, DebounceError> {
        if let Some(e) = self.error {
            return Err(e.into());
        }

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        let timer = self.timer.unwrap_or_else(default_timer);
        let name = self.name.unwrap_or_else(|| String::from("debounced"));

        Ok(Debouncer::from_parts(
            self.target,
            self.options,
            clock,
            timer,
            self.metrics.unwrap_or_default(),
            name,
        ))
    }

    fn fail(&mut self, e: OptionsError) {
        self.error.get_or_insert(e);
    }
}

impl<A, R> fmt::Debug for DebouncerBuilder<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebouncerBuilder")
            .field("options", &self.options)
            .field("error", &self.error)
            .field("clock", &self.clock)
            .field("timer", &self.timer)
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(feature = "async")]
fn default_timer() -> Arc<dyn Timer> {
    match TokioTimer::try_current() {
        Some(timer) => Arc::new(timer),
        None => Arc::new(ThreadTimer::new()),
    }
}

#[cfg(not(feature = "async"))]
fn default_timer() -> Arc<dyn Timer> {
    Arc::new(ThreadTimer::new())
}
