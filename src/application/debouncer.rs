//! The debounced function wrapper.
//!
//! `Debouncer` owns the target, the edge state machine, the cached result of
//! the latest invocation and at most one armed timer. Time comes from the
//! `Clock` port and timers from the `Timer` port, so the same logic runs on a
//! tokio runtime, on a plain thread, or under a manual test clock.

use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, ScheduledTask, Timer};
use crate::domain::options::{DebounceOptions, OptionsError};
use crate::domain::state::{DebounceState, Invocation, TimerAction};
use parking_lot::{Mutex, ReentrantMutex};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, error, trace};

/// Error returned by debouncer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceError {
    /// The configuration was rejected
    InvalidArgument(OptionsError),
    /// The debouncer was disposed
    InvalidState,
}

impl fmt::Display for DebounceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebounceError::InvalidArgument(e) => write!(f, "invalid argument: {}", e),
            DebounceError::InvalidState => write!(f, "debouncer has been disposed"),
        }
    }
}

impl std::error::Error for DebounceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DebounceError::InvalidArgument(e) => Some(e),
            DebounceError::InvalidState => None,
        }
    }
}

impl From<OptionsError> for DebounceError {
    fn from(e: OptionsError) -> Self {
        DebounceError::InvalidArgument(e)
    }
}

type Target<A, R> = Box<dyn Fn(A) -> R + Send + 'static>;

/// A debounced function.
///
/// Calls are coalesced: the target runs once the configured quiet period has
/// passed since the last call (trailing edge), optionally also on the first
/// call of a burst (leading edge), and at least once per max wait interval if
/// one is set. The target always receives the arguments of the most recent
/// call.
///
/// Dropping the debouncer disposes it: the armed timer is cancelled and
/// handles obtained from [`Debouncer::handle`] start failing.
///
/// # Example
/// ```
/// use debounce::infrastructure::mocks::{ManualTimer, MockClock};
/// use debounce::{DebounceOptions, Debouncer};
/// use std::sync::{Arc, Mutex};
/// use std::time::{Duration, Instant};
///
/// let clock = MockClock::new(Instant::now());
/// let timer = ManualTimer::new(clock.clone());
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let debounced = Debouncer::new(
///     move |query: &'static str| sink.lock().unwrap().push(query),
///     DebounceOptions::new(Duration::from_millis(100)),
///     Arc::new(clock.clone()),
///     Arc::new(timer.clone()),
/// );
///
/// debounced.call("r").unwrap();
/// debounced.call("ru").unwrap();
/// debounced.call("rust").unwrap();
/// assert!(debounced.pending());
///
/// timer.advance(Duration::from_millis(100));
/// assert_eq!(*seen.lock().unwrap(), vec!["rust"]);
/// ```
pub struct Debouncer<A, R = ()>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    shared: Arc<Shared<A, R>>,
}

struct Shared<A, R> {
    target: ReentrantMutex<Target<A, R>>,
    slot: Mutex<Slot<A, R>>,
    clock: Arc<dyn Clock>,
    timer: Arc<dyn Timer>,
    metrics: Metrics,
    name: String,
}

struct Slot<A, R> {
    state: DebounceState<A>,
    scheduled: Option<Box<dyn ScheduledTask>>,
    result: Option<R>,
    disposed: bool,
}

impl<A, R> Debouncer<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    /// Wrap `target` with explicit time and timer sources.
    ///
    /// Use [`Debouncer::builder`] for the default clock and timer.
    pub fn new<F>(
        target: F,
        options: DebounceOptions,
        clock: Arc<dyn Clock>,
        timer: Arc<dyn Timer>,
    ) -> Self
    where
        F: Fn(A) -> R + Send + 'static,
    {
        Self::from_parts(
            Box::new(target),
            options,
            clock,
            timer,
            Metrics::new(),
            String::from("debounced"),
        )
    }

    pub(crate) fn from_parts(
        target: Target<A, R>,
        options: DebounceOptions,
        clock: Arc<dyn Clock>,
        timer: Arc<dyn Timer>,
        metrics: Metrics,
        name: String,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                target: ReentrantMutex::new(target),
                slot: Mutex::new(Slot {
                    state: DebounceState::new(options),
                    scheduled: None,
                    result: None,
                    disposed: false,
                }),
                clock,
                timer,
                metrics,
                name,
            }),
        }
    }

    /// Request an invocation with `args`.
    ///
    /// Returns the result of the invocation if this call ran the target
    /// (leading or max wait edge), otherwise the result of the latest
    /// invocation, if any. Never waits for the timer.
    ///
    /// # Errors
    /// Returns `DebounceError::InvalidState` if the debouncer was disposed.
    pub fn call(&self, args: A) -> Result<Option<R>, DebounceError> {
        self.shared.call(args)
    }

    /// Discard the pending invocation and reset the burst.
    ///
    /// Safe to call at any time, including from inside the target.
    pub fn cancel(&self) {
        self.shared.cancel();
    }

    /// Run the pending invocation now, if there is one.
    ///
    /// Returns the result of the latest invocation.
    ///
    /// # Errors
    /// Returns `DebounceError::InvalidState` if the debouncer was disposed.
    pub fn flush(&self) -> Result<Option<R>, DebounceError> {
        self.shared.flush()
    }

    /// Whether a timer is armed.
    pub fn pending(&self) -> bool {
        self.shared.pending()
    }

    /// Cancel and permanently disable this debouncer.
    pub fn dispose(&self) {
        self.shared.dispose();
    }

    /// Whether [`Debouncer::dispose`] was called.
    pub fn is_disposed(&self) -> bool {
        self.shared.slot.lock().disposed
    }

    /// Result of the latest invocation.
    pub fn last_result(&self) -> Option<R> {
        self.shared.slot.lock().result.clone()
    }

    /// The options this debouncer was built with.
    pub fn options(&self) -> DebounceOptions {
        *self.shared.slot.lock().state.options()
    }

    /// Name used in log events.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Get the metrics tracker.
    pub fn metrics(&self) -> &Metrics {
        &self.shared.metrics
    }

    /// Get a weak handle for use from inside the target or other owners.
    pub fn handle(&self) -> DebounceHandle<A, R> {
        DebounceHandle {
            shared: Arc::downgrade(&self.shared),
        }
    }
}

impl<A, R> Drop for Debouncer<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    fn drop(&mut self) {
        self.shared.dispose();
    }
}

impl<A, R> fmt::Debug for Debouncer<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.shared.slot.lock();
        f.debug_struct("Debouncer")
            .field("name", &self.shared.name)
            .field("options", slot.state.options())
            .field("pending", &slot.state.is_pending())
            .field("disposed", &slot.disposed)
            .finish()
    }
}

/// Weak handle to a [`Debouncer`].
///
/// Handles do not keep the debouncer alive, so a target may capture one to
/// cancel, flush or re-trigger its own debouncer without creating a cycle.
pub struct DebounceHandle<A, R = ()> {
    shared: Weak<Shared<A, R>>,
}

impl<A, R> Clone for DebounceHandle<A, R> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<A, R> fmt::Debug for DebounceHandle<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebounceHandle")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

impl<A, R> DebounceHandle<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    /// See [`Debouncer::call`].
    ///
    /// # Errors
    /// Returns `DebounceError::InvalidState` if the debouncer was disposed or dropped.
    pub fn call(&self, args: A) -> Result<Option<R>, DebounceError> {
        self.upgrade()?.call(args)
    }

    /// See [`Debouncer::cancel`]. Does nothing once the debouncer is gone.
    pub fn cancel(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.cancel();
        }
    }

    /// See [`Debouncer::flush`].
    ///
    /// # Errors
    /// Returns `DebounceError::InvalidState` if the debouncer was disposed or dropped.
    pub fn flush(&self) -> Result<Option<R>, DebounceError> {
        self.upgrade()?.flush()
    }

    /// See [`Debouncer::pending`]. False once the debouncer is gone.
    pub fn pending(&self) -> bool {
        self.shared
            .upgrade()
            .is_some_and(|shared| shared.pending())
    }

    /// Whether the debouncer was disposed or dropped.
    pub fn is_disposed(&self) -> bool {
        self.shared
            .upgrade()
            .map_or(true, |shared| shared.slot.lock().disposed)
    }

    fn upgrade(&self) -> Result<Arc<Shared<A, R>>, DebounceError> {
        self.shared.upgrade().ok_or(DebounceError::InvalidState)
    }
}

impl<A, R> Shared<A, R>
where
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    fn call(self: &Arc<Self>, args: A) -> Result<Option<R>, DebounceError> {
        let invocation = {
            let mut slot = self.slot.lock();
            if slot.disposed {
                return Err(DebounceError::InvalidState);
            }
            self.metrics.record_call();

            let step = slot.state.call(self.clock.now(), args);
            self.apply_timer(&mut slot, step.timer);
            match step.invoke {
                Some(invocation) => invocation,
                None => return Ok(slot.result.clone()),
            }
        };

        Ok(Some(self.invoke(invocation)))
    }

    fn flush(self: &Arc<Self>) -> Result<Option<R>, DebounceError> {
        let invocation = {
            let mut slot = self.slot.lock();
            if slot.disposed {
                return Err(DebounceError::InvalidState);
            }

            let step = slot.state.flush(self.clock.now());
            self.apply_timer(&mut slot, step.timer);
            match step.invoke {
                Some(invocation) => invocation,
                None => return Ok(slot.result.clone()),
            }
        };

        Ok(Some(self.invoke(invocation)))
    }

    fn cancel(&self) {
        let mut slot = self.slot.lock();
        if slot.state.cancel() == TimerAction::Disarm {
            self.metrics.record_cancellation();
            trace!(name = %self.name, "pending invocation cancelled");
        }
        if let Some(task) = slot.scheduled.take() {
            task.cancel();
        }
    }

    fn pending(&self) -> bool {
        self.slot.lock().state.is_pending()
    }

    fn dispose(&self) {
        let mut slot = self.slot.lock();
        if slot.disposed {
            return;
        }
        slot.state.cancel();
        if let Some(task) = slot.scheduled.take() {
            task.cancel();
        }
        slot.disposed = true;
        debug!(name = %self.name, "debouncer disposed");
    }

    fn timer_expired(self: &Arc<Self>, generation: u64) {
        let invocation = {
            let mut slot = self.slot.lock();
            if slot.disposed || slot.state.armed_generation() != Some(generation) {
                self.metrics.record_stale_timer();
                trace!(name = %self.name, generation, "ignoring stale timer");
                return;
            }
            // The handle belongs to the timer that is firing right now.
            slot.scheduled = None;

            let step = slot.state.timer_expired(self.clock.now(), generation);
            self.apply_timer(&mut slot, step.timer);
            step.invoke
        };

        if let Some(invocation) = invocation {
            self.invoke(invocation);
        }
    }

    fn apply_timer(self: &Arc<Self>, slot: &mut Slot<A, R>, action: TimerAction) {
        let arm = match action {
            TimerAction::Keep => return,
            TimerAction::Disarm => None,
            TimerAction::Arm(arm) => Some(arm),
        };

        if let Some(task) = slot.scheduled.take() {
            task.cancel();
        }

        if let Some(arm) = arm {
            trace!(
                name = %self.name,
                generation = arm.generation,
                delay_ms = u64::try_from(arm.delay.as_millis()).unwrap_or(u64::MAX),
                "timer armed"
            );
            let shared = Arc::downgrade(self);
            let generation = arm.generation;
            let scheduled = self.timer.schedule(
                arm.delay,
                Box::new(move || {
                    if let Some(shared) = shared.upgrade() {
                        shared.timer_expired(generation);
                    }
                }),
            );
            match scheduled {
                Ok(task) => slot.scheduled = Some(task),
                Err(e) => {
                    // The next call arms again with the pending arguments.
                    slot.state.timer_unavailable(generation);
                    error!(name = %self.name, error = %e, "debounce timer unavailable");
                }
            }
        }
    }

    /// Run the target. Must be called without holding the slot lock.
    fn invoke(&self, invocation: Invocation<A>) -> R {
        self.metrics.record_invocation(invocation.edge);
        debug!(
            name = %self.name,
            edge = invocation.edge.as_str(),
            "invoking debounced function"
        );

        let result = {
            let target = self.target.lock();
            (*target)(invocation.args)
        };

        self.slot.lock().result = Some(result.clone());
        result
    }
}
