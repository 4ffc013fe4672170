//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use std::fmt::{self, Debug};
use std::time::{Duration, Instant};

/// Port for obtaining current time.
///
/// This abstraction allows the application layer to work with time
/// without depending on system clock implementation details.
/// Infrastructure provides concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// Work run when a timer expires.
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Error returned when a timer cannot be scheduled.
#[derive(Debug)]
pub struct ScheduleError {
    reason: String,
}

impl ScheduleError {
    /// Create an error describing why scheduling failed.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to schedule timer: {}", self.reason)
    }
}

impl std::error::Error for ScheduleError {}

/// Port for scheduling one-shot timers.
///
/// Each debouncer arms at most one timer at a time and cancels it before
/// arming the next. Infrastructure provides concrete implementations
/// (TokioTimer, ThreadTimer, ManualTimer).
///
/// Implementations must run `task` on a context other than the caller of
/// `schedule`, and must never run it synchronously from within `schedule`:
/// the debouncer holds its state lock while scheduling.
pub trait Timer: Send + Sync + Debug {
    /// Run `task` once `delay` has elapsed, unless cancelled first.
    ///
    /// A delay too large to represent as a deadline never elapses.
    ///
    /// # Errors
    /// Returns `ScheduleError` if the timer could not be set up; `task` is
    /// dropped without running.
    fn schedule(
        &self,
        delay: Duration,
        task: TimerTask,
    ) -> Result<Box<dyn ScheduledTask>, ScheduleError>;
}

/// Handle to a timer returned by [`Timer::schedule`].
///
/// Cancellation is best effort: a task that already started running is not
/// interrupted. Callers guard against late firings themselves.
pub trait ScheduledTask: Send + Debug {
    /// Prevent the task from running if it has not started yet.
    fn cancel(&self);
}
