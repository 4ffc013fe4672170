//! The debounce edge state machine.
//!
//! `DebounceState` implements leading, trailing and max wait debouncing without touching
//! a clock or a timer. Every operation takes the current instant and returns a
//! `Step` describing what the caller must do: invoke the target, arm a timer,
//! or drop the armed one.

use crate::domain::options::DebounceOptions;
use std::time::{Duration, Instant};

/// Which edge of a burst produced an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// First call of a burst
    Leading,
    /// Quiet period elapsed after the last call
    Trailing,
    /// Continuous calls hit the max wait cap
    MaxWait,
    /// Pending call forced out by `flush`
    Flush,
}

impl Edge {
    /// Stable lowercase name, used as a log field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Leading => "leading",
            Edge::Trailing => "trailing",
            Edge::MaxWait => "max_wait",
            Edge::Flush => "flush",
        }
    }
}

/// A target invocation the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<A> {
    /// Arguments of the most recent call
    pub args: A,
    /// Edge that triggered the invocation
    pub edge: Edge,
}

/// A timer the caller must schedule, replacing any armed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arm {
    /// Generation the timer must report back in `timer_expired`
    pub generation: u64,
    /// Delay until expiry
    pub delay: Duration,
}

/// What to do with the timer after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Leave the armed timer (if any) alone
    Keep,
    /// Cancel the armed timer (if any) and schedule a new one
    Arm(Arm),
    /// Cancel the armed timer
    Disarm,
}

/// Outcome of a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<A> {
    /// Invocation to perform, if any
    pub invoke: Option<Invocation<A>>,
    /// Timer bookkeeping to perform
    pub timer: TimerAction,
}

impl<A> Step<A> {
    fn idle() -> Self {
        Self {
            invoke: None,
            timer: TimerAction::Keep,
        }
    }
}

/// State of one debounced function.
///
/// # Example
/// ```
/// use debounce::{DebounceOptions, DebounceState, TimerAction};
/// use std::time::{Duration, Instant};
///
/// let mut state = DebounceState::new(DebounceOptions::new(Duration::from_millis(100)));
/// let start = Instant::now();
///
/// // First call arms the timer without invoking (trailing only)
/// let step = state.call(start, "a");
/// assert!(step.invoke.is_none());
/// let TimerAction::Arm(arm) = step.timer else { panic!("expected a timer") };
///
/// // A second call inside the window just records its arguments
/// state.call(start + Duration::from_millis(30), "b");
///
/// // At expiry the quiet period has not elapsed yet, so the timer re-arms
/// let step = state.timer_expired(start + Duration::from_millis(100), arm.generation);
/// let TimerAction::Arm(arm) = step.timer else { panic!("expected a re-arm") };
/// assert_eq!(arm.delay, Duration::from_millis(30));
///
/// // Once it has, the trailing edge fires with the latest arguments
/// let step = state.timer_expired(start + Duration::from_millis(130), arm.generation);
/// assert_eq!(step.invoke.unwrap().args, "b");
/// ```
#[derive(Debug, Clone)]
pub struct DebounceState<A> {
    options: DebounceOptions,
    last_args: Option<A>,
    last_call_time: Option<Instant>,
    last_invoke_time: Option<Instant>,
    armed: Option<u64>,
    next_generation: u64,
}

impl<A> DebounceState<A> {
    /// Create an idle state.
    pub fn new(options: DebounceOptions) -> Self {
        Self {
            options,
            last_args: None,
            last_call_time: None,
            last_invoke_time: None,
            armed: None,
            next_generation: 0,
        }
    }

    /// The options this state was built with.
    pub fn options(&self) -> &DebounceOptions {
        &self.options
    }

    /// Whether a timer is armed.
    pub fn is_pending(&self) -> bool {
        self.armed.is_some()
    }

    /// Generation of the armed timer, if any.
    pub fn armed_generation(&self) -> Option<u64> {
        self.armed
    }

    /// Whether a call is waiting for the trailing edge.
    pub fn has_pending_args(&self) -> bool {
        self.last_args.is_some()
    }

    /// Record a call made at `now`.
    pub fn call(&mut self, now: Instant, args: A) -> Step<A> {
        let invoking = self.should_invoke(now);

        self.last_args = Some(args);
        self.last_call_time = Some(now);

        if invoking {
            if self.armed.is_none() {
                return self.leading_edge(now);
            }
            if self.options.max_wait().is_some() {
                // Calls in a tight loop: invoke now and restart the wait.
                let arm = self.arm(self.options.wait());
                return Step {
                    invoke: self.invoke(now, Edge::MaxWait),
                    timer: TimerAction::Arm(arm),
                };
            }
        }

        if self.armed.is_none() {
            let arm = self.arm(self.options.wait());
            return Step {
                invoke: None,
                timer: TimerAction::Arm(arm),
            };
        }

        Step::idle()
    }

    /// Handle expiry of the timer armed with `generation`.
    ///
    /// Expiry of a timer that is no longer armed is ignored.
    pub fn timer_expired(&mut self, now: Instant, generation: u64) -> Step<A> {
        if self.armed != Some(generation) {
            return Step::idle();
        }

        if self.should_invoke(now) {
            let edge = if self.quiet_period_elapsed(now) {
                Edge::Trailing
            } else {
                Edge::MaxWait
            };
            return self.trailing_edge(now, edge);
        }

        let arm = self.arm(self.remaining_wait(now));
        Step {
            invoke: None,
            timer: TimerAction::Arm(arm),
        }
    }

    /// Run the trailing edge immediately if a timer is armed.
    pub fn flush(&mut self, now: Instant) -> Step<A> {
        if self.armed.is_none() {
            return Step::idle();
        }
        self.trailing_edge(now, Edge::Flush)
    }

    /// Forget the timer armed with `generation` because it was never
    /// scheduled. Pending arguments are kept for the next call to re-arm.
    ///
    /// Returns true if that timer was the armed one.
    pub fn timer_unavailable(&mut self, generation: u64) -> bool {
        if self.armed != Some(generation) {
            return false;
        }
        self.armed = None;
        true
    }

    /// Drop pending arguments and the armed timer.
    ///
    /// Returns `TimerAction::Disarm` if a timer was armed.
    pub fn cancel(&mut self) -> TimerAction {
        let was_armed = self.armed.take().is_some();
        self.last_args = None;
        self.last_call_time = None;
        self.last_invoke_time = None;

        if was_armed {
            TimerAction::Disarm
        } else {
            TimerAction::Keep
        }
    }

    fn should_invoke(&self, now: Instant) -> bool {
        self.quiet_period_elapsed(now)
            || self
                .options
                .max_wait()
                .is_some_and(|max_wait| self.since_last_invoke(now) >= max_wait)
    }

    fn quiet_period_elapsed(&self, now: Instant) -> bool {
        let Some(last_call) = self.last_call_time else {
            return true;
        };

        // A clock that went backwards is treated as the trailing edge.
        match now.checked_duration_since(last_call) {
            Some(since_last_call) => since_last_call >= self.options.wait(),
            None => true,
        }
    }

    fn remaining_wait(&self, now: Instant) -> Duration {
        let since_last_call = self
            .last_call_time
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        let waiting = self.options.wait().saturating_sub(since_last_call);

        match self.options.max_wait() {
            Some(max_wait) => waiting.min(max_wait.saturating_sub(self.since_last_invoke(now))),
            None => waiting,
        }
    }

    fn since_last_invoke(&self, now: Instant) -> Duration {
        self.last_invoke_time
            .map_or(Duration::MAX, |last| now.saturating_duration_since(last))
    }

    fn leading_edge(&mut self, now: Instant) -> Step<A> {
        // Starts the max wait window.
        self.last_invoke_time = Some(now);
        let arm = self.arm(self.options.wait());
        let invoke = if self.options.leading() {
            self.invoke(now, Edge::Leading)
        } else {
            None
        };
        Step {
            invoke,
            timer: TimerAction::Arm(arm),
        }
    }

    fn trailing_edge(&mut self, now: Instant, edge: Edge) -> Step<A> {
        self.armed = None;

        let invoke = if self.options.trailing() {
            self.invoke(now, edge)
        } else {
            None
        };
        self.last_args = None;

        Step {
            invoke,
            timer: TimerAction::Disarm,
        }
    }

    fn invoke(&mut self, now: Instant, edge: Edge) -> Option<Invocation<A>> {
        let args = self.last_args.take()?;
        self.last_invoke_time = Some(now);
        Some(Invocation { args, edge })
    }

    fn arm(&mut self, delay: Duration) -> Arm {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        self.armed = Some(generation);
        Arm { generation, delay }
    }
}
