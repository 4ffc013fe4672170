//! Mock clock for testing.

use crate::application::ports::Clock;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Manually driven clock.
///
/// Time only moves when a test says so, which makes debounce edges exact:
/// a call at 30ms and a timer at 100ms happen at precisely those offsets.
/// Pair it with [`ManualTimer`](super::ManualTimer) so armed timers fire as
/// the clock moves.
///
/// # Examples
///
/// ```
/// use debounce::infrastructure::mocks::MockClock;
/// use debounce::application::ports::Clock;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let clock = MockClock::new(start);
/// assert_eq!(clock.now(), start);
///
/// clock.advance(Duration::from_millis(30));
/// assert_eq!(clock.elapsed(), Duration::from_millis(30));
///
/// // Clones share the same time
/// let shared = clock.clone();
/// shared.set(start + Duration::from_secs(1));
/// assert_eq!(clock.elapsed(), Duration::from_secs(1));
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    current: Arc<Mutex<Instant>>,
}

impl MockClock {
    /// Create a mock clock starting at `start`.
    pub fn new(start: Instant) -> Self {
        Self {
            start,
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.current.lock() += by;
    }

    /// Jump to an instant, forwards or backwards.
    pub fn set(&self, instant: Instant) {
        *self.current.lock() = instant;
    }

    /// Time since the instant the clock was created with.
    ///
    /// Saturates at zero if the clock was set before its start.
    pub fn elapsed(&self) -> Duration {
        self.now().saturating_duration_since(self.start)
    }

    /// The instant the clock was created with.
    pub fn start(&self) -> Instant {
        self.start
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_mock_clock() {
        let start = Instant::now();
        let clock = MockClock::new(start);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.start(), start);

        clock.advance(Duration::from_millis(160));
        assert_eq!(clock.elapsed(), Duration::from_millis(160));
    }

    #[test]
    fn test_set_backwards_saturates_elapsed() {
        let start = Instant::now() + Duration::from_secs(10);
        let clock = MockClock::new(start);

        clock.set(start - Duration::from_secs(5));
        assert_eq!(clock.now(), start - Duration::from_secs(5));
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_clones_share_time_across_threads() {
        let start = Instant::now();
        let clock = MockClock::new(start);
        let clone = clock.clone();

        thread::spawn(move || clone.advance(Duration::from_secs(5)))
            .join()
            .unwrap();
        assert_eq!(clock.now(), start + Duration::from_secs(5));
    }
}
