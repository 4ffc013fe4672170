//! Mock timer for testing.

use crate::application::ports::{Clock, ScheduleError, ScheduledTask, Timer, TimerTask};
use crate::infrastructure::mocks::clock::MockClock;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Timer that fires only when the test advances its [`MockClock`].
///
/// Tasks run synchronously on the thread calling [`ManualTimer::advance`],
/// in deadline order, with the clock set to each task's deadline while it
/// runs. Tasks scheduled by a running task fire in the same `advance` if
/// they fall due before its end. A task whose deadline overflows `Instant`
/// never fires.
///
/// # Examples
///
/// ```
/// use debounce::application::ports::Timer;
/// use debounce::infrastructure::mocks::{ManualTimer, MockClock};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use std::time::{Duration, Instant};
///
/// let clock = MockClock::new(Instant::now());
/// let timer = ManualTimer::new(clock.clone());
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&fired);
///
/// let _task = timer
///     .schedule(
///         Duration::from_millis(100),
///         Box::new(move || flag.store(true, Ordering::SeqCst)),
///     )
///     .unwrap();
///
/// timer.advance(Duration::from_millis(99));
/// assert!(!fired.load(Ordering::SeqCst));
/// timer.advance(Duration::from_millis(1));
/// assert!(fired.load(Ordering::SeqCst));
/// ```
#[derive(Debug, Clone)]
pub struct ManualTimer {
    clock: MockClock,
    queue: Arc<Mutex<Queue>>,
}

#[derive(Debug, Default)]
struct Queue {
    next_seq: u64,
    entries: Vec<Entry>,
}

struct Entry {
    seq: u64,
    deadline: Instant,
    cancelled: Arc<AtomicBool>,
    task: TimerTask,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("seq", &self.seq)
            .field("deadline", &self.deadline)
            .field("cancelled", &self.cancelled.load(Ordering::Relaxed))
            .finish()
    }
}

impl ManualTimer {
    /// Create a timer driven by `clock`.
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            queue: Arc::new(Mutex::new(Queue::default())),
        }
    }

    /// The clock this timer reads deadlines from.
    pub fn clock(&self) -> &MockClock {
        &self.clock
    }

    /// Advance the clock by `by`, firing every task that falls due.
    pub fn advance(&self, by: Duration) {
        self.run_until(self.clock.now() + by);
    }

    /// Advance the clock to `target`, firing every task that falls due.
    pub fn run_until(&self, target: Instant) {
        while let Some(entry) = self.pop_due(target) {
            if entry.deadline > self.clock.now() {
                self.clock.set(entry.deadline);
            }
            (entry.task)();
        }
        if target > self.clock.now() {
            self.clock.set(target);
        }
    }

    /// Number of scheduled tasks that are neither cancelled nor fired.
    pub fn pending_timers(&self) -> usize {
        self.queue
            .lock()
            .entries
            .iter()
            .filter(|entry| !entry.cancelled.load(Ordering::Acquire))
            .count()
    }

    /// Earliest deadline among live tasks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue
            .lock()
            .entries
            .iter()
            .filter(|entry| !entry.cancelled.load(Ordering::Acquire))
            .map(|entry| entry.deadline)
            .min()
    }

    fn pop_due(&self, target: Instant) -> Option<Entry> {
        let mut queue = self.queue.lock();
        queue
            .entries
            .retain(|entry| !entry.cancelled.load(Ordering::Acquire));

        let index = queue
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= target)
            .min_by_key(|(_, entry)| (entry.deadline, entry.seq))
            .map(|(index, _)| index)?;
        Some(queue.entries.swap_remove(index))
    }
}

impl Timer for ManualTimer {
    fn schedule(
        &self,
        delay: Duration,
        task: TimerTask,
    ) -> Result<Box<dyn ScheduledTask>, ScheduleError> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let Some(deadline) = self.clock.now().checked_add(delay) else {
            return Ok(Box::new(ManualTask { cancelled }));
        };

        let mut queue = self.queue.lock();
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.entries.push(Entry {
            seq,
            deadline,
            cancelled: Arc::clone(&cancelled),
            task,
        });
        Ok(Box::new(ManualTask { cancelled }))
    }
}

#[derive(Debug)]
struct ManualTask {
    cancelled: Arc<AtomicBool>,
}

impl ScheduledTask for ManualTask {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
