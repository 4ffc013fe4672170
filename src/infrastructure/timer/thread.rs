//! Timer backed by a parked OS thread.

use crate::application::ports::{ScheduleError, ScheduledTask, Timer, TimerTask};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, Thread};
use std::time::{Duration, Instant};

/// Timer that parks a dedicated thread until the deadline.
///
/// Works without an async runtime. Each armed timer owns one short-lived
/// thread; cancelling wakes it so it exits right away.
#[derive(Debug, Clone, Default)]
pub struct ThreadTimer {
    name: Option<String>,
}

impl ThreadTimer {
    /// Create a thread timer.
    pub fn new() -> Self {
        Self { name: None }
    }

    /// Name the timer threads (useful in debuggers and panic messages).
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Timer for ThreadTimer {
    fn schedule(
        &self,
        delay: Duration,
        task: TimerTask,
    ) -> Result<Box<dyn ScheduledTask>, ScheduleError> {
        // None: the deadline is past what `Instant` can hold, so park until cancelled
        let deadline = Instant::now().checked_add(delay);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let mut builder = thread::Builder::new();
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }

        let handle = builder
            .spawn(move || {
                if wait_for(deadline, &flag) {
                    task();
                }
            })
            .map_err(|e| ScheduleError::new(e.to_string()))?;

        Ok(Box::new(ThreadTask {
            cancelled,
            thread: handle.thread().clone(),
        }))
    }
}

/// Park until `deadline` or cancellation. Returns true if the deadline won.
fn wait_for(deadline: Option<Instant>, cancelled: &AtomicBool) -> bool {
    loop {
        if cancelled.load(Ordering::Acquire) {
            return false;
        }
        match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return !cancelled.load(Ordering::Acquire);
                }
                thread::park_timeout(deadline - now);
            }
            None => thread::park(),
        }
    }
}

#[derive(Debug)]
struct ThreadTask {
    cancelled: Arc<AtomicBool>,
    thread: Thread,
}

impl ScheduledTask for ThreadTask {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.thread.unpark();
    }
}
