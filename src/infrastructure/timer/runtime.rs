//! Timer backed by the tokio runtime.

use crate::application::ports::{ScheduleError, ScheduledTask, Timer, TimerTask};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Timer that spawns one sleeping task per armed timer on a tokio runtime.
///
/// Cancelling aborts the task. The timer task runs the debounced target on a
/// runtime worker, so targets should not block for long.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    handle: Handle,
}

impl TokioTimer {
    /// Create a timer that spawns onto `handle`.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Create a timer for the runtime the caller is running on.
    ///
    /// Returns `None` outside of a tokio runtime.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Timer for TokioTimer {
    fn schedule(
        &self,
        delay: Duration,
        task: TimerTask,
    ) -> Result<Box<dyn ScheduledTask>, ScheduleError> {
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        Ok(Box::new(TokioTask { join }))
    }
}

#[derive(Debug)]
struct TokioTask {
    join: JoinHandle<()>,
}

impl ScheduledTask for TokioTask {
    fn cancel(&self) {
        self.join.abort();
    }
}
