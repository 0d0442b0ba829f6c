//! Deadline enforcement around a single task.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::task::{SharedTask, Task};
use crate::worker::spawn_worker;
use crossbeam_channel::{after, bounded, select};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Races one task against a deadline.
///
/// If the task finishes first its result is returned unchanged, success or
/// failure. If the deadline elapses first the call fails with
/// [`Error::Timeout`]; the worker keeps running to completion (tasks are
/// not preemptible) but its result is discarded unseen.
pub struct TimedExecutor {
    task: SharedTask,
    timeout: Duration,
    config: Config,
}

impl TimedExecutor {
    pub fn new(task: SharedTask, timeout: Duration) -> Self {
        Self::with_config(task, timeout, Config::default())
    }

    pub fn with_config(task: SharedTask, timeout: Duration, config: Config) -> Self {
        Self {
            task,
            timeout,
            config,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Task for TimedExecutor {
    fn execute(&self, arg: i64) -> Result<i64> {
        let (tx, rx) = bounded(1);
        let cancel = Arc::new(AtomicBool::new(false));

        spawn_worker(&self.config, 0, self.task.clone(), arg, tx, cancel.clone())?;

        select! {
            recv(rx) -> outcome => {
                outcome.map_err(|_| Error::executor("worker vanished without reporting"))?
            }
            recv(after(self.timeout)) -> _ => {
                cancel.store(true, Ordering::Release);
                Err(Error::Timeout(self.timeout))
            }
        }
    }
}

impl std::fmt::Debug for TimedExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedExecutor")
            .field("timeout", &self.timeout)
            .finish()
    }
}
