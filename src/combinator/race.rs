//! First-to-finish racing: fastest outcome wins, success or failure.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::task::{SharedTask, Task};
use crate::worker::spawn_worker;
use crossbeam_channel::bounded;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Runs all tasks concurrently on the same argument and returns whichever
/// outcome arrives first, with no preference for success over failure.
///
/// Which task wins an exact tie is whichever delivery the channel happens
/// to order first; callers must not rely on a particular winner. Losing
/// workers observe the cancel flag or a disconnected channel and exit
/// without blocking; they are never force-terminated.
pub struct RaceExecutor {
    tasks: Vec<SharedTask>,
    config: Config,
}

impl RaceExecutor {
    pub fn new(tasks: Vec<SharedTask>) -> Self {
        Self::with_config(tasks, Config::default())
    }

    pub fn with_config(tasks: Vec<SharedTask>, config: Config) -> Self {
        Self { tasks, config }
    }
}

impl Task for RaceExecutor {
    fn execute(&self, arg: i64) -> Result<i64> {
        if self.tasks.is_empty() {
            return Err(Error::NoTasks);
        }

        // Capacity covers every worker, so no send ever blocks.
        let (tx, rx) = bounded(self.tasks.len());
        let cancel = Arc::new(AtomicBool::new(false));

        for (index, task) in self.tasks.iter().enumerate() {
            spawn_worker(
                &self.config,
                index,
                task.clone(),
                arg,
                tx.clone(),
                cancel.clone(),
            )?;
        }
        drop(tx);

        let first = rx
            .recv()
            .map_err(|_| Error::executor("all workers vanished without reporting"))?;
        cancel.store(true, Ordering::Release);

        first
    }
}

impl std::fmt::Debug for RaceExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaceExecutor")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}
