//! Concurrent map over a task set, then an order-independent reduce.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::task::{SharedTask, Task};
use crate::worker::spawn_worker;
use crossbeam_channel::bounded;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Runs all tasks concurrently on the same argument, waits for every one,
/// and reduces the successful values.
///
/// The first failure to arrive is returned verbatim and the call abandons
/// the rest of the work; straggler results are dropped without blocking
/// any worker. Values reach the reduction in arrival order, which is
/// non-deterministic, so the supplied function must be order-independent
/// (min, max, sum).
pub struct MapReduceExecutor {
    tasks: Vec<SharedTask>,
    reduce: Box<dyn Fn(&[i64]) -> i64 + Send + Sync>,
    config: Config,
}

impl MapReduceExecutor {
    pub fn new<R>(tasks: Vec<SharedTask>, reduce: R) -> Self
    where
        R: Fn(&[i64]) -> i64 + Send + Sync + 'static,
    {
        Self::with_config(tasks, reduce, Config::default())
    }

    pub fn with_config<R>(tasks: Vec<SharedTask>, reduce: R, config: Config) -> Self
    where
        R: Fn(&[i64]) -> i64 + Send + Sync + 'static,
    {
        Self {
            tasks,
            reduce: Box::new(reduce),
            config,
        }
    }
}

impl Task for MapReduceExecutor {
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

        let mut values = Vec::with_capacity(self.tasks.len());
        while values.len() < self.tasks.len() {
            let outcome = rx
                .recv()
                .map_err(|_| Error::executor("worker vanished without reporting"))?;

            match outcome {
                Ok(value) => values.push(value),
                Err(e) => {
                    cancel.store(true, Ordering::Release);
                    return Err(e);
                }
            }
        }

        Ok((self.reduce)(&values))
    }
}

impl std::fmt::Debug for MapReduceExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapReduceExecutor")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}
