//! Error-budgeted streaming search for the greatest successful result.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::task::{SharedTask, Task};
use crate::worker::spawn_worker;
use crossbeam_channel::{unbounded, Receiver};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Consumes tasks from a live stream, runs each concurrently, tolerates up
/// to `error_limit` failures, and returns the maximum successful value once
/// the stream is exhausted and every launched worker has reported back.
///
/// Unlike [`MapReduceExecutor`](crate::combinator::MapReduceExecutor) this
/// combinator never short-circuits on a failure: each failure spends one
/// unit of the error budget and the search continues. The call fails with
/// [`Error::ErrorLimitExceeded`] only after the full drain, when the budget
/// is known to be blown.
///
/// The error counter and result accumulator live on the stack of one
/// `execute` call, so concurrent calls against the same instance do not
/// interfere (they do, however, split the shared stream between them).
pub struct GreatestSearchExecutor {
    source: Receiver<SharedTask>,
    error_limit: usize,
    config: Config,
}

impl GreatestSearchExecutor {
    pub fn new(error_limit: usize, source: Receiver<SharedTask>) -> Self {
        Self::with_config(error_limit, source, Config::default())
    }

    pub fn with_config(error_limit: usize, source: Receiver<SharedTask>, config: Config) -> Self {
        Self {
            source,
            error_limit,
            config,
        }
    }

    pub fn error_limit(&self) -> usize {
        self.error_limit
    }
}

impl Task for GreatestSearchExecutor {
    fn execute(&self, arg: i64) -> Result<i64> {
        // Unbounded so every worker delivers without blocking; nothing is
        // discarded here, failures included.
        let (tx, rx) = unbounded();
        let never_cancel = Arc::new(AtomicBool::new(false));

        let mut launched = 0usize;
        for task in self.source.iter() {
            spawn_worker(
                &self.config,
                launched,
                task,
                arg,
                tx.clone(),
                never_cancel.clone(),
            )?;
            launched += 1;
        }
        drop(tx);

        // Stream is closed; now wait for every launched worker, not merely
        // the ones that happen to have finished.
        let mut failures = 0usize;
        let mut greatest: Option<i64> = None;
        for _ in 0..launched {
            let outcome = rx
                .recv()
                .map_err(|_| Error::executor("worker vanished without reporting"))?;

            match outcome {
                Ok(value) => {
                    greatest = Some(greatest.map_or(value, |g| g.max(value)));
                }
                Err(_) => failures += 1,
            }
        }

        if failures > self.error_limit {
            return Err(Error::ErrorLimitExceeded {
                failures,
                limit: self.error_limit,
            });
        }

        greatest.ok_or(Error::NoTasks)
    }
}

impl std::fmt::Debug for GreatestSearchExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreatestSearchExecutor")
            .field("error_limit", &self.error_limit)
            .finish()
    }
}
