//! Worker threads that run one task each and report back over a channel.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::task::{SharedTask, Task, TaskResult};
use crossbeam_channel::Sender;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Run a task, converting a panic in the leaf into an ordinary failure so
/// one bad task cannot poison the combinator that launched it.
pub(crate) fn run_task(task: &dyn Task, arg: i64) -> TaskResult {
    match catch_unwind(AssertUnwindSafe(|| task.execute(arg))) {
        Ok(outcome) => outcome,
        Err(payload) => Err(Error::WorkerPanic(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Spawn one detached worker running `task` against `arg`.
///
/// The worker checks `cancel` before delivering and then uses a
/// non-blocking send, so once the combinator has committed an outcome no
/// worker can block on a result nobody will read. The worker itself is
/// never force-terminated; a straggler runs to completion and exits
/// silently.
pub(crate) fn spawn_worker(
    config: &Config,
    index: usize,
    task: SharedTask,
    arg: i64,
    results: Sender<TaskResult>,
    cancel: Arc<AtomicBool>,
) -> Result<()> {
    let name = format!("{}-{}", config.thread_name_prefix, index);
    let mut builder = thread::Builder::new().name(name);

    if let Some(stack_size) = config.stack_size {
        builder = builder.stack_size(stack_size);
    }

    builder
        .spawn(move || {
            let outcome = run_task(&*task, arg);

            if cancel.load(Ordering::Acquire) {
                return;
            }
            let _ = results.try_send(outcome);
        })
        .map_err(|e| Error::executor(format!("spawn failed: {}", e)))?;

    Ok(())
}
