//! The uniform unit-of-work contract implemented by leaves and combinators.

use crate::error::Result;
use std::sync::Arc;

/// A unit of work: given an integer argument, produce an integer result or
/// a failure.
///
/// Both caller-supplied leaf computations and every combinator in
/// [`crate::combinator`] implement this trait, so combinators nest
/// arbitrarily. An implementation must be callable concurrently from
/// multiple threads; per-call state lives on the stack of `execute`, never
/// in the task itself.
pub trait Task: Send + Sync {
    /// Run the task against `arg`.
    fn execute(&self, arg: i64) -> Result<i64>;
}

/// A task shared across worker threads.
///
/// Combinators hold their children as `SharedTask` so a worker can keep the
/// task alive past the combinator call that launched it (a timed-out task
/// keeps running; only its result is discarded).
pub type SharedTask = Arc<dyn Task>;

/// Outcome of one task execution, moved across coordination channels.
pub type TaskResult = Result<i64>;

/// Wrap any task in a [`SharedTask`].
pub fn shared<T: Task + 'static>(task: T) -> SharedTask {
    Arc::new(task)
}

impl<F> Task for F
where
    F: Fn(i64) -> Result<i64> + Send + Sync,
{
    fn execute(&self, arg: i64) -> Result<i64> {
        (self)(arg)
    }
}

impl Task for SharedTask {
    fn execute(&self, arg: i64) -> Result<i64> {
        (**self).execute(arg)
    }
}
