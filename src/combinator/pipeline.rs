//! Sequential chaining: each task feeds the next.

use crate::error::{Error, Result};
use crate::task::{SharedTask, Task};

/// Runs its tasks one at a time, feeding each task's output to the next.
///
/// The first failure is returned verbatim and the remaining tasks never
/// run. There is no internal concurrency.
pub struct SequentialPipeline {
    tasks: Vec<SharedTask>,
}

impl SequentialPipeline {
    pub fn new(tasks: Vec<SharedTask>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Task for SequentialPipeline {
    fn execute(&self, arg: i64) -> Result<i64> {
        let (first, rest) = self.tasks.split_first().ok_or(Error::EmptyPipeline)?;

        let mut value = first.execute(arg)?;
        for task in rest {
            value = task.execute(value)?;
        }

        Ok(value)
    }
}

impl std::fmt::Debug for SequentialPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequentialPipeline")
            .field("stages", &self.tasks.len())
            .finish()
    }
}
