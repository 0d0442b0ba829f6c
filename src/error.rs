pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("pipeline has no stages")]
    EmptyPipeline,

    #[error("no tasks to execute")]
    NoTasks,

    #[error("timeout reached after {0:?}")]
    Timeout(std::time::Duration),

    #[error("error limit exceeded: {failures} failures, limit {limit}")]
    ErrorLimitExceeded { failures: usize, limit: usize },

    #[error("task failed: {0}")]
    TaskFailed(String),

    #[error("worker panic: {0}")]
    WorkerPanic(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("executor error: {0}")]
    Executor(String),
}

impl Error {
    pub fn task_failed<S: Into<String>>(msg: S) -> Self {
        Error::TaskFailed(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn executor<S: Into<String>>(msg: S) -> Self {
        Error::Executor(msg.into())
    }
}
