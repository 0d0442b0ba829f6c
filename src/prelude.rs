pub use crate::combinator::{
    GreatestSearchExecutor, MapReduceExecutor, RaceExecutor, SequentialPipeline, TimedExecutor,
};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{Error, Result};
pub use crate::task::{shared, SharedTask, Task, TaskResult};
