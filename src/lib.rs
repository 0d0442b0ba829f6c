//! CONFLUX - Composable Concurrency Combinators
//!
//! A small library of task combinators: higher-order executors that wrap
//! units of work and give them new concurrency semantics — sequential
//! chaining, first-to-finish racing, deadlines, concurrent map-reduce, and
//! error-budgeted streaming search.
//!
//! # Quick Start
//!
//! ```
//! use conflux::prelude::*;
//! use std::time::Duration;
//!
//! // A leaf task is any Fn(i64) -> Result<i64>.
//! let double = shared(|x: i64| Ok(x * 2));
//! let add_one = shared(|x: i64| Ok(x + 1));
//!
//! // Combinators implement Task too, so they nest.
//! let pipeline = SequentialPipeline::new(vec![double, add_one]);
//! let guarded = TimedExecutor::new(shared(pipeline), Duration::from_secs(1));
//!
//! assert_eq!(guarded.execute(20).unwrap(), 41);
//! ```
//!
//! # Combinators
//!
//! - **SequentialPipeline**: chains tasks, feeding each output to the next
//! - **RaceExecutor**: first outcome wins, success or failure
//! - **TimedExecutor**: fails with `Timeout` when the deadline elapses first
//! - **MapReduceExecutor**: waits for all, short-circuits on first failure
//! - **GreatestSearchExecutor**: streams tasks, tolerates a failure budget,
//!   returns the maximum successful value
//!
//! Workers coordinate through channels only; once a combinator commits an
//! outcome, late workers drop their results without blocking, so no call
//! leaks a stuck thread.

#![warn(missing_debug_implementations)]

pub mod combinator;
pub mod config;
pub mod error;
pub mod prelude;
pub mod task;

mod worker;

pub use combinator::{
    GreatestSearchExecutor, MapReduceExecutor, RaceExecutor, SequentialPipeline, TimedExecutor,
};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use task::{shared, SharedTask, Task, TaskResult};
