//! Combinators over the [`Task`](crate::task::Task) contract.
//!
//! Each combinator implements `Task` itself, so they nest arbitrarily:
//!
//! - [`SequentialPipeline`]: chain tasks, each feeding the next
//! - [`RaceExecutor`]: run concurrently, first outcome wins
//! - [`TimedExecutor`]: race one task against a deadline
//! - [`MapReduceExecutor`]: run concurrently, wait for all, reduce
//! - [`GreatestSearchExecutor`]: error-budgeted streaming max search
//!
//! Concurrency is internal to each `execute` call; composing combinators
//! never requires the caller to manage threads or channels.

pub mod greatest;
pub mod map_reduce;
pub mod pipeline;
pub mod race;
pub mod timed;

pub use greatest::GreatestSearchExecutor;
pub use map_reduce::MapReduceExecutor;
pub use pipeline::SequentialPipeline;
pub use race::RaceExecutor;
pub use timed::TimedExecutor;
