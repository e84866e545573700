//! # Async Task Coordination Library
//!
//! Runs CPU-bound jobs off the caller's control path and hands their output
//! back through a future. Jobs run on tokio's blocking pool when a runtime is
//! current and on a dedicated named thread otherwise, so the same executor
//! works from async code, plain threads and `main`.
//!
//! Waiting never spins: a job queued behind the concurrency limit parks on a
//! semaphore, and a caller awaiting its result parks on a oneshot channel.

pub mod executor;
pub mod task;

pub use executor::{BlockingExecutor, ExecutorConfig, ExecutorMetrics};
pub use task::{TaskError, TaskHandle, TaskResult};

/// Re-export common types
pub type Result<T> = std::result::Result<T, TaskError>;
