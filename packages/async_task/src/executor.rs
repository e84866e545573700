//! Bounded worker dispatch for CPU-bound jobs

use crate::TaskHandle;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{oneshot, Semaphore};

/// Configuration for the blocking executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Upper bound on jobs running at the same time
    pub max_concurrent_tasks: usize,
    /// Name given to dedicated worker threads
    pub thread_name: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: num_cpus::get().max(1),
            thread_name: "cryypt-worker".to_string(),
        }
    }
}

impl ExecutorConfig {
    /// Limit how many jobs may run at once (clamped to at least one)
    #[must_use]
    pub fn with_max_concurrent_tasks(mut self, max: usize) -> Self {
        self.max_concurrent_tasks = max.max(1);
        self
    }

    /// Set the name used for dedicated worker threads
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

/// Snapshot of executor activity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutorMetrics {
    /// Jobs handed to the executor
    pub tasks_dispatched: u64,
    /// Jobs that ran to completion
    pub tasks_completed: u64,
    /// Mean wall-clock time of completed jobs
    pub average_execution_time: Duration,
}

#[derive(Debug, Default)]
struct MetricsCounters {
    dispatched: AtomicU64,
    completed: AtomicU64,
    total_nanos: AtomicU64,
}

impl MetricsCounters {
    fn record_completion(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.total_nanos.fetch_add(nanos, Ordering::Relaxed);
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ExecutorMetrics {
        let tasks_completed = self.completed.load(Ordering::Relaxed);
        let total_nanos = self.total_nanos.load(Ordering::Relaxed);
        let average_execution_time = total_nanos
            .checked_div(tasks_completed)
            .map_or(Duration::ZERO, Duration::from_nanos);

        ExecutorMetrics {
            tasks_dispatched: self.dispatched.load(Ordering::Relaxed),
            tasks_completed,
            average_execution_time,
        }
    }
}

/// Executor that runs blocking jobs off the caller's control path
///
/// Cloning is cheap; clones share the concurrency limit and metrics.
#[derive(Debug, Clone)]
pub struct BlockingExecutor {
    config: ExecutorConfig,
    permits: Arc<Semaphore>,
    metrics: Arc<MetricsCounters>,
}

impl Default for BlockingExecutor {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}

impl BlockingExecutor {
    /// Create new blocking executor
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent_tasks.max(1)));

        Self {
            config,
            permits,
            metrics: Arc::new(MetricsCounters::default()),
        }
    }

    /// Executor configuration
    #[must_use]
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Number of jobs that could start right now without queueing
    #[must_use]
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }

    /// Get current metrics
    #[must_use]
    pub fn metrics(&self) -> ExecutorMetrics {
        self.metrics.snapshot()
    }

    /// Dispatch `job` to a worker and return a handle to its output
    ///
    /// Inside a tokio runtime the job goes to the runtime's blocking pool;
    /// elsewhere it gets its own named thread. If no worker can be started the
    /// job is dropped and the handle resolves to `TaskError::Dropped`.
    pub fn spawn<F, T>(&self, job: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let permits = Arc::clone(&self.permits);
        let metrics = Arc::clone(&self.metrics);
        metrics.dispatched.fetch_add(1, Ordering::Relaxed);

        let work = move || {
            // Parks this worker until a slot is free.
            let permit = futures::executor::block_on(permits.acquire_owned()).ok();
            let started = Instant::now();
            let output = job();
            metrics.record_completion(started.elapsed());
            // The slot is free before the caller can observe the output.
            drop(permit);
            if tx.send(output).is_err() {
                tracing::trace!("task handle dropped before job completed");
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::trace!("dispatching job to tokio blocking pool");
                drop(handle.spawn_blocking(work));
            }
            Err(_) => {
                tracing::trace!(thread = %self.config.thread_name, "dispatching job to worker thread");
                if let Err(e) = std::thread::Builder::new()
                    .name(self.config.thread_name.clone())
                    .spawn(work)
                {
                    tracing::error!("Failed to start worker thread: {e}");
                }
            }
        }

        TaskHandle::new(rx)
    }
}
