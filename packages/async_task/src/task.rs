//! Completion handles for dispatched jobs

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::oneshot;

/// Error types for dispatched jobs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// The job was dropped before producing a value (panicked or never started)
    #[error("Task was dropped before completing")]
    Dropped,
    /// The caller stopped waiting before the job finished
    #[error("Task timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for dispatched jobs
pub type TaskResult<T> = Result<T, TaskError>;

/// Future resolving to the output of a job dispatched on a [`crate::BlockingExecutor`]
///
/// Dropping the handle does not stop the job; it runs to completion and its
/// output is discarded.
#[must_use = "the job keeps running, but its output is lost if the handle is dropped"]
pub struct TaskHandle<T> {
    receiver: oneshot::Receiver<T>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<T>) -> Self {
        Self { receiver }
    }

    /// Wait for the job, giving up after `duration`
    ///
    /// Requires a tokio runtime with the time driver enabled.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::Timeout` if the job exceeds the timeout duration,
    /// or `TaskError::Dropped` if the job died without producing a value.
    pub async fn with_timeout(self, duration: Duration) -> TaskResult<T> {
        match tokio::time::timeout(duration, self).await {
            Ok(result) => result,
            Err(_) => Err(TaskError::Timeout(duration)),
        }
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = TaskResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(value)) => Poll::Ready(Ok(value)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(TaskError::Dropped)),
            Poll::Pending => Poll::Pending,
        }
    }
}
