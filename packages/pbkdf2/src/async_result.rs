//! Deferred derivation result

use crate::{DerivedKey, Pbkdf2Error, Result};
use async_task::TaskHandle;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// Future resolving to the key produced by a background derivation
///
/// Input validation has already succeeded by the time this exists; the only
/// failure it can yield is `Pbkdf2Error::DerivationUnavailable`.
#[must_use = "the derivation runs regardless, but its key is lost if this is dropped"]
pub struct AsyncDerivedKey {
    handle: TaskHandle<Result<DerivedKey>>,
}

impl AsyncDerivedKey {
    pub(crate) fn new(handle: TaskHandle<Result<DerivedKey>>) -> Self {
        Self { handle }
    }

    /// Wait at most `duration` for the key
    ///
    /// The derivation itself is not interrupted; on timeout it finishes in the
    /// background and its output is discarded. Requires a tokio runtime with
    /// the time driver enabled.
    ///
    /// # Errors
    ///
    /// Returns `Pbkdf2Error::DerivationUnavailable` on timeout or derivation failure.
    pub async fn with_timeout(self, duration: Duration) -> Result<DerivedKey> {
        self.handle.with_timeout(duration).await?
    }
}

impl Future for AsyncDerivedKey {
    type Output = Result<DerivedKey>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) => {
                tracing::warn!("PBKDF2 worker lost: {e}");
                Poll::Ready(Err(Pbkdf2Error::from(e)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
