//! Blocking, future and callback entry points

use crate::digest::IntoDigest;
use crate::engine::Pbkdf2Engine;
use crate::input::{normalize, BinaryLike, DerivationRequest, IntoIterations, IntoKeyLength};
use crate::provider::HmacProvider;
use crate::{AsyncDerivedKey, DerivedKey, Pbkdf2Error, Result};
use async_task::{BlockingExecutor, ExecutorConfig};
use once_cell::sync::Lazy;
use std::sync::Arc;

static DEFAULT_EXECUTOR: Lazy<BlockingExecutor> = Lazy::new(|| {
    BlockingExecutor::new(ExecutorConfig::default().with_thread_name("cryypt-pbkdf2"))
});

/// Executor shared by the free functions and builders without a custom one
#[must_use]
pub fn default_executor() -> &'static BlockingExecutor {
    &DEFAULT_EXECUTOR
}

/// Derive a key on a worker thread
///
/// Validation happens before this returns; the future only carries the
/// derivation itself.
///
/// ```rust,ignore
/// let key = cryypt_pbkdf2::pbkdf2("password", "salt", 600_000, 32, "sha256")?.await?;
/// ```
///
/// # Errors
///
/// Returns the normalizer's validation errors immediately. The future
/// resolves to `Pbkdf2Error::DerivationUnavailable` if the derivation fails.
pub fn pbkdf2(
    password: impl BinaryLike,
    salt: impl BinaryLike,
    iterations: impl IntoIterations,
    key_length: impl IntoKeyLength,
    digest: impl IntoDigest,
) -> Result<AsyncDerivedKey> {
    let request = normalize(password, salt, iterations, key_length, digest)?;
    Ok(spawn_derivation(
        default_executor(),
        Arc::new(Pbkdf2Engine::new()),
        request,
    ))
}

/// Derive a key on a worker thread and report the outcome to `callback`
///
/// When this returns `Ok(())` the callback will be invoked exactly once, on
/// the worker, with either the key or a `DerivationUnavailable` error. When it
/// returns `Err` the callback is dropped without being called.
///
/// # Errors
///
/// Returns the normalizer's validation errors.
pub fn pbkdf2_with_callback<F>(
    password: impl BinaryLike,
    salt: impl BinaryLike,
    iterations: impl IntoIterations,
    key_length: impl IntoKeyLength,
    digest: impl IntoDigest,
    callback: F,
) -> Result<()>
where
    F: FnOnce(Result<DerivedKey>) + Send + 'static,
{
    let request = normalize(password, salt, iterations, key_length, digest)?;
    spawn_with_callback(
        default_executor(),
        Arc::new(Pbkdf2Engine::new()),
        request,
        callback,
    );
    Ok(())
}

/// Derive a key on the calling thread
///
/// # Errors
///
/// Returns the normalizer's validation errors or `DerivationUnavailable`.
pub fn pbkdf2_sync(
    password: impl BinaryLike,
    salt: impl BinaryLike,
    iterations: impl IntoIterations,
    key_length: impl IntoKeyLength,
    digest: impl IntoDigest,
) -> Result<DerivedKey> {
    let request = normalize(password, salt, iterations, key_length, digest)?;
    Pbkdf2Engine::new().derive(&request)
}

pub(crate) fn spawn_derivation<P>(
    executor: &BlockingExecutor,
    engine: Arc<Pbkdf2Engine<P>>,
    request: DerivationRequest,
) -> AsyncDerivedKey
where
    P: HmacProvider + 'static,
{
    tracing::trace!(digest = %request.digest(), "dispatching PBKDF2 derivation");
    AsyncDerivedKey::new(executor.spawn(move || engine.derive(&request)))
}

pub(crate) fn spawn_with_callback<P, F>(
    executor: &BlockingExecutor,
    engine: Arc<Pbkdf2Engine<P>>,
    request: DerivationRequest,
    callback: F,
) where
    P: HmacProvider + 'static,
    F: FnOnce(Result<DerivedKey>) + Send + 'static,
{
    let mut completion = Completion::new(callback);
    tracing::trace!(digest = %request.digest(), "dispatching PBKDF2 derivation with callback");
    drop(executor.spawn(move || {
        let result = engine.derive(&request);
        completion.complete(result);
    }));
}

/// Owns a completion callback and guarantees it fires exactly once
///
/// If the job is dropped before finishing (worker panic, worker never
/// started) the callback receives `DerivationUnavailable` from `Drop`.
struct Completion<F: FnOnce(Result<DerivedKey>)> {
    callback: Option<F>,
}

impl<F: FnOnce(Result<DerivedKey>)> Completion<F> {
    fn new(callback: F) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    fn complete(&mut self, result: Result<DerivedKey>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }
}

impl<F: FnOnce(Result<DerivedKey>)> Drop for Completion<F> {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            tracing::warn!("PBKDF2 job dropped before completing");
            callback(Err(Pbkdf2Error::unavailable(
                "derivation worker stopped before producing a key",
            )));
        }
    }
}
