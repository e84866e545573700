//! Fluent PBKDF2 builder

use super::dispatch::{default_executor, spawn_derivation, spawn_with_callback};
use crate::config::Pbkdf2Config;
use crate::digest::{Digest, IntoDigest};
use crate::engine::Pbkdf2Engine;
use crate::input::{normalize, BinaryLike, DerivationRequest};
use crate::provider::{HmacProvider, RustCryptoHmac};
use crate::salt::{generate_salt, DEFAULT_SALT_SIZE};
use crate::{AsyncDerivedKey, DerivedKey, Pbkdf2Error, Result};
use async_task::BlockingExecutor;
use std::sync::Arc;
use zeroize::Zeroizing;

/// Main entry point: `Pbkdf2::sha256().with_salt(..).derive(..)`
pub struct Pbkdf2;

impl Pbkdf2 {
    /// Use PBKDF2-HMAC-SHA1
    #[must_use]
    pub fn sha1() -> Pbkdf2Builder {
        Pbkdf2Builder::new(Digest::Sha1)
    }

    /// Use PBKDF2-HMAC-SHA256
    #[must_use]
    pub fn sha256() -> Pbkdf2Builder {
        Pbkdf2Builder::new(Digest::Sha256)
    }

    /// Use PBKDF2-HMAC-SHA512
    #[must_use]
    pub fn sha512() -> Pbkdf2Builder {
        Pbkdf2Builder::new(Digest::Sha512)
    }

    /// Select the digest by name
    ///
    /// # Errors
    ///
    /// Returns `Pbkdf2Error::UnsupportedDigest` for unknown names.
    pub fn digest(digest: impl IntoDigest) -> Result<Pbkdf2Builder> {
        Ok(Pbkdf2Builder::new(digest.into_digest()?))
    }

    /// Start from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Pbkdf2Config::validate`].
    pub fn from_config(config: &Pbkdf2Config) -> Result<Pbkdf2Builder> {
        config.validate()?;
        Ok(Pbkdf2Builder::new(config.digest)
            .iterations(config.iterations)
            .key_length(config.key_length)
            .salt_size(config.salt_size))
    }
}

/// PBKDF2 builder
///
/// Parameters are checked when a derivation is requested, before any work is
/// dispatched. A builder can run any number of derivations.
pub struct Pbkdf2Builder<P = RustCryptoHmac> {
    digest: Digest,
    iterations: u32,
    key_length: usize,
    salt: Option<Zeroizing<Vec<u8>>>,
    salt_size: usize,
    engine: Arc<Pbkdf2Engine<P>>,
    executor: BlockingExecutor,
}

impl Pbkdf2Builder {
    fn new(digest: Digest) -> Self {
        let defaults = Pbkdf2Config::default();
        Self {
            digest,
            iterations: defaults.iterations,
            key_length: digest.output_len(),
            salt: None,
            salt_size: DEFAULT_SALT_SIZE,
            engine: Arc::new(Pbkdf2Engine::new()),
            executor: default_executor().clone(),
        }
    }
}

impl<P: HmacProvider + 'static> Pbkdf2Builder<P> {
    /// Set the iteration count
    #[must_use]
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the derived key length in bytes (defaults to the digest size)
    #[must_use]
    pub fn key_length(mut self, key_length: usize) -> Self {
        self.key_length = key_length;
        self
    }

    /// Set the salt
    #[must_use]
    pub fn with_salt<S: Into<Vec<u8>>>(mut self, salt: S) -> Self {
        self.salt = Some(Zeroizing::new(salt.into()));
        self
    }

    /// Set the length used by [`Pbkdf2Builder::with_random_salt`]
    #[must_use]
    pub fn salt_size(mut self, salt_size: usize) -> Self {
        self.salt_size = salt_size;
        self
    }

    /// Generate a random salt of `salt_size` bytes
    ///
    /// Read it back with [`Pbkdf2Builder::salt`] to store alongside the key.
    #[must_use]
    pub fn with_random_salt(mut self) -> Self {
        self.salt = Some(Zeroizing::new(generate_salt(self.salt_size)));
        self
    }

    /// Run background derivations on `executor` instead of the shared one
    #[must_use]
    pub fn with_executor(mut self, executor: BlockingExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// Swap the HMAC provider
    #[must_use]
    pub fn with_provider<Q: HmacProvider + 'static>(self, provider: Q) -> Pbkdf2Builder<Q> {
        Pbkdf2Builder {
            digest: self.digest,
            iterations: self.iterations,
            key_length: self.key_length,
            salt: self.salt,
            salt_size: self.salt_size,
            engine: Arc::new(Pbkdf2Engine::with_provider(provider)),
            executor: self.executor,
        }
    }

    /// Get the current salt (if set)
    #[must_use]
    pub fn salt(&self) -> Option<&[u8]> {
        self.salt.as_ref().map(|s| s.as_slice())
    }

    /// Validate the parameters against `password`
    ///
    /// # Errors
    ///
    /// Returns `MissingSalt` or the normalizer's validation errors.
    pub fn request(&self, password: impl BinaryLike) -> Result<DerivationRequest> {
        let salt = self.salt.as_ref().ok_or(Pbkdf2Error::MissingSalt)?;
        normalize(
            password,
            salt.as_slice(),
            self.iterations,
            self.key_length,
            self.digest,
        )
    }

    /// Derive on a worker thread
    ///
    /// # Errors
    ///
    /// Returns validation errors immediately; see [`crate::pbkdf2`].
    pub fn derive(&self, password: impl BinaryLike) -> Result<AsyncDerivedKey> {
        let request = self.request(password)?;
        Ok(spawn_derivation(
            &self.executor,
            Arc::clone(&self.engine),
            request,
        ))
    }

    /// Derive on a worker thread and hand the outcome to `callback`
    ///
    /// # Errors
    ///
    /// Returns validation errors immediately; see [`crate::pbkdf2_with_callback`].
    pub fn derive_with<F>(&self, password: impl BinaryLike, callback: F) -> Result<()>
    where
        F: FnOnce(Result<DerivedKey>) + Send + 'static,
    {
        let request = self.request(password)?;
        spawn_with_callback(&self.executor, Arc::clone(&self.engine), request, callback);
        Ok(())
    }

    /// Derive on the calling thread
    ///
    /// # Errors
    ///
    /// Returns validation errors or `DerivationUnavailable`.
    pub fn derive_sync(&self, password: impl BinaryLike) -> Result<DerivedKey> {
        let request = self.request(password)?;
        self.engine.derive(&request)
    }
}
