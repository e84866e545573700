//! Error handling for key derivation

use async_task::TaskError;
use std::fmt;
use thiserror::Error;

/// Expectation attached to [`Pbkdf2Error::InvalidInputType`]
pub const EXPECTED_BINARY: &str = "must be a string, a byte buffer, or a binary view";

/// Caller-supplied binary parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputParam {
    /// The secret being stretched
    Password,
    /// The per-derivation salt
    Salt,
}

impl fmt::Display for InputParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password => f.write_str("Password"),
            Self::Salt => f.write_str("Salt"),
        }
    }
}

/// Key derivation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Pbkdf2Error {
    /// Password or salt is neither text nor bytes
    #[error("{param} {expected}")]
    InvalidInputType {
        /// Which parameter was rejected
        param: InputParam,
        /// What the parameter should have been
        expected: &'static str,
    },

    /// Iteration count is not a positive integer
    #[error("Bad iterations: {0}")]
    InvalidIterations(String),

    /// Key length is negative, too large or not an integer
    #[error("Bad key length: {0}")]
    InvalidKeyLength(String),

    /// Digest name is not one of `sha1`, `sha256`, `sha512`
    #[error("Unsupported digest: {0}")]
    UnsupportedDigest(String),

    /// No salt was configured on a builder
    #[error("Salt not provided for key derivation")]
    MissingSalt,

    /// The HMAC provider or the worker running it failed
    #[error("Key derivation unavailable: {0}")]
    DerivationUnavailable(String),

    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Pbkdf2Error {
    /// Create a `DerivationUnavailable` error
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::DerivationUnavailable(msg.into())
    }

    /// Create an `InvalidInputType` error for `param`
    #[must_use]
    pub fn invalid_input(param: InputParam) -> Self {
        Self::InvalidInputType {
            param,
            expected: EXPECTED_BINARY,
        }
    }

    /// Whether the error was raised by input validation, before any derivation work
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputType { .. }
                | Self::InvalidIterations(_)
                | Self::InvalidKeyLength(_)
                | Self::UnsupportedDigest(_)
                | Self::MissingSalt
        )
    }
}

impl From<TaskError> for Pbkdf2Error {
    fn from(err: TaskError) -> Self {
        Self::DerivationUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for Pbkdf2Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for key derivation operations
pub type Result<T> = std::result::Result<T, Pbkdf2Error>;
