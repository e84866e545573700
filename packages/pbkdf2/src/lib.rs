//! # Cyrup PBKDF2
//!
//! Password-based key derivation (PBKDF2, RFC 8018) over HMAC-SHA1,
//! HMAC-SHA256 and HMAC-SHA512.
//!
//! ## Features
//!
//! - **Early validation**: malformed input is rejected before any work is scheduled
//! - **Three execution forms**: blocking, future, and exactly-once callback
//! - **Pluggable HMAC**: the engine runs over any [`HmacProvider`]
//! - **Secret hygiene**: passwords, salts and derived keys are wiped on drop
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cryypt_pbkdf2::{pbkdf2, pbkdf2_sync, Pbkdf2};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Blocking
//! let key = pbkdf2_sync("password", "salt", 1, 20, "sha1")?;
//! assert_eq!(key.to_hex(), "0c60c80f961f0e71f3a9b524af6012062fe037a6");
//!
//! // Future - validation errors surface from the call, not the await
//! let key = pbkdf2("password", "salt", 600_000, 32, "sha256")?.await?;
//!
//! // Builder
//! let key = Pbkdf2::sha512()
//!     .iterations(210_000)
//!     .with_random_salt()
//!     .derive("password")?
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod api;
pub mod async_result;
pub mod config;
pub mod derived_key;
pub mod digest;
pub mod engine;
pub mod error;
pub mod input;
pub mod provider;
pub mod salt;

// Re-export core types
pub use async_result::AsyncDerivedKey;
pub use config::Pbkdf2Config;
pub use derived_key::DerivedKey;
pub use digest::{Digest, IntoDigest};
pub use engine::Pbkdf2Engine;
pub use error::{InputParam, Pbkdf2Error, Result};
pub use input::{
    normalize, BinaryLike, DerivationRequest, IntoIterations, IntoKeyLength, MAX_ALLOC,
};
pub use provider::{HmacProvider, KeyedHmac, RustCryptoHmac};
pub use salt::generate_salt;

// Re-export the main API
pub use api::{pbkdf2, pbkdf2_sync, pbkdf2_with_callback, Pbkdf2, Pbkdf2Builder};

// Re-export executor types so callers can size the worker pool
pub use async_task::{BlockingExecutor, ExecutorConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        pbkdf2, pbkdf2_sync, pbkdf2_with_callback, Digest, DerivedKey, Pbkdf2, Pbkdf2Config,
        Pbkdf2Error, Result,
    };
}
