//! PBKDF2 parameter presets

use crate::digest::Digest;
use crate::input::{IntoIterations, IntoKeyLength};
use crate::salt::DEFAULT_SALT_SIZE;
use crate::{Pbkdf2Error, Result};
use serde::{Deserialize, Serialize};

/// Derivation parameters, loadable from JSON
///
/// Missing fields fall back to [`Pbkdf2Config::owasp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pbkdf2Config {
    /// PRF digest
    pub digest: Digest,
    /// Iteration count
    pub iterations: u32,
    /// Derived key length in bytes
    pub key_length: usize,
    /// Length of generated salts in bytes
    pub salt_size: usize,
}

impl Pbkdf2Config {
    /// OWASP 2023 recommendation for PBKDF2-HMAC-SHA256
    #[must_use]
    pub fn owasp() -> Self {
        Self {
            digest: Digest::Sha256,
            iterations: 600_000,
            key_length: 32,
            salt_size: DEFAULT_SALT_SIZE,
        }
    }

    /// PBKDF2-HMAC-SHA512 with a 64-byte key
    #[must_use]
    pub fn high_security() -> Self {
        Self {
            digest: Digest::Sha512,
            iterations: 210_000, // OWASP 2023
            key_length: 64,
            salt_size: 32,
        }
    }

    /// PBKDF2-HMAC-SHA1, for interoperating with older stores
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            digest: Digest::Sha1,
            iterations: 1_300_000, // OWASP 2023
            key_length: 20,
            salt_size: DEFAULT_SALT_SIZE,
        }
    }

    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    ///
    /// Returns `Pbkdf2Error::InvalidConfig` for malformed JSON or unknown
    /// digests, and the normalizer's errors for out-of-range numbers.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric fields against the derivation invariants
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterations`, `InvalidKeyLength`, or `InvalidConfig`
    /// for a zero salt size.
    pub fn validate(&self) -> Result<()> {
        self.iterations.into_iterations()?;
        self.key_length.into_key_length()?;
        if self.salt_size == 0 {
            return Err(Pbkdf2Error::InvalidConfig("salt_size must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for Pbkdf2Config {
    fn default() -> Self {
        Self::owasp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for config in [
            Pbkdf2Config::owasp(),
            Pbkdf2Config::high_security(),
            Pbkdf2Config::legacy(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = Pbkdf2Config::from_json(r#"{"digest":"sha512","iterations":1000}"#)
            .expect("partial config should load");
        assert_eq!(config.digest, Digest::Sha512);
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.key_length, Pbkdf2Config::owasp().key_length);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            Pbkdf2Config::from_json(r#"{"digest":"md5"}"#),
            Err(Pbkdf2Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Pbkdf2Config::from_json(r#"{"iterations":0}"#),
            Err(Pbkdf2Error::InvalidIterations(_))
        ));
        assert!(matches!(
            Pbkdf2Config::from_json(r#"{"key_length":1073741824}"#),
            Err(Pbkdf2Error::InvalidKeyLength(_))
        ));
        assert!(matches!(
            Pbkdf2Config::from_json(r#"{"salt_size":0}"#),
            Err(Pbkdf2Error::InvalidConfig(_))
        ));
    }
}
