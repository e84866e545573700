//! Supported PRF hash functions

use crate::{Pbkdf2Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hash function underlying the HMAC pseudorandom function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Digest {
    /// HMAC-SHA-1, 20-byte blocks
    Sha1,
    /// HMAC-SHA-256, 32-byte blocks
    #[default]
    Sha256,
    /// HMAC-SHA-512, 64-byte blocks
    Sha512,
}

impl Digest {
    /// Every supported digest
    pub const ALL: [Self; 3] = [Self::Sha1, Self::Sha256, Self::Sha512];

    /// HMAC output length in bytes (`hLen`)
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Digest {
    type Err = Pbkdf2Error;

    /// Names are matched exactly; `"SHA256"` and `"sha-256"` are rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(Pbkdf2Error::UnsupportedDigest(other.to_owned())),
        }
    }
}

/// Conversion into a validated [`Digest`]
pub trait IntoDigest {
    /// Resolve the digest
    ///
    /// # Errors
    ///
    /// Returns `Pbkdf2Error::UnsupportedDigest` for unknown names.
    fn into_digest(self) -> Result<Digest>;
}

impl IntoDigest for Digest {
    fn into_digest(self) -> Result<Digest> {
        Ok(self)
    }
}

impl IntoDigest for &str {
    fn into_digest(self) -> Result<Digest> {
        self.parse()
    }
}

impl IntoDigest for String {
    fn into_digest(self) -> Result<Digest> {
        self.parse()
    }
}

impl IntoDigest for &String {
    fn into_digest(self) -> Result<Digest> {
        self.parse()
    }
}
