//! Input normalization
//!
//! Turns loosely typed caller input into a [`DerivationRequest`] whose fields
//! already satisfy every engine invariant. All checks here are pure and run
//! before any HMAC work is scheduled.

use crate::digest::{Digest, IntoDigest};
use crate::error::{InputParam, Pbkdf2Error, Result};
use serde_json::Value;
use std::fmt;
use zeroize::Zeroizing;

/// Largest accepted key length in bytes (2^30 - 1)
pub const MAX_ALLOC: usize = (1 << 30) - 1;

/// Password or salt material: UTF-8 text or raw bytes
pub trait BinaryLike {
    /// Canonical byte form of the input
    ///
    /// # Errors
    ///
    /// Returns `Pbkdf2Error::InvalidInputType` naming `param` when the value
    /// has no text or binary interpretation.
    fn into_binary(self, param: InputParam) -> Result<Zeroizing<Vec<u8>>>;
}

impl BinaryLike for &str {
    fn into_binary(self, _param: InputParam) -> Result<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(self.as_bytes().to_vec()))
    }
}

impl BinaryLike for String {
    fn into_binary(self, _param: InputParam) -> Result<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(self.into_bytes()))
    }
}

impl BinaryLike for &String {
    fn into_binary(self, param: InputParam) -> Result<Zeroizing<Vec<u8>>> {
        self.as_str().into_binary(param)
    }
}

impl BinaryLike for &[u8] {
    fn into_binary(self, _param: InputParam) -> Result<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(self.to_vec()))
    }
}

impl BinaryLike for Vec<u8> {
    fn into_binary(self, _param: InputParam) -> Result<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(self))
    }
}

impl BinaryLike for &Vec<u8> {
    fn into_binary(self, param: InputParam) -> Result<Zeroizing<Vec<u8>>> {
        self.as_slice().into_binary(param)
    }
}

impl<const N: usize> BinaryLike for [u8; N] {
    fn into_binary(self, param: InputParam) -> Result<Zeroizing<Vec<u8>>> {
        self.as_slice().into_binary(param)
    }
}

impl<const N: usize> BinaryLike for &[u8; N] {
    fn into_binary(self, param: InputParam) -> Result<Zeroizing<Vec<u8>>> {
        self.as_slice().into_binary(param)
    }
}

/// Dynamically typed input, e.g. decoded from a JSON request.
///
/// Strings are taken as UTF-8 text and arrays of integers in `0..=255` as raw
/// bytes. Numbers, booleans, null, objects and arrays holding anything else
/// are rejected.
impl BinaryLike for &Value {
    fn into_binary(self, param: InputParam) -> Result<Zeroizing<Vec<u8>>> {
        match self {
            Value::String(text) => text.as_str().into_binary(param),
            Value::Array(items) => {
                let mut bytes = Zeroizing::new(Vec::with_capacity(items.len()));
                for item in items {
                    let byte = item
                        .as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(|| Pbkdf2Error::invalid_input(param))?;
                    bytes.push(byte);
                }
                Ok(bytes)
            }
            _ => Err(Pbkdf2Error::invalid_input(param)),
        }
    }
}

impl BinaryLike for Value {
    fn into_binary(self, param: InputParam) -> Result<Zeroizing<Vec<u8>>> {
        match self {
            Value::String(text) => text.into_binary(param),
            other => (&other).into_binary(param),
        }
    }
}

/// Conversion into a validated iteration count (at least one)
pub trait IntoIterations {
    /// Resolve the iteration count
    ///
    /// # Errors
    ///
    /// Returns `Pbkdf2Error::InvalidIterations` for zero, negative,
    /// fractional, non-finite or out-of-range values.
    fn into_iterations(self) -> Result<u32>;
}

/// Conversion into a validated key length in `0..=MAX_ALLOC`
pub trait IntoKeyLength {
    /// Resolve the key length
    ///
    /// # Errors
    ///
    /// Returns `Pbkdf2Error::InvalidKeyLength` for negative, NaN, fractional
    /// or oversized values.
    fn into_key_length(self) -> Result<usize>;
}

fn bad_iterations(value: impl fmt::Display) -> Pbkdf2Error {
    Pbkdf2Error::InvalidIterations(format!("{value} is not a positive 32-bit integer"))
}

fn bad_key_length(value: impl fmt::Display) -> Pbkdf2Error {
    Pbkdf2Error::InvalidKeyLength(format!("{value} is outside 0..={MAX_ALLOC}"))
}

macro_rules! impl_integer_params {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoIterations for $ty {
                #[allow(unused_comparisons)]
                fn into_iterations(self) -> Result<u32> {
                    if self < 1 {
                        return Err(bad_iterations(self));
                    }
                    u32::try_from(self).map_err(|_| bad_iterations(self))
                }
            }

            impl IntoKeyLength for $ty {
                #[allow(unused_comparisons)]
                fn into_key_length(self) -> Result<usize> {
                    if self < 0 {
                        return Err(bad_key_length(self));
                    }
                    match usize::try_from(self) {
                        Ok(len) if len <= MAX_ALLOC => Ok(len),
                        _ => Err(bad_key_length(self)),
                    }
                }
            }
        )*
    };
}

impl_integer_params!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl IntoIterations for f64 {
    fn into_iterations(self) -> Result<u32> {
        if !self.is_finite() || self.fract() != 0.0 || self < 1.0 || self > f64::from(u32::MAX) {
            return Err(bad_iterations(self));
        }
        Ok(self as u32)
    }
}

impl IntoKeyLength for f64 {
    fn into_key_length(self) -> Result<usize> {
        if self.is_nan() {
            return Err(Pbkdf2Error::InvalidKeyLength("NaN".into()));
        }
        if !self.is_finite() || self.fract() != 0.0 || self < 0.0 || self > MAX_ALLOC as f64 {
            return Err(bad_key_length(self));
        }
        Ok(self as usize)
    }
}

/// A validated derivation request
///
/// Built fresh per call by [`normalize`]; password and salt are wiped when the
/// request is dropped.
#[derive(Clone)]
pub struct DerivationRequest {
    pub(crate) password: Zeroizing<Vec<u8>>,
    pub(crate) salt: Zeroizing<Vec<u8>>,
    pub(crate) iterations: u32,
    pub(crate) key_length: usize,
    pub(crate) digest: Digest,
}

impl DerivationRequest {
    /// Same as [`normalize`]
    ///
    /// # Errors
    ///
    /// See [`normalize`].
    pub fn new(
        password: impl BinaryLike,
        salt: impl BinaryLike,
        iterations: impl IntoIterations,
        key_length: impl IntoKeyLength,
        digest: impl IntoDigest,
    ) -> Result<Self> {
        normalize(password, salt, iterations, key_length, digest)
    }

    /// Password bytes
    #[must_use]
    pub fn password(&self) -> &[u8] {
        &self.password
    }

    /// Salt bytes
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Iteration count
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Requested key length in bytes
    #[must_use]
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// PRF digest
    #[must_use]
    pub fn digest(&self) -> Digest {
        self.digest
    }

    /// Re-check the numeric invariants
    ///
    /// # Errors
    ///
    /// Returns `InvalidIterations` or `InvalidKeyLength` if the request was
    /// built around [`normalize`] with out-of-range values.
    pub fn validate(&self) -> Result<()> {
        self.iterations.into_iterations()?;
        self.key_length.into_key_length()?;
        Ok(())
    }
}

impl fmt::Debug for DerivationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationRequest")
            .field("password", &"<redacted>")
            .field("salt_len", &self.salt.len())
            .field("iterations", &self.iterations)
            .field("key_length", &self.key_length)
            .field("digest", &self.digest)
            .finish()
    }
}

/// Validate and canonicalize caller input into a [`DerivationRequest`]
///
/// Checks run in the order iterations, key length, password, salt, digest; the
/// first failure is returned.
///
/// # Errors
///
/// - `InvalidIterations` if `iterations` is not a positive 32-bit integer
/// - `InvalidKeyLength` if `key_length` is not an integer in `0..=MAX_ALLOC`
/// - `InvalidInputType` if password or salt is neither text nor bytes
/// - `UnsupportedDigest` if `digest` is not `sha1`, `sha256` or `sha512`
pub fn normalize(
    password: impl BinaryLike,
    salt: impl BinaryLike,
    iterations: impl IntoIterations,
    key_length: impl IntoKeyLength,
    digest: impl IntoDigest,
) -> Result<DerivationRequest> {
    let iterations = iterations.into_iterations()?;
    let key_length = key_length.into_key_length()?;
    let password = password.into_binary(InputParam::Password)?;
    let salt = salt.into_binary(InputParam::Salt)?;
    let digest = digest.into_digest()?;

    Ok(DerivationRequest {
        password,
        salt,
        iterations,
        key_length,
        digest,
    })
}
