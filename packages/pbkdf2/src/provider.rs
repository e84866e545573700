//! Pluggable HMAC capability
//!
//! The engine never touches a hash implementation directly. It asks an
//! [`HmacProvider`] for an HMAC instance keyed with the password once, then
//! reuses that instance for every PRF call of the derivation.

use crate::digest::Digest;
use crate::{Pbkdf2Error, Result};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// HMAC keyed with a fixed secret
pub trait KeyedHmac: Send {
    /// Compute `HMAC(key, parts[0] || parts[1] || ...)` into `out`
    ///
    /// Returns the number of bytes written. The engine treats any count other
    /// than the digest's output length as a provider failure.
    ///
    /// # Errors
    ///
    /// Returns `Pbkdf2Error::DerivationUnavailable` if the MAC cannot be produced.
    fn compute_into(&self, parts: &[&[u8]], out: &mut [u8]) -> Result<usize>;
}

/// Source of keyed HMAC instances for each supported digest
pub trait HmacProvider: Send + Sync {
    /// Key an HMAC instance for `digest` with `key`
    ///
    /// # Errors
    ///
    /// Returns `Pbkdf2Error::DerivationUnavailable` if the provider cannot
    /// serve the digest or rejects the key.
    fn keyed(&self, digest: Digest, key: &[u8]) -> Result<Box<dyn KeyedHmac>>;

    /// One-shot `HMAC(digest, key, message)`
    ///
    /// # Errors
    ///
    /// Propagates failures from [`HmacProvider::keyed`] and
    /// [`KeyedHmac::compute_into`].
    fn hmac(&self, digest: Digest, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        let mac = self.keyed(digest, key)?;
        let mut out = vec![0u8; digest.output_len()];
        let written = mac.compute_into(&[message], &mut out)?;
        if written > out.len() {
            return Err(Pbkdf2Error::unavailable(format!(
                "HMAC provider reported {written} bytes for a {}-byte buffer",
                out.len()
            )));
        }
        out.truncate(written);
        Ok(out)
    }
}

/// Default provider backed by the RustCrypto `hmac`, `sha1` and `sha2` crates
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoHmac;

impl HmacProvider for RustCryptoHmac {
    fn keyed(&self, digest: Digest, key: &[u8]) -> Result<Box<dyn KeyedHmac>> {
        match digest {
            Digest::Sha1 => keyed::<Hmac<Sha1>>(key),
            Digest::Sha256 => keyed::<Hmac<Sha256>>(key),
            Digest::Sha512 => keyed::<Hmac<Sha512>>(key),
        }
    }
}

fn keyed<M>(key: &[u8]) -> Result<Box<dyn KeyedHmac>>
where
    M: Mac + KeyInit + Clone + Send + 'static,
{
    let mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| Pbkdf2Error::unavailable(format!("HMAC key error: {e}")))?;
    Ok(Box::new(PrecomputedMac { mac }))
}

/// Keeps the state after absorbing the padded key; each call clones it
struct PrecomputedMac<M> {
    mac: M,
}

impl<M> KeyedHmac for PrecomputedMac<M>
where
    M: Mac + Clone + Send,
{
    fn compute_into(&self, parts: &[&[u8]], out: &mut [u8]) -> Result<usize> {
        let mut mac = self.mac.clone();
        for part in parts {
            mac.update(part);
        }
        let tag = mac.finalize().into_bytes();

        let available = out.len();
        let dest = out.get_mut(..tag.len()).ok_or_else(|| {
            Pbkdf2Error::unavailable(format!(
                "HMAC output buffer holds {available} bytes, need {}",
                tag.len()
            ))
        })?;
        dest.copy_from_slice(&tag);
        Ok(tag.len())
    }
}
