//! PBKDF2 derivation loop (RFC 8018, section 5.2)

use crate::derived_key::DerivedKey;
use crate::input::DerivationRequest;
use crate::provider::{HmacProvider, KeyedHmac, RustCryptoHmac};
use crate::{Pbkdf2Error, Result};
use std::time::Instant;
use zeroize::Zeroizing;

/// Runs PBKDF2 over an [`HmacProvider`]
///
/// Holds no per-derivation state; one engine can serve any number of
/// concurrent derivations.
#[derive(Debug, Clone, Default)]
pub struct Pbkdf2Engine<P = RustCryptoHmac> {
    provider: P,
}

impl Pbkdf2Engine {
    /// Create an engine backed by the default RustCrypto provider
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: HmacProvider> Pbkdf2Engine<P> {
    /// Create an engine over a custom HMAC provider
    #[must_use]
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// The HMAC provider in use
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Derive `request.key_length()` bytes
    ///
    /// Runs to completion on the calling thread. A zero key length returns an
    /// empty key without consulting the provider.
    ///
    /// # Errors
    ///
    /// - `InvalidIterations` / `InvalidKeyLength` if the request violates its invariants
    /// - `DerivationUnavailable` if the provider fails or returns a block of
    ///   the wrong size (an empty block included)
    pub fn derive(&self, request: &DerivationRequest) -> Result<DerivedKey> {
        request.validate()?;

        let key_length = request.key_length();
        if key_length == 0 {
            return Ok(DerivedKey::empty());
        }

        let digest = request.digest();
        let h_len = digest.output_len();
        let block_count = key_length.div_ceil(h_len);
        let started = Instant::now();
        tracing::debug!(
            %digest,
            iterations = request.iterations(),
            key_length,
            block_count,
            "starting PBKDF2 derivation"
        );

        let result = self.derive_blocks(request, h_len);
        match &result {
            Ok(_) => tracing::debug!(
                %digest,
                elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
                "PBKDF2 derivation complete"
            ),
            Err(e) => tracing::warn!(%digest, "PBKDF2 derivation failed: {e}"),
        }
        result
    }

    fn derive_blocks(&self, request: &DerivationRequest, h_len: usize) -> Result<DerivedKey> {
        let prf = self.provider.keyed(request.digest(), request.password())?;
        let mut output = vec![0u8; request.key_length()];
        let mut block = Zeroizing::new(vec![0u8; h_len]);

        for (position, chunk) in output.chunks_mut(h_len).enumerate() {
            let index = u32::try_from(position + 1)
                .map_err(|_| Pbkdf2Error::unavailable("block index exceeds 2^32 - 1"))?;
            if let Err(e) = fill_block(&*prf, request, index, &mut block) {
                zeroize::Zeroize::zeroize(&mut output);
                return Err(e);
            }
            chunk.copy_from_slice(&block[..chunk.len()]);
        }

        Ok(DerivedKey::new(output))
    }
}

/// `T_i = U_1 ^ U_2 ^ ... ^ U_c` for block `index`, written into `block`
fn fill_block(
    prf: &dyn KeyedHmac,
    request: &DerivationRequest,
    index: u32,
    block: &mut [u8],
) -> Result<()> {
    let h_len = block.len();
    let mut current = Zeroizing::new(vec![0u8; h_len]);
    let mut next = Zeroizing::new(vec![0u8; h_len]);

    let written = prf.compute_into(&[request.salt(), &index.to_be_bytes()], &mut current)?;
    check_block_len(written, h_len)?;
    block.copy_from_slice(&current);

    for _ in 1..request.iterations() {
        let written = prf.compute_into(&[current.as_slice()], &mut next)?;
        check_block_len(written, h_len)?;
        for (acc, byte) in block.iter_mut().zip(next.iter()) {
            *acc ^= byte;
        }
        std::mem::swap(&mut current, &mut next);
    }

    Ok(())
}

fn check_block_len(written: usize, expected: usize) -> Result<()> {
    match written {
        n if n == expected => Ok(()),
        0 => Err(Pbkdf2Error::unavailable("HMAC provider returned an empty result")),
        n => Err(Pbkdf2Error::unavailable(format!(
            "HMAC provider returned {n} bytes, expected {expected}"
        ))),
    }
}
