//! Cross-check against the RustCrypto `pbkdf2` crate for arbitrary inputs

mod common;

use cryypt_pbkdf2::{pbkdf2_sync, Digest};
use proptest::prelude::*;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

fn reference(digest: Digest, password: &[u8], salt: &[u8], rounds: u32, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    match digest {
        Digest::Sha1 => pbkdf2::pbkdf2_hmac::<Sha1>(password, salt, rounds, &mut out),
        Digest::Sha256 => pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut out),
        Digest::Sha512 => pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, rounds, &mut out),
    }
    out
}

fn any_digest() -> impl Strategy<Value = Digest> {
    prop_oneof![Just(Digest::Sha1), Just(Digest::Sha256), Just(Digest::Sha512)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matches_reference_crate(
        digest in any_digest(),
        password in prop::collection::vec(any::<u8>(), 0..80),
        salt in prop::collection::vec(any::<u8>(), 0..40),
        iterations in 1u32..50,
        key_length in 0usize..200,
    ) {
        common::init_tracing();
        let key = pbkdf2_sync(password.as_slice(), salt.as_slice(), iterations, key_length, digest)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let expected = reference(digest, &password, &salt, iterations, key_length);
        prop_assert_eq!(key.len(), key_length);
        prop_assert_eq!(key.as_bytes(), expected.as_slice());
    }

    #[test]
    fn shorter_output_is_prefix(
        digest in any_digest(),
        short in 1usize..100,
        extra in 1usize..100,
    ) {
        let long = pbkdf2_sync("password", "salt", 3, short + extra, digest)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let prefix = pbkdf2_sync("password", "salt", 3, short, digest)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(&long.as_bytes()[..short], prefix.as_bytes());
    }
}
