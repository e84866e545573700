//! Published PBKDF2 test vectors (RFC 6070 for SHA-1, RFC 7914 for SHA-256)

mod common;

use cryypt_pbkdf2::{pbkdf2_sync, Digest, Pbkdf2};
use hex_literal::hex;

struct Vector {
    password: &'static [u8],
    salt: &'static [u8],
    iterations: u32,
    expected: &'static [u8],
}

const RFC6070: &[Vector] = &[
    Vector {
        password: b"password",
        salt: b"salt",
        iterations: 1,
        expected: &hex!("0c60c80f961f0e71f3a9b524af6012062fe037a6"),
    },
    Vector {
        password: b"password",
        salt: b"salt",
        iterations: 2,
        expected: &hex!("ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957"),
    },
    Vector {
        password: b"password",
        salt: b"salt",
        iterations: 4096,
        expected: &hex!("4b007901b765489abead49d926f721d065a429c1"),
    },
    Vector {
        password: b"passwordPASSWORDpassword",
        salt: b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
        iterations: 4096,
        expected: &hex!("3d2eec4fe41c849b80c8d83662c0e44a8b291a964cf2f07038"),
    },
    Vector {
        password: b"pass\0word",
        salt: b"sa\0lt",
        iterations: 4096,
        expected: &hex!("56fa6aa75548099dcc37d7f03425e0c3"),
    },
];

#[test]
fn test_rfc6070_sha1() {
    common::init_tracing();
    for vector in RFC6070 {
        let key = pbkdf2_sync(
            vector.password,
            vector.salt,
            vector.iterations,
            vector.expected.len(),
            Digest::Sha1,
        )
        .expect("RFC 6070 derivation should succeed");
        assert_eq!(key.as_bytes(), vector.expected, "c = {}", vector.iterations);
    }
}

#[test]
fn test_rfc6070_first_vector_by_name() {
    let key = pbkdf2_sync("password", "salt", 1, 20, "sha1").expect("derivation succeeds");
    assert_eq!(key.to_hex(), "0c60c80f961f0e71f3a9b524af6012062fe037a6");
}

#[test]
fn test_rfc7914_sha256() {
    let key = pbkdf2_sync("passwd", "salt", 1, 64, "sha256").expect("derivation succeeds");
    assert_eq!(
        key.as_bytes(),
        hex!(
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
            "49ca9cccf179b645991664b39d77ef317c71b845b1e30bd509112041d3a19783"
        )
    );
}

#[test]
fn test_sha256_single_block() {
    let key = Pbkdf2::sha256()
        .iterations(1)
        .with_salt("salt")
        .derive_sync("password")
        .expect("derivation succeeds");
    assert_eq!(
        key.as_bytes(),
        hex!("120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b")
    );
}

#[test]
fn test_digest_changes_output() {
    let keys: Vec<_> = Digest::ALL
        .iter()
        .map(|&digest| {
            pbkdf2_sync("password", "salt", 10, 32, digest).expect("derivation succeeds")
        })
        .collect();

    for (i, a) in keys.iter().enumerate() {
        for b in &keys[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
