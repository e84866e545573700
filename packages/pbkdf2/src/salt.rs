//! Random salt generation

use rand::RngCore;

/// Salt length used when none is configured (128 bits)
pub const DEFAULT_SALT_SIZE: usize = 16;

/// Generate `len` bytes of salt from the thread-local CSPRNG
#[must_use]
pub fn generate_salt(len: usize) -> Vec<u8> {
    let mut salt = vec![0u8; len];
    rand::rng().fill_bytes(&mut salt);
    salt
}
