//! Random request tokens for the `nonce_str` field

use rand::Rng;

/// Alphabet the gateway accepts for `nonce_str`.
pub const NONCE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length used when the caller does not supply a nonce.
pub const DEFAULT_NONCE_LENGTH: usize = 32;

/// Generate `length` characters drawn uniformly from [`NONCE_ALPHABET`].
pub fn generate(length: usize) -> String {
    generate_with(&mut rand::rng(), length)
}

/// Same as [`generate`] with an explicit random source.
pub fn generate_with<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| NONCE_ALPHABET[rng.random_range(0..NONCE_ALPHABET.len())] as char)
        .collect()
}
