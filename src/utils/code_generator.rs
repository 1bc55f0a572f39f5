//! Short code generation.
//!
//! Codes are drawn from a general-purpose random source. They only need to be
//! hard to collide, not hard to guess.

use rand::Rng;

/// Length of generated short codes.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Alphabet for generated codes: `A-Z`, `a-z`, `0-9`.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random code of `length` characters.
///
/// Each character is picked independently and uniformly from [`CODE_ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(SHORT_CODE_LENGTH);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
