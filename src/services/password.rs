//! Password key derivation.
//!
//! Credentials are a single admin hash fixed at deploy time, so this module
//! only derives and compares digests; nothing here touches storage.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Iteration count and derived-key length are fixed at deploy time; changing
/// either invalidates every stored hash.
const ITERATIONS: u32 = 10_000;
const KEY_LEN: usize = 64;

/// Derives the hex digest for a password + salt pair.
///
/// Deterministic: the result is compared with plain string equality against
/// the configured hash. The KDF cost dominates any timing signal from the
/// comparison.
#[must_use]
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut derived = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), ITERATIONS, &mut derived);
    to_hex(&derived)
}

/// Generate a random salt (32 character hex string)
#[must_use]
pub fn generate_salt() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    to_hex(&bytes)
}

/// Generate a random signing secret (64 character hex string)
#[must_use]
pub fn generate_secret() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    to_hex(&bytes)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let a = hash_password("correct horse", "abcd1234");
        let b = hash_password("correct horse", "abcd1234");
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_is_hex_of_expected_length() {
        let digest = hash_password("secret", "salt");
        assert_eq!(digest.len(), KEY_LEN * 2);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
    }

    #[test]
    fn test_different_passwords_hash_differently() {
        let a = hash_password("password-one", "samesalt");
        let b = hash_password("password-two", "samesalt");
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_salts_hash_differently() {
        let a = hash_password("same-password", "salt-a");
        let b = hash_password("same-password", "salt-b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_salt_shape() {
        let salt = generate_salt();
        assert_eq!(salt.len(), 32);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));

        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_generate_secret_shape() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 64);
    }
}
