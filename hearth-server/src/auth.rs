//! Password hashing and session tokens.
//!
//! Salted SHA-256, not a full KDF; accounts are demo-grade and
//! payments are simulated.

use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Random 16-byte salt, hex encoded.
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a password with its salt.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt) == expected_hash
}

/// Opaque session token.
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_round_trips() {
        let salt = generate_salt();
        let hash = hash_password("hunter2", &salt);

        assert!(verify_password("hunter2", &salt, &hash));
        assert!(!verify_password("hunter3", &salt, &hash));
    }

    #[test]
    fn same_password_different_salt_differs() {
        let a = hash_password("hunter2", &generate_salt());
        let b = hash_password("hunter2", &generate_salt());
        assert_ne!(a, b);
    }

    #[test]
    fn salt_is_hex() {
        let salt = generate_salt();
        assert_eq!(salt.len(), 32);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
