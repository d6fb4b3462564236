//! Password hashing helpers.
//!
//! Hashes are argon2id PHC strings with a random per-password salt.
//! Verification never errors: a malformed stored hash counts as a
//! mismatch, so login failure paths stay uniform.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

/// Failure to produce a hash (salting or parameter issues).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Hash a plaintext password into a PHC string for storage.
pub fn hash_password(plain: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashError {
            message: err.to_string(),
        })
}

/// Compare a plaintext candidate against a stored hash.
///
/// Returns `false` for mismatches and for unparseable stored hashes.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips_and_never_stores_plaintext() {
        let hash = hash_password("hunter2").expect("hashing succeeds");
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn verify_is_false_for_garbage_hashes() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn equal_passwords_produce_distinct_hashes() {
        let first = hash_password("same").expect("hashing succeeds");
        let second = hash_password("same").expect("hashing succeeds");
        assert_ne!(first, second);
    }
}
