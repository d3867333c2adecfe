//! Argon2id password hashing and verification.
//!
//! Staff passwords are stored only as PHC-formatted Argon2id strings with
//! a random per-hash salt; the parameters and salt travel inside the hash
//! itself, so verification needs no side table.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password, returning the PHC string to persist.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string.
///
/// `Ok(false)` means the password simply did not match; other hash-parsing
/// failures surface as errors.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_password_verifies() {
        let hash = hash_password("pass1").unwrap();
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(verify_password("pass1", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_rejected_without_error() {
        let hash = hash_password("pass1").unwrap();
        assert!(!verify_password("pass2", &hash).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("pass1").unwrap();
        let b = hash_password("pass1").unwrap();
        assert_ne!(a, b);
    }
}
