//! Credential hashing
//!
//! Argon2id with a per-call random salt. Verification runs in constant time
//! with respect to the password bytes; a mismatch is reported as
//! `InvalidCredentials`, distinct from an unparseable stored hash, which is
//! a storage fault.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::AuthError;

/// Hash a password for storage
///
/// Output is a PHC-format string embedding the algorithm parameters and the
/// random salt; identical passwords hash to different strings.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash
///
/// # Errors
/// - `InvalidCredentials` when the password does not match
/// - `Hashing` when the stored hash cannot be parsed
pub fn verify_password(hash: &str, password: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|e| match e {
            argon2::password_hash::Error::Password => AuthError::InvalidCredentials,
            other => AuthError::Hashing(other.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password(&hash, "secret1").is_ok());
    }

    #[test]
    fn test_wrong_password_is_mismatch() {
        let hash = hash_password("secret1").unwrap();
        let result = verify_password(&hash, "secret2");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_salted_hashes_differ() {
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
        assert!(verify_password(&a, "secret1").is_ok());
        assert!(verify_password(&b, "secret1").is_ok());
    }

    #[test]
    fn test_garbage_stored_hash_is_not_a_mismatch() {
        let result = verify_password("not-a-phc-string", "secret1");
        assert!(matches!(result, Err(AuthError::Hashing(_))));
    }
}
