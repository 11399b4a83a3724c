//! Salted password hashing.
//!
//! Hashes are Argon2id PHC strings (`$argon2id$v=19$...`), so the salt and
//! parameters travel with the digest.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Hash `password` with a fresh random salt.
pub(crate) fn hash_password(password: &str) -> ResultEngine<String> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| EngineError::Password(format!("failed to encode salt: {e}")))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| EngineError::Password(format!("hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Check `password` against a stored hash. Malformed hashes never verify.
pub(crate) fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
