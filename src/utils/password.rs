use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::Rng;

use crate::error::AppResult;

const SALT_LEN: usize = 16;

/// Hash a password using Argon2id with a random salt.
///
/// The result is a PHC string (`$argon2id$v=19$...`) embedding the salt and
/// parameters, so verification needs nothing but the stored string.
pub fn hash_password(password: &str) -> AppResult<String> {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::rng().fill(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow!("salt encoding: {e}"))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(error = %e, "argon2 hash_password error");
            anyhow!("password hashing failed: {e}")
        })?
        .to_string();

    Ok(hash)
}

/// Verify a password against a stored PHC hash.
///
/// A malformed hash is an error; a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| anyhow!("invalid password hash: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
