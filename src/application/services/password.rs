//! One-way password hashing.

use crate::error::AppError;

/// Hashes a password with bcrypt. The salt is embedded in the output.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Checks a password against a stored bcrypt hash.
///
/// A malformed stored hash is treated as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}
