//! Admin passcode hashing using Argon2id.
//!
//! The admin dashboard is gated by a single shared passcode. It is stored
//! only as a salted Argon2id hash (OWASP-recommended parameters), never in
//! plaintext.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Error type for passcode hashing operations.
#[derive(Debug, Error)]
pub enum PasscodeError {
    #[error("Failed to hash passcode: {0}")]
    HashError(String),

    #[error("Failed to verify passcode: {0}")]
    VerifyError(String),

    #[error("Invalid passcode hash format")]
    InvalidHashFormat,
}

/// Argon2id parameters following OWASP recommendations (2024).
/// - Memory: 19456 KiB (19 MiB)
/// - Iterations: 2
/// - Parallelism: 1
const MEMORY_COST: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

fn create_argon2() -> Result<Argon2<'static>, PasscodeError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasscodeError::HashError(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a passcode with a fresh random salt.
///
/// Returns a PHC-formatted string that includes the algorithm, parameters,
/// salt, and hash, so stored hashes stay verifiable across parameter
/// upgrades.
///
/// # Example
/// ```
/// use shared::password::hash_passcode;
///
/// let hash = hash_passcode("powerline2024").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_passcode(passcode: &str) -> Result<String, PasscodeError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = create_argon2()?;

    argon2
        .hash_password(passcode.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasscodeError::HashError(e.to_string()))
}

/// Verifies a candidate passcode against a stored PHC hash.
///
/// A wrong passcode is `Ok(false)`, not an error; only a malformed stored
/// hash or an internal verifier failure produces `Err`. Verification is
/// constant-time with respect to the candidate.
///
/// # Example
/// ```
/// use shared::password::{hash_passcode, verify_passcode};
///
/// let hash = hash_passcode("correct horse").unwrap();
/// assert!(verify_passcode("correct horse", &hash).unwrap());
/// assert!(!verify_passcode("wrong horse", &hash).unwrap());
/// ```
pub fn verify_passcode(candidate: &str, hash: &str) -> Result<bool, PasscodeError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasscodeError::InvalidHashFormat)?;

    // The stored hash carries its own parameters, so defaults suffice here.
    let argon2 = Argon2::default();

    match argon2.verify_password(candidate.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasscodeError::VerifyError(e.to_string())),
    }
}
