//! Admin passcode service.
//!
//! Wraps the stored credential row: startup provisioning, passcode
//! verification for login, and the change-password rotation. Wrong
//! passcodes are boolean outcomes, not errors; Err is reserved for
//! storage and hashing failures.

use tracing::{info, warn};

use persistence::repositories::AdminSettingsRepository;
use shared::password::{hash_passcode, verify_passcode, PasscodeError};

/// Error types for admin credential operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasscodeHash(#[from] PasscodeError),

    #[error("Admin credential has not been provisioned")]
    NotProvisioned,
}

/// Service for verifying and rotating the admin passcode.
#[derive(Clone)]
pub struct AdminAuthService {
    repository: AdminSettingsRepository,
}

impl AdminAuthService {
    pub fn new(repository: AdminSettingsRepository) -> Self {
        Self { repository }
    }

    /// Creates the credential row at startup when it does not exist yet.
    ///
    /// Idempotent: an existing hash is never overwritten, so a changed
    /// initial-passcode setting has no effect after first boot. With no
    /// row and an empty initial passcode, provisioning is skipped and
    /// every login will fail until one is configured.
    pub async fn provision(&self, initial_passcode: &str) -> Result<(), AuthError> {
        if self.repository.find().await?.is_some() {
            return Ok(());
        }

        if initial_passcode.is_empty() {
            warn!("No admin credential stored and no initial passcode configured - admin login will fail");
            return Ok(());
        }

        let hash = hash_passcode(initial_passcode)?;
        if self.repository.insert_if_absent(&hash).await? {
            info!("Provisioned admin credential");
        }
        Ok(())
    }

    /// Checks a candidate passcode against the stored hash.
    ///
    /// A missing credential row or a non-matching passcode both come back
    /// as `Ok(false)`.
    pub async fn verify(&self, candidate: &str) -> Result<bool, AuthError> {
        let Some(credential) = self.repository.find().await? else {
            return Ok(false);
        };
        Ok(verify_passcode(candidate, &credential.password_hash)?)
    }

    /// Rotates the passcode.
    ///
    /// Verifies the current passcode first; `Ok(false)` means it did not
    /// match and nothing was changed. On success the new passcode is
    /// hashed with a fresh salt and the stored hash replaced.
    pub async fn change_passcode(
        &self,
        current: &str,
        new_passcode: &str,
    ) -> Result<bool, AuthError> {
        let Some(credential) = self.repository.find().await? else {
            return Err(AuthError::NotProvisioned);
        };

        if !verify_passcode(current, &credential.password_hash)? {
            return Ok(false);
        }

        let hash = hash_passcode(new_passcode)?;
        self.repository.update_hash(&hash).await?;
        info!("Admin passcode updated");
        Ok(true)
    }
}
