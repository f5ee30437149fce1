//! Admin credential entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the admin_settings table.
///
/// The table holds exactly one row, keyed by the fixed credential id.
#[derive(Debug, Clone, FromRow)]
pub struct AdminCredentialEntity {
    pub password_hash: String,
    pub last_updated: DateTime<Utc>,
}

impl From<AdminCredentialEntity> for domain::models::AdminCredential {
    fn from(entity: AdminCredentialEntity) -> Self {
        Self {
            password_hash: entity.password_hash,
            last_updated: entity.last_updated,
        }
    }
}
