//! Admin settings repository.
//!
//! The admin_settings table holds a single credential row keyed by the
//! fixed credential id. There is no list/delete surface; the row is created
//! once by provisioning and only its hash is ever rewritten.

use sqlx::PgPool;

use domain::models::{AdminCredential, CREDENTIAL_ID};

use crate::entities::AdminCredentialEntity;
use crate::metrics::QueryTimer;

/// Repository for the singleton admin credential row.
#[derive(Clone)]
pub struct AdminSettingsRepository {
    pool: PgPool,
}

impl AdminSettingsRepository {
    /// Creates a new AdminSettingsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the credential row, if provisioned.
    pub async fn find(&self) -> Result<Option<AdminCredential>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_credential");
        let result = sqlx::query_as::<_, AdminCredentialEntity>(
            "SELECT password_hash, last_updated FROM admin_settings WHERE id = $1",
        )
        .bind(CREDENTIAL_ID)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map(|row| row.map(Into::into))
    }

    /// Inserts the credential row if it does not exist yet. Returns true
    /// when this call created it; an existing hash is never overwritten.
    pub async fn insert_if_absent(&self, password_hash: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("provision_admin_credential");
        let result = sqlx::query(
            r#"
            INSERT INTO admin_settings (id, password_hash, last_updated)
            VALUES ($1, $2, now())
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(CREDENTIAL_ID)
        .bind(password_hash)
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|done| done.rows_affected() == 1)
    }

    /// Replaces the stored hash and stamps the rotation time.
    pub async fn update_hash(&self, password_hash: &str) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_admin_credential");
        let result = sqlx::query(
            "UPDATE admin_settings SET password_hash = $2, last_updated = now() WHERE id = $1",
        )
        .bind(CREDENTIAL_ID)
        .bind(password_hash)
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|_| ())
    }
}
