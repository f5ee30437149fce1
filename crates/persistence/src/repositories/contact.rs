//! Contact submission repository for database operations.

use sqlx::PgPool;

use domain::models::{ContactPatch, ContactSubmission, GeneratedId, NewContact};
use shared::pagination::PageWindow;

use super::substring_pattern;
use crate::entities::ContactEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, email, phone, subject, message, created_at, updated_at";

/// Repository for contact-submission database operations.
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Creates a new ContactRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new submission. The identifier and creation timestamp are
    /// assigned by the database; the stored row is returned.
    pub async fn create(&self, data: &NewContact) -> Result<ContactSubmission, sqlx::Error> {
        let timer = QueryTimer::new("create_contact");
        let result = sqlx::query_as::<_, ContactEntity>(&format!(
            r#"
            INSERT INTO contacts (name, email, phone, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.subject)
        .bind(&data.message)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(Into::into)
    }

    /// Lists one page of submissions, newest first.
    pub async fn list(&self, window: PageWindow) -> Result<Vec<ContactSubmission>, sqlx::Error> {
        let timer = QueryTimer::new("list_contacts");
        let result = sqlx::query_as::<_, ContactEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM contacts
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        ))
        .bind(window.take())
        .bind(window.skip())
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result.map(|rows| rows.into_iter().map(Into::into).collect())
    }

    /// Counts all submissions.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_contacts");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Case-insensitive substring search over name, email, subject and
    /// message, newest first.
    pub async fn search(
        &self,
        query: &str,
        window: PageWindow,
    ) -> Result<Vec<ContactSubmission>, sqlx::Error> {
        let timer = QueryTimer::new("search_contacts");
        let result = sqlx::query_as::<_, ContactEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM contacts
            WHERE name ILIKE $1 OR email ILIKE $1 OR subject ILIKE $1 OR message ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        ))
        .bind(substring_pattern(query))
        .bind(window.take())
        .bind(window.skip())
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result.map(|rows| rows.into_iter().map(Into::into).collect())
    }

    /// Counts submissions matching a search query.
    pub async fn count_search(&self, query: &str) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_search_contacts");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM contacts
            WHERE name ILIKE $1 OR email ILIKE $1 OR subject ILIKE $1 OR message ILIKE $1
            "#,
        )
        .bind(substring_pattern(query))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds a submission by id. A well-formed id with no matching row is
    /// `Ok(None)`, not an error.
    pub async fn find_by_id(
        &self,
        id: GeneratedId,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        let timer = QueryTimer::new("find_contact_by_id");
        let result = sqlx::query_as::<_, ContactEntity>(&format!(
            "SELECT {COLUMNS} FROM contacts WHERE id = $1",
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map(|row| row.map(Into::into))
    }

    /// Merges a partial update into the stored row and stamps `updated_at`.
    /// Omitted fields keep their stored value; the identifier and creation
    /// timestamp are never touched. Returns the new state, or `None` when
    /// the id does not exist.
    pub async fn update(
        &self,
        id: GeneratedId,
        patch: &ContactPatch,
    ) -> Result<Option<ContactSubmission>, sqlx::Error> {
        let timer = QueryTimer::new("update_contact");
        let result = sqlx::query_as::<_, ContactEntity>(&format!(
            r#"
            UPDATE contacts
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                subject = COALESCE($5, subject),
                message = COALESCE($6, message),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(id.as_uuid())
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.phone)
        .bind(&patch.subject)
        .bind(&patch.message)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map(|row| row.map(Into::into))
    }

    /// Hard delete. Returns true when exactly one row was removed; deleting
    /// a nonexistent id is not an error.
    pub async fn delete(&self, id: GeneratedId) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_contact");
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await;
        timer.record();
        result.map(|done| done.rows_affected() == 1)
    }
}
