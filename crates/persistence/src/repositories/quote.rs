//! Quote submission repository for database operations.

use sqlx::PgPool;

use domain::models::{GeneratedId, NewQuote, QuotePatch, QuoteSubmission};
use shared::pagination::PageWindow;

use super::substring_pattern;
use crate::entities::QuoteEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, name, email, phone, company, product_interest, requirements, \
                       budget, timeline, created_at, updated_at";

/// Repository for quote-submission database operations.
///
/// Structurally the contact repository with the quote field set; the two
/// differ only in columns and search fields.
#[derive(Clone)]
pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    /// Creates a new QuoteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new quote request and returns the stored row.
    pub async fn create(&self, data: &NewQuote) -> Result<QuoteSubmission, sqlx::Error> {
        let timer = QueryTimer::new("create_quote");
        let result = sqlx::query_as::<_, QuoteEntity>(&format!(
            r#"
            INSERT INTO quotes (name, email, phone, company, product_interest, requirements,
                                budget, timeline)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.company)
        .bind(&data.product_interest)
        .bind(&data.requirements)
        .bind(&data.budget)
        .bind(&data.timeline)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(Into::into)
    }

    /// Lists one page of quote requests, newest first.
    pub async fn list(&self, window: PageWindow) -> Result<Vec<QuoteSubmission>, sqlx::Error> {
        let timer = QueryTimer::new("list_quotes");
        let result = sqlx::query_as::<_, QuoteEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM quotes
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

    /// Counts all quote requests.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_quotes");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Case-insensitive substring search over name, email, company, product
    /// interest and requirements, newest first.
    pub async fn search(
        &self,
        query: &str,
        window: PageWindow,
    ) -> Result<Vec<QuoteSubmission>, sqlx::Error> {
        let timer = QueryTimer::new("search_quotes");
        let result = sqlx::query_as::<_, QuoteEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM quotes
            WHERE name ILIKE $1 OR email ILIKE $1 OR company ILIKE $1
               OR product_interest ILIKE $1 OR requirements ILIKE $1
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

    /// Counts quote requests matching a search query.
    pub async fn count_search(&self, query: &str) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_search_quotes");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM quotes
            WHERE name ILIKE $1 OR email ILIKE $1 OR company ILIKE $1
               OR product_interest ILIKE $1 OR requirements ILIKE $1
            "#,
        )
        .bind(substring_pattern(query))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds a quote request by id; `Ok(None)` when absent.
    pub async fn find_by_id(
        &self,
        id: GeneratedId,
    ) -> Result<Option<QuoteSubmission>, sqlx::Error> {
        let timer = QueryTimer::new("find_quote_by_id");
        let result = sqlx::query_as::<_, QuoteEntity>(&format!(
            "SELECT {COLUMNS} FROM quotes WHERE id = $1",
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map(|row| row.map(Into::into))
    }

    /// Merges a partial update and stamps `updated_at`; `None` when the id
    /// does not exist.
    pub async fn update(
        &self,
        id: GeneratedId,
        patch: &QuotePatch,
    ) -> Result<Option<QuoteSubmission>, sqlx::Error> {
        let timer = QueryTimer::new("update_quote");
        let result = sqlx::query_as::<_, QuoteEntity>(&format!(
            r#"
            UPDATE quotes
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                company = COALESCE($5, company),
                product_interest = COALESCE($6, product_interest),
                requirements = COALESCE($7, requirements),
                budget = COALESCE($8, budget),
                timeline = COALESCE($9, timeline),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(id.as_uuid())
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.phone)
        .bind(&patch.company)
        .bind(&patch.product_interest)
        .bind(&patch.requirements)
        .bind(&patch.budget)
        .bind(&patch.timeline)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map(|row| row.map(Into::into))
    }

    /// Hard delete; true when exactly one row was removed.
    pub async fn delete(&self, id: GeneratedId) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_quote");
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await;
        timer.record();
        result.map(|done| done.rows_affected() == 1)
    }
}
