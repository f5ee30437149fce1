//! Quote submission entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the quotes table.
#[derive(Debug, Clone, FromRow)]
pub struct QuoteEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub product_interest: String,
    pub requirements: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<QuoteEntity> for domain::models::QuoteSubmission {
    fn from(entity: QuoteEntity) -> Self {
        Self {
            id: entity.id.into(),
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            company: entity.company,
            product_interest: entity.product_interest,
            requirements: entity.requirements,
            budget: entity.budget,
            timeline: entity.timeline,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
