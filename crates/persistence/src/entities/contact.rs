//! Contact submission entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the contacts table.
#[derive(Debug, Clone, FromRow)]
pub struct ContactEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ContactEntity> for domain::models::ContactSubmission {
    fn from(entity: ContactEntity) -> Self {
        Self {
            id: entity.id.into(),
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            subject: entity.subject,
            message: entity.message,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_maps_to_domain_model() {
        let now = Utc::now();
        let entity = ContactEntity {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone: None,
            subject: "S".to_string(),
            message: "M".to_string(),
            created_at: now,
            updated_at: None,
        };
        let id = entity.id;
        let model: domain::models::ContactSubmission = entity.into();
        assert_eq!(model.id.as_uuid(), id);
        assert_eq!(model.created_at, now);
        assert!(model.updated_at.is_none());
    }
}
