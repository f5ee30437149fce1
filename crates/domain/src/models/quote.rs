//! Quote submission models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_non_blank;
use validator::Validate;

use super::id::GeneratedId;

/// A stored quote-request submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    #[serde(rename = "_id")]
    pub id: GeneratedId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub product_interest: String,
    pub requirements: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a quote request from the public form.
///
/// Name, email, phone, company, product interest and requirements are all
/// required; budget and timeline are free-text optionals.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    #[validate(custom(function = "validate_non_blank"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub phone: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub company: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub product_interest: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub requirements: String,

    pub budget: Option<String>,
    pub timeline: Option<String>,
}

/// Partial update for a quote submission. Same merge semantics as
/// [`super::contact::ContactPatch`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub product_interest: Option<String>,
    pub requirements: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
}

impl QuotePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.product_interest.is_none()
            && self.requirements.is_none()
            && self.budget.is_none()
            && self.timeline.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> NewQuote {
        NewQuote {
            name: "B. Buyer".to_string(),
            email: "b@corp.example".to_string(),
            phone: "+421 900 000 000".to_string(),
            company: "Example s.r.o.".to_string(),
            product_interest: "Solar inverters".to_string(),
            requirements: "30kW rooftop installation".to_string(),
            budget: Some("20-30k EUR".to_string()),
            timeline: None,
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn test_all_six_required_fields_enforced() {
        for field in [
            "name",
            "email",
            "phone",
            "company",
            "product_interest",
            "requirements",
        ] {
            let mut payload = valid_payload();
            match field {
                "name" => payload.name = String::new(),
                "email" => payload.email = String::new(),
                "phone" => payload.phone = String::new(),
                "company" => payload.company = String::new(),
                "product_interest" => payload.product_interest = String::new(),
                "requirements" => payload.requirements = String::new(),
                _ => unreachable!(),
            }
            assert!(payload.validate().is_err(), "{} should be required", field);
        }
    }

    #[test]
    fn test_budget_and_timeline_optional() {
        let mut payload = valid_payload();
        payload.budget = None;
        payload.timeline = None;
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_wire_key_is_camel_case() {
        let submission = QuoteSubmission {
            id: GeneratedId::new(),
            name: "B".to_string(),
            email: "b@x.com".to_string(),
            phone: "123".to_string(),
            company: "Acme".to_string(),
            product_interest: "Generators".to_string(),
            requirements: "Backup power".to_string(),
            budget: None,
            timeline: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert!(json.get("productInterest").is_some());
        assert!(json.get("product_interest").is_none());
    }

    #[test]
    fn test_patch_deserializes_partial_body() {
        let patch: QuotePatch =
            serde_json::from_str(r#"{"budget":"50k EUR","timeline":"Q3"}"#).unwrap();
        assert_eq!(patch.budget.as_deref(), Some("50k EUR"));
        assert_eq!(patch.timeline.as_deref(), Some("Q3"));
        assert!(patch.name.is_none());
    }
}
