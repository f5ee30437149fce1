//! Admin credential model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The singleton admin credential record.
///
/// Keyed by [`super::id::CREDENTIAL_ID`] in storage. Created once by the
/// startup provisioning step and mutated only by the change-password flow;
/// never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredential {
    pub password_hash: String,
    pub last_updated: DateTime<Utc>,
}
