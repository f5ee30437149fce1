//! Entity definitions (database row mappings).

pub mod admin_credential;
pub mod contact;
pub mod quote;

pub use admin_credential::AdminCredentialEntity;
pub use contact::ContactEntity;
pub use quote::QuoteEntity;
