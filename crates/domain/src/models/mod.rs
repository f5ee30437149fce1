//! Domain models for the Powerline backend.

pub mod admin_credential;
pub mod contact;
pub mod id;
pub mod quote;

pub use admin_credential::AdminCredential;
pub use contact::{ContactPatch, ContactSubmission, NewContact};
pub use id::{GeneratedId, IdError, CREDENTIAL_ID};
pub use quote::{NewQuote, QuotePatch, QuoteSubmission};
