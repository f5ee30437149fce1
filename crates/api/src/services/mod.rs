//! Business services layered over the persistence repositories.

pub mod admin_auth;
pub mod directory;

pub use admin_auth::{AdminAuthService, AuthError};
pub use directory::BackendDirectory;
