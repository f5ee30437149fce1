//! Domain layer for the Powerline backend.
//!
//! This crate contains:
//! - Domain models (submissions, admin credential, identifiers)
//! - Business logic services (the admin dashboard session controller)

pub mod models;
pub mod services;
