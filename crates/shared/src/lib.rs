//! Shared utilities and common types for the Powerline backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Passcode hashing with Argon2id
//! - Offset pagination windows
//! - Common validation logic

pub mod pagination;
pub mod password;
pub mod validation;
