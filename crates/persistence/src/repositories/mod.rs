//! Repository implementations for database operations.

pub mod admin_settings;
pub mod contact;
pub mod quote;

pub use admin_settings::AdminSettingsRepository;
pub use contact::ContactRepository;
pub use quote::QuoteRepository;

/// Builds an ILIKE pattern matching `query` as a literal substring.
///
/// `%`, `_` and `\` in the user's query are escaped so they match
/// themselves instead of acting as wildcards.
pub fn substring_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
