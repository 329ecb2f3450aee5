//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Hold all caller-side input validation: trimming, empty rejection,
//!   URL/amount/email parsing.
//!
//! # Invariants
//! - Services never swallow persistence failures; every repository error
//!   reaches the caller.
//! - Domain records stay passive; nothing below this layer validates.

pub mod finance_service;
pub mod job_service;
pub mod user_service;

/// Trims `value` and returns it only when something is left.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
