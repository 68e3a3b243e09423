//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — model identifiers (GPT, Gemini, custom)
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
pub mod string;
