//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: model-output normalization and string helpers

pub mod error;
pub mod string;
