//! Use cases (application services)

pub mod analyze_style;
pub mod songwriting_session;
