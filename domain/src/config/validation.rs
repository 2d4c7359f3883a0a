//! Configuration validation issues.
//!
//! Raw configuration is checked as a whole and every problem is reported as a
//! structured [`ConfigIssue`] with a severity level, so the caller can decide
//! whether to warn or refuse to start.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A field that must be non-empty is empty.
    EmptyValue { field: String },
    /// A string field does not match any known variant.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A socket address or URL that cannot be parsed.
    InvalidAddress { field: String, value: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
