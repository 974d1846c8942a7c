//! Error types for the criteria crate.

use thiserror::Error;

/// Errors raised while constructing criteria values.
///
/// Every constructor validates its input eagerly, so an error always refers to
/// the value that was being built. No partially valid value is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    /// Text matched neither a canonical operator symbol nor a known alias.
    #[error("invalid operator '{0}'")]
    InvalidOperator(String),

    /// Text is not one of `asc`, `desc`, `none` or `random`.
    #[error("invalid order type '{0}', expected one of asc, desc, none or random")]
    InvalidOrderType(String),

    /// Order field contains characters other than letters, digits or underscore.
    #[error("invalid order field '{0}', only word characters are allowed")]
    InvalidOrder(String),

    /// Negative limit or offset, or a page number outside the 1-based range.
    #[error("invalid page {field}: {value}")]
    InvalidPage { field: &'static str, value: i64 },

    /// Raw filter input does not have the positional or keyed shape.
    #[error("malformed filter: {0}")]
    MalformedFilter(String),

    /// Aggregate-level invariant violation.
    #[error("unable to create criteria object, violated: {}", .violations.join(", "))]
    InvalidCriteria { violations: Vec<String> },

    /// Source document could not be decoded.
    #[cfg(feature = "json")]
    #[error("invalid criteria source document: {0}")]
    InvalidSource(String),
}

impl CriteriaError {
    /// Returns the names of the violated invariants.
    ///
    /// Empty for every error kind except [`CriteriaError::InvalidCriteria`].
    pub fn violations(&self) -> &[String] {
        match self {
            CriteriaError::InvalidCriteria { violations } => violations,
            _ => &[],
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for CriteriaError {
    fn from(err: serde_json::Error) -> Self {
        CriteriaError::InvalidSource(err.to_string())
    }
}

/// Result type for criteria operations.
pub type Result<T> = std::result::Result<T, CriteriaError>;
