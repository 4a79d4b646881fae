//! Error types for the Remold core library
//!
//! This module defines the error handling system for Remold, using thiserror
//! for ergonomic error definitions and anyhow as the flexible source type for
//! adapter-supplied failures.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

use crate::value::Kind;

/// Main error type for reshape operations
#[derive(Error, Debug)]
pub enum Error {
    /// The top-level source value has no shape a schema can project onto
    #[error("unsupported source: cannot reshape a top-level {kind} value")]
    UnsupportedSource { kind: Kind },

    /// A record carries a field its tag table does not declare
    #[error("field not found: record '{record}' does not declare field '{field}'")]
    FieldNotFound { record: String, field: String },

    /// A record field has no externally-visible name under the active tag
    #[error("missing tag: field '{field}' of record '{record}' has no '{tag}' tag")]
    TagMissing {
        record: String,
        field: String,
        tag: String,
    },

    /// Source nesting passed the configured recursion bound
    #[error("depth exceeded: source nesting is deeper than the configured limit of {limit}")]
    DepthExceeded { limit: usize },

    /// JSON conversion errors at the source boundary
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failures raised by user-supplied source adapters
    #[error("adapter error: {message}")]
    Adapter {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a failure raised inside a [`ToSource`](crate::value::ToSource) implementation
    pub fn adapter(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Error::Adapter {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Policy for record fields with no externally-visible name under the active tag
///
/// Two historical variants of the engine disagreed here: one skipped untagged
/// fields, the other failed the whole transform. Both are available; the
/// default is [`TagPolicy::Lenient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagPolicy {
    /// Untagged fields are skipped silently
    Lenient,
    /// Untagged fields abort the transform with [`Error::TagMissing`]
    Strict,
}

impl Default for TagPolicy {
    fn default() -> Self {
        TagPolicy::Lenient
    }
}

impl fmt::Display for TagPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagPolicy::Lenient => write!(f, "lenient"),
            TagPolicy::Strict => write!(f, "strict"),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FieldNotFound {
            record: "User".to_string(),
            field: "Name".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "field not found: record 'User' does not declare field 'Name'"
        );
    }

    #[test]
    fn test_unsupported_source_display() {
        let err = Error::UnsupportedSource { kind: Kind::Scalar };
        assert_eq!(
            err.to_string(),
            "unsupported source: cannot reshape a top-level scalar value"
        );
    }

    #[test]
    fn test_adapter_error_chains_source() {
        let err = Error::adapter("user adapter failed", anyhow::anyhow!("boom"));
        assert!(err.to_string().contains("user adapter failed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_tag_policy_display() {
        assert_eq!(TagPolicy::Lenient.to_string(), "lenient");
        assert_eq!(TagPolicy::Strict.to_string(), "strict");
    }

    #[test]
    fn test_tag_policy_default() {
        assert_eq!(TagPolicy::default(), TagPolicy::Lenient);
    }
}
