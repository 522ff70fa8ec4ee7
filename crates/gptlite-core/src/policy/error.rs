//! Errors raised while building the trusted origin set.

use thiserror::Error;

/// A configured trusted origin failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The origin is not a fully-qualified `scheme://host[:port]` string.
    #[error("invalid trusted origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

impl PolicyError {
    pub(super) fn invalid(origin: &str, reason: impl Into<String>) -> Self {
        PolicyError::InvalidOrigin {
            origin: origin.to_string(),
            reason: reason.into(),
        }
    }
}

/// A navigation destination could not be turned into an absolute address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("empty destination")]
    Empty,
    /// Relative reference with no usable base page.
    #[error("relative destination {0:?} has no base to resolve against")]
    NoBase(String),
    #[error("malformed destination {destination:?}: {reason}")]
    Malformed { destination: String, reason: String },
}
