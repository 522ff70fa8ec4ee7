//! A single navigation attempt.

use url::{ParseError, Url};

use super::ResolveError;

/// The destination of one navigation attempt (link click, redirect, `window.open`).
///
/// Immutable once built; holds the absolute address exactly as the page gave it
/// so prefix matching sees the raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    destination: String,
}

impl NavigationRequest {
    /// Wraps a destination that is already absolute.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Builds a request from whatever the page handed us.
    ///
    /// Absolute addresses are kept verbatim. Relative references are joined
    /// onto `base` (the current page); without a parseable base they cannot be
    /// resolved.
    pub fn resolve(raw: &str, base: Option<&str>) -> Result<Self, ResolveError> {
        if raw.trim().is_empty() {
            return Err(ResolveError::Empty);
        }
        match Url::parse(raw) {
            Ok(_) => Ok(Self::new(raw)),
            Err(ParseError::RelativeUrlWithoutBase) => {
                let base = base
                    .and_then(|b| Url::parse(b).ok())
                    .filter(|b| !b.cannot_be_a_base())
                    .ok_or_else(|| ResolveError::NoBase(raw.to_string()))?;
                let joined = base.join(raw).map_err(|e| ResolveError::Malformed {
                    destination: raw.to_string(),
                    reason: e.to_string(),
                })?;
                Ok(Self::new(joined.as_str()))
            }
            Err(e) => Err(ResolveError::Malformed {
                destination: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn into_destination(self) -> String {
        self.destination
    }
}
