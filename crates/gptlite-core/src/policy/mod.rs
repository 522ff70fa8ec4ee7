//! Link routing: which navigations stay inside the shell and which are handed
//! to the system browser.
//!
//! The decision itself is a pure function of the destination and the trusted
//! origin set, so it can be exercised without a window. Enforcing it (loading
//! in place, or calling the external opener) is the job of [`NavigationGate`].

mod error;
mod gate;
mod origins;
mod request;

pub use error::{PolicyError, ResolveError};
pub use gate::{NavigationGate, PreApproved};
pub use origins::TrustedOriginSet;
pub use request::NavigationRequest;

/// Outcome of classifying one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Load inside the shell.
    Contain,
    /// Pass the destination to the platform default handler.
    Handoff,
}

impl NavigationDecision {
    /// Whether the webview should proceed with the load in place.
    pub fn allows_in_place(self) -> bool {
        matches!(self, NavigationDecision::Contain)
    }
}

impl std::fmt::Display for NavigationDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavigationDecision::Contain => f.write_str("contain"),
            NavigationDecision::Handoff => f.write_str("handoff"),
        }
    }
}

/// Classifies an absolute destination.
///
/// Empty or unparseable destinations are never contained.
pub fn decide(request: &NavigationRequest, trusted: &TrustedOriginSet) -> NavigationDecision {
    let destination = request.destination();
    if destination.is_empty() || url::Url::parse(destination).is_err() {
        return NavigationDecision::Handoff;
    }
    if trusted.matches(destination) {
        NavigationDecision::Contain
    } else {
        NavigationDecision::Handoff
    }
}

/// Schemes of documents the webview creates for itself (blank and srcdoc
/// frames, object URLs, inline data) rather than addresses a user follows.
const LOCAL_DOCUMENT_SCHEMES: &[&str] = &["about", "blob", "data"];

/// True for destinations that never leave the webview, such as `about:blank`.
///
/// Such loads are subframe plumbing and bypass the policy entirely.
pub fn is_local_document(destination: &str) -> bool {
    url::Url::parse(destination)
        .map(|u| LOCAL_DOCUMENT_SCHEMES.contains(&u.scheme()))
        .unwrap_or(false)
}

/// Resolves `raw` against the current page (`base`) and classifies it.
///
/// Anything that cannot be resolved is handed off.
pub fn classify(raw: &str, base: Option<&str>, trusted: &TrustedOriginSet) -> NavigationDecision {
    match NavigationRequest::resolve(raw, base) {
        Ok(request) => decide(&request, trusted),
        Err(e) => {
            tracing::debug!("unresolvable destination, handing off: {e}");
            NavigationDecision::Handoff
        }
    }
}
