//! Enforces navigation decisions for a webview.

use std::sync::{Arc, Mutex};

use super::{decide, is_local_document, NavigationDecision, NavigationRequest, TrustedOriginSet};
use crate::opener::{handoff, ExternalOpener};

/// Pairs the startup-time trusted set with the external opener.
///
/// Cheap to clone; clones share both halves, so one gate can back the
/// navigation handler and the new-window handler of the same webview.
#[derive(Clone)]
pub struct NavigationGate {
    trusted: Arc<TrustedOriginSet>,
    opener: Arc<dyn ExternalOpener>,
}

impl NavigationGate {
    pub fn new(trusted: Arc<TrustedOriginSet>, opener: Arc<dyn ExternalOpener>) -> Self {
        Self { trusted, opener }
    }

    pub fn trusted(&self) -> &TrustedOriginSet {
        &self.trusted
    }

    /// Classifies `destination` and performs the handoff if needed.
    ///
    /// `base` is the address of the page that initiated the navigation, used
    /// for relative references. Only resolved, absolute destinations reach the
    /// opener; unresolvable ones are denied and dropped.
    pub fn route(&self, destination: &str, base: Option<&str>) -> NavigationDecision {
        let request = match NavigationRequest::resolve(destination, base) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("navigation denied, not opening: {e}");
                return NavigationDecision::Handoff;
            }
        };
        let decision = decide(&request, &self.trusted);
        tracing::debug!("navigation {:?} -> {decision:?}", request.destination());
        if decision == NavigationDecision::Handoff {
            handoff(self.opener.as_ref(), request.destination());
        }
        decision
    }

    /// Navigation-handler form: `true` lets the webview load in place.
    pub fn intercept(&self, destination: &str, base: Option<&str>) -> bool {
        self.route(destination, base).allows_in_place()
    }

    /// Like [`intercept`](Self::intercept), but lets webview-local documents
    /// (`about:`, `blob:`, `data:`) through untouched.
    ///
    /// The platform navigation callback also fires for subframes, which load
    /// these constantly; they are neither contained pages nor links to hand off.
    pub fn intercept_navigation(&self, destination: &str, base: Option<&str>) -> bool {
        if is_local_document(destination) {
            tracing::trace!("local document {destination:?}, not routed");
            return true;
        }
        self.intercept(destination, base)
    }
}

/// One destination already classified as contained, waiting for its load.
///
/// A contained popup is classified in the new-window callback and then loaded
/// in place, which fires the navigation callback again for the same address.
/// Granting it here lets that second callback allow the load without routing
/// it a second time.
#[derive(Debug, Clone, Default)]
pub struct PreApproved {
    pending: Arc<Mutex<Option<String>>>,
}

impl PreApproved {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `destination` as contained; replaces any earlier grant.
    pub fn grant(&self, destination: impl Into<String>) {
        let destination = destination.into();
        match self.pending.lock() {
            Ok(mut guard) => *guard = Some(destination),
            Err(poisoned) => *poisoned.into_inner() = Some(destination),
        }
    }

    /// True (once) if `destination` is the granted address.
    pub fn consume(&self, destination: &str) -> bool {
        let mut guard = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.as_deref() == Some(destination) {
            *guard = None;
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for NavigationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationGate")
            .field("trusted", &self.trusted)
            .finish_non_exhaustive()
    }
}
