//! Handing destinations to the platform's default handler.

use std::sync::Mutex;

use thiserror::Error;

/// Failure reported by an [`ExternalOpener`].
#[derive(Debug, Error)]
pub enum OpenError {
    /// The platform launcher could not be started or reported no handler.
    #[error("failed to open {destination:?} externally: {source}")]
    Launch {
        destination: String,
        #[source]
        source: std::io::Error,
    },
    /// The destination's scheme is not one the desktop should launch.
    #[error("refusing to open {destination:?} externally: scheme {scheme:?} is not allowed")]
    UnsupportedScheme { destination: String, scheme: String },
}

/// Schemes the system opener will pass to the desktop.
pub const EXTERNAL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Rejects destinations whose scheme is not in [`EXTERNAL_SCHEMES`].
///
/// Unparseable destinations report an empty scheme.
pub fn check_external_scheme(destination: &str) -> Result<(), OpenError> {
    let scheme = url::Url::parse(destination)
        .map(|u| u.scheme().to_string())
        .unwrap_or_default();
    if EXTERNAL_SCHEMES.contains(&scheme.as_str()) {
        Ok(())
    } else {
        Err(OpenError::UnsupportedScheme {
            destination: destination.to_string(),
            scheme,
        })
    }
}

/// Something that can launch a destination outside the shell.
pub trait ExternalOpener: Send + Sync {
    fn open(&self, destination: &str) -> Result<(), OpenError>;
}

/// Opens destinations with the system default handler (usually the browser).
///
/// The launcher is detached, so this returns as soon as the child is spawned.
/// Only web and mail addresses are launched; see [`check_external_scheme`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open(&self, destination: &str) -> Result<(), OpenError> {
        check_external_scheme(destination)?;
        open::that_detached(destination).map_err(|source| OpenError::Launch {
            destination: destination.to_string(),
            source,
        })
    }
}

/// Keeps every destination it is asked to open instead of launching anything.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations seen so far, in call order.
    pub fn opened(&self) -> Vec<String> {
        match self.opened.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ExternalOpener for RecordingOpener {
    fn open(&self, destination: &str) -> Result<(), OpenError> {
        match self.opened.lock() {
            Ok(mut guard) => guard.push(destination.to_string()),
            Err(poisoned) => poisoned.into_inner().push(destination.to_string()),
        }
        Ok(())
    }
}

/// Best-effort handoff: failures are logged and dropped.
///
/// Returns whether the opener reported success, for callers that want to
/// surface it; the navigation outcome never depends on it.
pub fn handoff(opener: &dyn ExternalOpener, destination: &str) -> bool {
    match opener.open(destination) {
        Ok(()) => {
            tracing::info!("handed off to external handler: {destination}");
            true
        }
        Err(e) => {
            tracing::warn!("{e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoHandler;

    impl ExternalOpener for NoHandler {
        fn open(&self, destination: &str) -> Result<(), OpenError> {
            Err(OpenError::Launch {
                destination: destination.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no handler"),
            })
        }
    }

    #[test]
    fn recording_opener_keeps_order() {
        let opener = RecordingOpener::new();
        assert!(handoff(&opener, "https://example.com/a"));
        assert!(handoff(&opener, "mailto:someone@example.com"));
        assert_eq!(
            opener.opened(),
            vec!["https://example.com/a", "mailto:someone@example.com"]
        );
    }

    #[test]
    fn failed_open_is_swallowed() {
        assert!(!handoff(&NoHandler, "https://example.com/a"));
    }

    #[test]
    fn system_opener_refuses_non_web_schemes() {
        for destination in [
            "file:///etc/passwd",
            "javascript:alert(1)",
            "data:text/html,hi",
            "about:blank",
            "blob:https://chatgpt.com/abc",
            "not a url",
        ] {
            let err = SystemOpener.open(destination).unwrap_err();
            assert!(
                matches!(err, OpenError::UnsupportedScheme { .. }),
                "{destination}: {err}"
            );
            assert!(!handoff(&SystemOpener, destination));
        }
    }

    #[test]
    fn web_and_mail_schemes_pass_the_check() {
        assert!(check_external_scheme("https://example.com/a").is_ok());
        assert!(check_external_scheme("http://example.com").is_ok());
        assert!(check_external_scheme("mailto:someone@example.com").is_ok());
        assert!(check_external_scheme("HTTPS://EXAMPLE.COM").is_ok());
    }

    #[test]
    fn open_error_names_destination() {
        let err = NoHandler.open("https://example.com/x").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/x"));
        assert!(msg.contains("no handler"));
    }
}
