//! Ordered set of trusted origin prefixes.

use super::PolicyError;

/// Prefixes that count as "inside the shell".
///
/// Each entry is a fully-qualified `scheme://host[:port]` string, kept exactly
/// as configured: matching is a case-sensitive prefix test on the raw
/// destination, so no normalisation (lowercasing, trailing slash) is applied.
/// Duplicates are dropped; first occurrence keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedOriginSet {
    prefixes: Vec<String>,
}

impl TrustedOriginSet {
    /// Validates and collects the given origins.
    pub fn new<I, S>(origins: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prefixes: Vec<String> = Vec::new();
        for origin in origins {
            let origin = origin.as_ref();
            validate_origin(origin)?;
            if !prefixes.iter().any(|p| p == origin) {
                prefixes.push(origin.to_string());
            }
        }
        Ok(Self { prefixes })
    }

    /// True if `destination` starts with any configured prefix.
    ///
    /// Overlapping prefixes are fine: any match is enough.
    pub fn matches(&self, destination: &str) -> bool {
        self.prefixes.iter().any(|p| destination.starts_with(p.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

/// Checks that `origin` is `scheme://host[:port]` with nothing after the authority.
fn validate_origin(origin: &str) -> Result<(), PolicyError> {
    if origin.is_empty() {
        return Err(PolicyError::invalid(origin, "empty origin"));
    }
    if origin.trim() != origin {
        return Err(PolicyError::invalid(origin, "surrounding whitespace"));
    }
    let parsed = url::Url::parse(origin).map_err(|e| PolicyError::invalid(origin, e.to_string()))?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(PolicyError::invalid(origin, "missing host"));
    }
    if !origin.contains("://") {
        return Err(PolicyError::invalid(origin, "missing scheme separator"));
    }
    // Authority only: "https://host" parses with path "/", so reject any
    // explicit path, query or fragment in the raw string instead.
    let after_scheme = &origin[origin.find("://").map_or(0, |i| i + 3)..];
    if after_scheme.contains(['/', '?', '#']) {
        return Err(PolicyError::invalid(origin, "must not contain a path, query or fragment"));
    }
    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(PolicyError::invalid(origin, "must not contain credentials"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_scheme_and_host() {
        let set = TrustedOriginSet::new(["https://chatgpt.com", "https://auth.openai.com"]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["https://chatgpt.com", "https://auth.openai.com"]
        );
    }

    #[test]
    fn accepts_explicit_port() {
        let set = TrustedOriginSet::new(["http://localhost:8080"]).unwrap();
        assert!(set.matches("http://localhost:8080/chat"));
    }

    #[test]
    fn rejects_missing_scheme() {
        let err = TrustedOriginSet::new(["chatgpt.com"]).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidOrigin { .. }));
    }

    #[test]
    fn rejects_path_and_query() {
        assert!(TrustedOriginSet::new(["https://chatgpt.com/"]).is_err());
        assert!(TrustedOriginSet::new(["https://chatgpt.com/c"]).is_err());
        assert!(TrustedOriginSet::new(["https://chatgpt.com?x=1"]).is_err());
    }

    #[test]
    fn rejects_empty_and_hostless() {
        assert!(TrustedOriginSet::new([""]).is_err());
        assert!(TrustedOriginSet::new(["mailto:someone@example.com"]).is_err());
        assert!(TrustedOriginSet::new([" https://chatgpt.com"]).is_err());
    }

    #[test]
    fn rejects_credentials() {
        assert!(TrustedOriginSet::new(["https://user:pw@chatgpt.com"]).is_err());
    }

    #[test]
    fn duplicates_keep_first_position() {
        let set = TrustedOriginSet::new([
            "https://b.example.com",
            "https://a.example.com",
            "https://b.example.com",
        ])
        .unwrap();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["https://b.example.com", "https://a.example.com"]
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let set = TrustedOriginSet::new(["https://chatgpt.com"]).unwrap();
        assert!(set.matches("https://chatgpt.com/c/123"));
        assert!(!set.matches("HTTPS://CHATGPT.COM/c/123"));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let set = TrustedOriginSet::default();
        assert!(set.is_empty());
        assert!(!set.matches("https://chatgpt.com"));
    }
}
