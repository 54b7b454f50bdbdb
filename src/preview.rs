//! Draft mode.
//!
//! Editors enable draft viewing with `GET /api/draft?secret=…&redirect=…`.
//! The secret comes from the environment variable named by
//! `preview.secret_env`; without it draft mode can't be enabled at all.
//!
//! Secrets are compared by SHA-256 digest. The cookie carries a digest
//! derived from the secret, so any server holding the same secret can verify
//! it without session state, and rotating the secret ends every session.

use crate::config::SiteConfig;
use sha2::{Digest, Sha256};

/// Path a redirect falls back to when the requested one isn't local.
pub const DEFAULT_REDIRECT: &str = "/";

fn digest(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct DraftMode {
    secret: Option<String>,
    cookie_name: String,
    secure: bool,
}

impl DraftMode {
    pub fn new(secret: Option<String>, cookie_name: impl Into<String>, secure: bool) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
            cookie_name: cookie_name.into(),
            secure,
        }
    }

    /// Secret from the environment; `Secure` cookies when the site is served over https.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            config.preview.secret(),
            config.preview.cookie_name.clone(),
            config.site_url.starts_with("https://"),
        )
    }

    pub fn is_available(&self) -> bool {
        self.secret.is_some()
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Whether `candidate` is the configured secret. Always false when no
    /// secret is configured.
    pub fn check_secret(&self, candidate: &str) -> bool {
        match &self.secret {
            Some(secret) => digest(&[secret.as_bytes()]) == digest(&[candidate.as_bytes()]),
            None => false,
        }
    }

    /// Cookie value proving draft mode was enabled with the current secret.
    pub fn cookie_value(&self) -> Option<String> {
        self.secret
            .as_ref()
            .map(|secret| digest(&[b"draft-mode\0", secret.as_bytes()]))
    }

    /// Whether a `Cookie` request header carries a valid draft cookie.
    pub fn is_enabled(&self, cookie_header: Option<&str>) -> bool {
        let (Some(expected), Some(header)) = (self.cookie_value(), cookie_header) else {
            return false;
        };
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .any(|(name, value)| name == self.cookie_name && value == expected)
    }

    /// `Set-Cookie` value that enables draft mode.
    pub fn enable_cookie(&self) -> Option<String> {
        let value = self.cookie_value()?;
        Some(format!(
            "{}={value}; Path=/; HttpOnly; SameSite=Lax{}",
            self.cookie_name,
            if self.secure { "; Secure" } else { "" }
        ))
    }

    /// `Set-Cookie` value that removes the draft cookie.
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
            self.cookie_name,
            if self.secure { "; Secure" } else { "" }
        )
    }
}

/// A redirect target that stays on this site: a path starting with a single
/// `/`. Protocol-relative URLs, absolute URLs and anything with control
/// characters become [`DEFAULT_REDIRECT`].
pub fn sanitize_redirect(raw: Option<&str>) -> String {
    match raw {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(secret: Option<&str>) -> DraftMode {
        DraftMode::new(secret.map(String::from), "draft_mode", false)
    }

    // =========================================================================
    // Secrets and cookies
    // =========================================================================

    #[test]
    fn secret_must_match() {
        let mode = draft(Some("s3cret"));
        assert!(mode.check_secret("s3cret"));
        assert!(!mode.check_secret("S3CRET"));
        assert!(!mode.check_secret(""));
    }

    #[test]
    fn no_secret_means_unavailable() {
        let mode = draft(None);
        assert!(!mode.is_available());
        assert!(!mode.check_secret(""));
        assert!(mode.enable_cookie().is_none());
        assert!(!mode.is_enabled(Some("draft_mode=anything")));
        assert!(!draft(Some("")).is_available());
    }

    #[test]
    fn cookie_value_is_a_digest_not_the_secret() {
        let mode = draft(Some("s3cret"));
        let value = mode.cookie_value().unwrap();
        assert_eq!(value.len(), 64);
        assert!(!value.contains("s3cret"));
        assert_ne!(Some(value), draft(Some("other")).cookie_value());
    }

    #[test]
    fn cookie_header_is_parsed() {
        let mode = draft(Some("s3cret"));
        let value = mode.cookie_value().unwrap();
        assert!(mode.is_enabled(Some(&format!("theme=dark; draft_mode={value}"))));
        assert!(!mode.is_enabled(Some("draft_mode=forged")));
        assert!(!mode.is_enabled(Some(&format!("other={value}"))));
        assert!(!mode.is_enabled(None));
    }

    #[test]
    fn set_cookie_values() {
        let mode = DraftMode::new(Some("s3cret".into()), "draft_mode", true);
        let enable = mode.enable_cookie().unwrap();
        assert!(enable.starts_with("draft_mode="));
        assert!(enable.contains("HttpOnly"));
        assert!(enable.ends_with("; Secure"));
        let clear = mode.clear_cookie();
        assert!(clear.starts_with("draft_mode=;"));
        assert!(clear.contains("Max-Age=0"));
    }

    // =========================================================================
    // Redirects
    // =========================================================================

    #[test]
    fn local_redirects_are_kept() {
        assert_eq!(sanitize_redirect(Some("/destinations/cancun")), "/destinations/cancun");
        assert_eq!(sanitize_redirect(Some("/articles?page=2")), "/articles?page=2");
    }

    #[test]
    fn foreign_redirects_fall_back_to_home() {
        for raw in [
            None,
            Some(""),
            Some("https://evil.example"),
            Some("//evil.example"),
            Some("/\\evil.example"),
            Some("destinations"),
            Some("/a\r\nSet-Cookie: x=y"),
        ] {
            assert_eq!(sanitize_redirect(raw), DEFAULT_REDIRECT, "{raw:?}");
        }
    }
}
