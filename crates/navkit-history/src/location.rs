//! URL cleaning.
//!
//! Raw input from an address bar or a link is trimmed, given a default
//! scheme when it has none, parsed, and checked against an allow-list of
//! schemes. The result is a [`NormalizedUrl`], the only form of location the
//! history stores.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::UrlRejection;

/// A canonical resource identifier.
///
/// Produced by a [`UrlCleaner`]. Two locations are the same page exactly
/// when their normalized strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// The canonical string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the canonical string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Uses the parsed URL's serialization as the canonical form.
impl From<Url> for NormalizedUrl {
    fn from(url: Url) -> Self {
        Self(String::from(url))
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NormalizedUrl {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedUrl {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Turns raw input into a [`NormalizedUrl`], or `None` when the input is
/// not a usable location.
///
/// Implemented by [`UrlNormalizer`] and by any `Fn(&str) -> Option<NormalizedUrl>`.
pub trait UrlCleaner {
    fn clean(&self, raw: &str) -> Option<NormalizedUrl>;
}

impl<F> UrlCleaner for F
where
    F: Fn(&str) -> Option<NormalizedUrl>,
{
    fn clean(&self, raw: &str) -> Option<NormalizedUrl> {
        self(raw)
    }
}

/// Rules applied by [`UrlNormalizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Scheme prepended to input that has none, e.g. `example.com`.
    pub default_scheme: String,

    /// Schemes a location may use. Compared case-insensitively.
    pub allowed_schemes: Vec<String>,

    /// Drop the `#fragment` part so in-page anchors share one history entry.
    pub strip_fragment: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            default_scheme: "http".to_string(),
            allowed_schemes: ["http", "https", "file", "about"]
                .into_iter()
                .map(String::from)
                .collect(),
            strip_fragment: false,
        }
    }
}

impl NormalizeConfig {
    fn allows(&self, scheme: &str) -> bool {
        self.allowed_schemes
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
    }
}

/// The default URL cleaner.
#[derive(Debug, Clone, Default)]
pub struct UrlNormalizer {
    config: NormalizeConfig,
}

impl UrlNormalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Normalize `raw`, reporting why it was rejected.
    pub fn try_normalize(&self, raw: &str) -> Result<NormalizedUrl, UrlRejection> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UrlRejection::Empty);
        }

        let candidate = match explicit_scheme(trimmed) {
            Some(_) => trimmed.to_string(),
            None => format!("{}://{}", self.config.default_scheme, trimmed),
        };

        let mut url = Url::parse(&candidate).map_err(|source| UrlRejection::Invalid {
            input: trimmed.to_string(),
            source,
        })?;

        if !self.config.allows(url.scheme()) {
            return Err(UrlRejection::SchemeNotAllowed {
                scheme: url.scheme().to_string(),
            });
        }

        if self.config.strip_fragment {
            url.set_fragment(None);
        }

        Ok(NormalizedUrl::from(url))
    }
}

impl UrlCleaner for UrlNormalizer {
    fn clean(&self, raw: &str) -> Option<NormalizedUrl> {
        match self.try_normalize(raw) {
            Ok(url) => Some(url),
            Err(reason) => {
                tracing::debug!(input = raw, %reason, "rejected URL");
                None
            }
        }
    }
}

/// Normalize `raw` with the default rules.
pub fn normalize(raw: &str) -> Option<NormalizedUrl> {
    UrlNormalizer::default().clean(raw)
}

/// Return the scheme if `input` starts with one.
///
/// `host:8080` is a host with a port, not a scheme, so a colon followed by
/// a digit does not count. Dots are excluded so `example.com:x` is a host.
fn explicit_scheme(input: &str) -> Option<&str> {
    let (scheme, rest) = input.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic()
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-')
    {
        return None;
    }
    if !rest.starts_with("//") && rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_default_scheme() {
        assert_eq!(normalize("example.com").unwrap(), "http://example.com/");
        assert_eq!(
            normalize("  example.com/path?q=1  ").unwrap(),
            "http://example.com/path?q=1"
        );
    }

    #[test]
    fn test_canonicalizes_scheme_and_host() {
        assert_eq!(
            normalize("HTTPS://Example.COM:443/a").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_host_with_port_is_not_a_scheme() {
        assert_eq!(
            normalize("localhost:8080").unwrap(),
            "http://localhost:8080/"
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            UrlNormalizer::default().try_normalize("   "),
            Err(UrlRejection::Empty)
        );
        assert!(normalize("").is_none());
    }

    #[test]
    fn test_rejects_unparsable() {
        let result = UrlNormalizer::default().try_normalize("http://exa mple.com");
        assert!(matches!(result, Err(UrlRejection::Invalid { .. })));
    }

    #[test]
    fn test_web_url_without_host_is_invalid() {
        for input in ["http://", "https://"] {
            let result = UrlNormalizer::default().try_normalize(input);
            assert!(matches!(result, Err(UrlRejection::Invalid { .. })), "{input}");
        }
    }

    #[test]
    fn test_rejects_disallowed_scheme() {
        let result = UrlNormalizer::default().try_normalize("ftp://example.com");
        assert_eq!(
            result,
            Err(UrlRejection::SchemeNotAllowed {
                scheme: "ftp".to_string()
            })
        );
        assert!(normalize("javascript:alert(1)").is_none());
    }

    #[test]
    fn test_about_blank_allowed() {
        assert_eq!(normalize("about:blank").unwrap(), "about:blank");
    }

    #[test]
    fn test_strip_fragment() {
        let keep = UrlNormalizer::default();
        assert_eq!(
            keep.clean("example.com/page#top").unwrap(),
            "http://example.com/page#top"
        );

        let strip = UrlNormalizer::new(NormalizeConfig {
            strip_fragment: true,
            ..Default::default()
        });
        assert_eq!(
            strip.clean("example.com/page#top").unwrap(),
            "http://example.com/page"
        );
    }

    #[test]
    fn test_custom_default_scheme() {
        let normalizer = UrlNormalizer::new(NormalizeConfig {
            default_scheme: "https".to_string(),
            ..Default::default()
        });
        assert_eq!(normalizer.clean("example.com").unwrap(), "https://example.com/");
    }

    #[test]
    fn test_closure_cleaner() {
        let https_only = |raw: &str| {
            Url::parse(raw)
                .ok()
                .filter(|url| url.scheme() == "https")
                .map(NormalizedUrl::from)
        };
        assert!(https_only.clean("http://example.com").is_none());
        assert_eq!(
            https_only.clean("https://example.com").unwrap(),
            "https://example.com/"
        );
    }
}
