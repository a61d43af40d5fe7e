//! Document link resolution.
//!
//! The listing endpoint returns a storage location per document. Whether
//! that location is used as-is or appended to a storage bucket prefix is a
//! deployment decision, so it lives here instead of in the views.

use crate::config::LinksConfig;
use crate::core::api::DocumentSummary;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkPolicy {
    /// Use `document_url` exactly as the service returned it.
    #[default]
    Verbatim,
    /// Join a storage prefix and the relative `document_url`.
    Prefixed(String),
}

#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    policy: LinkPolicy,
}

impl LinkResolver {
    pub fn new(policy: LinkPolicy) -> Self {
        Self { policy }
    }

    pub fn verbatim() -> Self {
        Self::new(LinkPolicy::Verbatim)
    }

    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self::new(LinkPolicy::Prefixed(prefix.into()))
    }

    pub fn from_config(config: &LinksConfig) -> Self {
        match config.prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() => Self::prefixed(prefix),
            _ => Self::verbatim(),
        }
    }

    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }

    /// Absolute link for a listed document.
    ///
    /// Absolute `http(s)://` locations are never prefixed.
    pub fn resolve(&self, document: &DocumentSummary) -> String {
        self.resolve_url(&document.url)
    }

    pub fn resolve_url(&self, url: &str) -> String {
        match &self.policy {
            LinkPolicy::Verbatim => url.to_string(),
            LinkPolicy::Prefixed(_) if is_absolute(url) => url.to_string(),
            LinkPolicy::Prefixed(prefix) => format!(
                "{}/{}",
                prefix.trim_end_matches('/'),
                url.trim_start_matches('/')
            ),
        }
    }
}

fn is_absolute(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn doc(url: &str) -> DocumentSummary {
        DocumentSummary {
            name: "x.pdf".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_verbatim_passes_through() {
        let resolver = LinkResolver::verbatim();
        assert_eq!(resolver.resolve(&doc("u")), "u");
        assert_eq!(
            resolver.resolve(&doc("https://bucket.s3.amazonaws.com/documents/x.pdf")),
            "https://bucket.s3.amazonaws.com/documents/x.pdf"
        );
    }

    #[rstest]
    #[case("https://s3.amazonaws.com/bucket", "documents/x.pdf")]
    #[case("https://s3.amazonaws.com/bucket/", "documents/x.pdf")]
    #[case("https://s3.amazonaws.com/bucket/", "/documents/x.pdf")]
    #[case("https://s3.amazonaws.com/bucket", "/documents/x.pdf")]
    fn test_prefixed_joins_with_single_slash(#[case] prefix: &str, #[case] url: &str) {
        let resolver = LinkResolver::prefixed(prefix);
        assert_eq!(
            resolver.resolve(&doc(url)),
            "https://s3.amazonaws.com/bucket/documents/x.pdf"
        );
    }

    #[test]
    fn test_prefixed_leaves_absolute_urls() {
        let resolver = LinkResolver::prefixed("https://s3.amazonaws.com/bucket");
        assert_eq!(
            resolver.resolve(&doc("HTTPS://cdn.example.com/x.pdf")),
            "HTTPS://cdn.example.com/x.pdf"
        );
    }

    #[test]
    fn test_from_config() {
        let mut config = LinksConfig::default();
        assert_eq!(LinkResolver::from_config(&config).policy(), &LinkPolicy::Verbatim);

        config.prefix = Some("   ".to_string());
        assert_eq!(LinkResolver::from_config(&config).policy(), &LinkPolicy::Verbatim);

        config.prefix = Some("https://s3.amazonaws.com/bucket".to_string());
        assert_eq!(
            LinkResolver::from_config(&config).policy(),
            &LinkPolicy::Prefixed("https://s3.amazonaws.com/bucket".to_string())
        );
    }
}
