use std::fmt;
use std::sync::Arc;

use url::Url;

/// Schemes a probe can be issued against.
pub const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// One row of the mirror directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mirror {
    pub country: String,
    pub name: String,
    pub links: Vec<String>,
    pub bandwidth: String,
}

/// Where an endpoint came from. Carried through probing and ranking unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Origin {
    pub country: String,
    pub name: String,
    pub bandwidth: String,
}

impl From<&Mirror> for Origin {
    fn from(mirror: &Mirror) -> Self {
        Self {
            country: mirror.country.clone(),
            name: mirror.name.clone(),
            bandwidth: mirror.bandwidth.clone(),
        }
    }
}

/// A single probe target: an absolute http(s) URL plus the origin it was listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    origin: Arc<Origin>,
}

impl Endpoint {
    /// Returns `None` when `link` is not an absolute URL with a supported scheme.
    pub fn parse(link: &str, origin: Arc<Origin>) -> Option<Self> {
        if !is_supported_url(link) {
            return None;
        }
        Some(Self {
            url: link.to_string(),
            origin,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// The scheme predicate applied to every link before dispatch.
/// Relative links, other transports (ftp, rsync) and garbage all fail it.
pub fn is_supported_url(link: &str) -> bool {
    match Url::parse(link.trim()) {
        Ok(url) => SUPPORTED_SCHEMES.contains(&url.scheme()) && url.has_host(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_urls() {
        assert!(is_supported_url("http://archive.ubuntu.com/ubuntu/"));
        assert!(is_supported_url("https://mirror.example.org/ubuntu"));
        assert!(is_supported_url("HTTP://MIRROR.EXAMPLE.ORG/"));
    }

    #[test]
    fn test_unsupported_urls() {
        assert!(!is_supported_url("rsync://mirror.example.org/ubuntu"));
        assert!(!is_supported_url("ftp://mirror.example.org/ubuntu"));
        assert!(!is_supported_url("/ubuntu/+mirror/mirror.example.org-archive"));
        assert!(!is_supported_url("mirror.example.org/ubuntu"));
        assert!(!is_supported_url(""));
        assert!(!is_supported_url("http://"));
    }

    #[test]
    fn test_endpoint_keeps_origin() {
        let mirror = Mirror {
            country: "Netherlands".to_string(),
            name: "NLUUG".to_string(),
            links: vec![],
            bandwidth: "10 Gbps".to_string(),
        };
        let origin = Arc::new(Origin::from(&mirror));
        let endpoint =
            Endpoint::parse("http://ftp.nluug.nl/ubuntu/", origin).expect("supported url");
        assert_eq!(endpoint.url(), "http://ftp.nluug.nl/ubuntu/");
        assert_eq!(endpoint.origin().country, "Netherlands");
        assert_eq!(endpoint.origin().bandwidth, "10 Gbps");
        assert_eq!(endpoint.to_string(), "http://ftp.nluug.nl/ubuntu/");
    }
}
