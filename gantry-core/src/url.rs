//! Request URL helper.
//!
//! Wraps a parsed absolute URL and answers the questions the dispatcher
//! needs: the authority (scheme, host, and non-default port), decoded query
//! parameters, and same-origin comparison for the referrer check.

use std::fmt;
use thiserror::Error;

/// The URL string could not be parsed as an absolute URL.
#[derive(Error, Debug)]
#[error("invalid url: {0}")]
pub struct UrlError(#[from] ::url::ParseError);

/// An absolute request URL.
#[derive(Debug, Clone)]
pub struct Url {
    inner: ::url::Url,
}

impl Url {
    /// Parse an absolute URL.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        Ok(Self {
            inner: ::url::Url::parse(input)?,
        })
    }

    /// The URL scheme, e.g. `https`.
    pub fn scheme(&self) -> &str {
        self.inner.scheme()
    }

    /// The URL host, or the empty string for host-less URLs.
    pub fn host(&self) -> &str {
        self.inner.host_str().unwrap_or("")
    }

    /// The explicit port, if one is present and not the scheme default.
    pub fn port(&self) -> Option<u16> {
        self.inner.port()
    }

    /// The URL path (without the query string).
    pub fn path(&self) -> &str {
        self.inner.path()
    }

    /// The raw query string, if any.
    pub fn query(&self) -> Option<&str> {
        self.inner.query()
    }

    /// A decoded query parameter value, or `None` if the key is absent.
    pub fn query_parameter(&self, key: &str) -> Option<String> {
        self.inner
            .query_pairs()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.into_owned())
    }

    /// The authority part of the URL: scheme, host, and the port when it is
    /// not the scheme default. E.g. `https://www.example.org:8443`.
    pub fn authority(&self) -> String {
        self.inner.origin().ascii_serialization()
    }

    /// Whether `other` parses as a URL with the same origin (scheme, host,
    /// port) as this one. Unparseable input is not same-origin.
    pub fn same_origin(&self, other: &str) -> bool {
        match ::url::Url::parse(other) {
            Ok(parsed) => parsed.origin() == self.inner.origin(),
            Err(_) => false,
        }
    }

    /// The full URL as a string.
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_omits_default_ports() {
        let url = Url::parse("http://www.example.org:80/bar/index.php?foo=bar").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host(), "www.example.org");
        assert_eq!(url.authority(), "http://www.example.org");

        let url = Url::parse("https://www.example.org/bar/").unwrap();
        assert_eq!(url.authority(), "https://www.example.org");
    }

    #[test]
    fn authority_keeps_non_default_ports() {
        let url = Url::parse("https://www.example.org:8443/bar/index.php").unwrap();
        assert_eq!(url.port(), Some(8443));
        assert_eq!(url.authority(), "https://www.example.org:8443");
    }

    #[test]
    fn query_parameters_are_decoded() {
        let url = Url::parse("http://www.example.org/api?foo=bar&name=a%20b").unwrap();
        assert_eq!(url.query_parameter("foo").as_deref(), Some("bar"));
        assert_eq!(url.query_parameter("name").as_deref(), Some("a b"));
        assert_eq!(url.query_parameter("missing"), None);
    }

    #[test]
    fn same_origin_comparison() {
        let url = Url::parse("http://example.org/foo").unwrap();
        assert!(url.same_origin("http://example.org/"));
        assert!(url.same_origin("http://example.org:80/other/path"));
        assert!(!url.same_origin("https://example.org/"));
        assert!(!url.same_origin("http://example.org:8080/"));
        assert!(!url.same_origin("http://attacker.example/"));
        assert!(!url.same_origin("not a url"));
    }
}
