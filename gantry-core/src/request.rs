//! The normalized incoming request.
//!
//! A [`Request`] is produced by the transport-level parsing collaborator;
//! this crate only consumes it. The collaborator guarantees the method and
//! URL are always present. Path info — the part of the request path after
//! the front controller — is optional, and header lookup returns `None`
//! (never an empty string) for missing keys.

use crate::headers::HeaderMap;
use crate::url::{Url, UrlError};

/// A normalized HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    url: Url,
    method: String,
    path_info: Option<String>,
    headers: HeaderMap,
    post: Vec<(String, String)>,
}

impl Request {
    /// Start building a request for the given absolute URL.
    pub fn builder(url: &str) -> RequestBuilder {
        RequestBuilder::new(url)
    }

    /// The effective HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Replace the effective HTTP method. Used by the dispatcher to apply
    /// the `_METHOD` form override before resolution.
    pub fn set_method(&mut self, method: impl Into<String>) {
        self.method = method.into();
    }

    /// The path info, i.e. the route path to resolve.
    pub fn path_info(&self) -> Option<&str> {
        self.path_info.as_deref()
    }

    /// Replace the path info. Before-matching plugins may rewrite the path
    /// this way; resolution sees the rewritten value.
    pub fn set_path_info(&mut self, path_info: impl Into<String>) {
        self.path_info = Some(path_info.into());
    }

    /// The request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// A request header value, case-insensitively, or `None` if absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// All request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Set a request header (plugin-side request mutation).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.set(name, value);
    }

    /// A decoded form (POST) parameter, or `None` if absent.
    pub fn post_parameter(&self, key: &str) -> Option<&str> {
        self.post
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// A decoded query parameter, or `None` if absent.
    pub fn query_parameter(&self, key: &str) -> Option<String> {
        self.url.query_parameter(key)
    }

    /// The request path up to and including the front controller, always
    /// `/`-terminated: the URL path minus the path info, or minus the
    /// trailing script component when no path info is present.
    pub fn root(&self) -> String {
        let path = self.url.path();
        let mut root = match self.path_info.as_deref() {
            Some(info) if !info.is_empty() => {
                path.strip_suffix(info).unwrap_or(path).to_owned()
            }
            Some(_) => path.to_owned(),
            None => match path.rfind('/') {
                Some(idx) => path[..idx].to_owned(),
                None => String::new(),
            },
        };
        if !root.ends_with('/') {
            root.push('/');
        }
        root
    }

    /// The root as a full URL: authority plus [`root`](Self::root).
    pub fn root_url(&self) -> String {
        format!("{}{}", self.url.authority(), self.root())
    }
}

/// Builder for [`Request`], standing in for the front-controller parsing
/// collaborator in tests and embedding code.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    method: String,
    path_info: Option<String>,
    headers: HeaderMap,
    post: Vec<(String, String)>,
}

impl RequestBuilder {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            method: "GET".to_owned(),
            path_info: None,
            headers: HeaderMap::new(),
            post: Vec::new(),
        }
    }

    /// Set the HTTP method (defaults to `GET`).
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the path info.
    pub fn path_info(mut self, path_info: impl Into<String>) -> Self {
        self.path_info = Some(path_info.into());
        self
    }

    /// Set a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Add a decoded form (POST) parameter.
    pub fn post_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.post.push((key.into(), value.into()));
        self
    }

    /// Build the request. Fails if the URL does not parse.
    pub fn build(self) -> Result<Request, UrlError> {
        Ok(Request {
            url: Url::parse(&self.url)?,
            method: self.method,
            path_info: self.path_info,
            headers: self.headers,
            post: self.post,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_without_path_info_drops_the_script_component() {
        let request = Request::builder("http://www.example.org/bar/index.php?foo=bar")
            .build()
            .unwrap();
        assert_eq!(request.root(), "/bar/");
        assert_eq!(request.root_url(), "http://www.example.org/bar/");
    }

    #[test]
    fn root_with_path_info_strips_it() {
        let request = Request::builder("http://www.example.org/bar/index.php/def?foo=bar")
            .path_info("/def")
            .build()
            .unwrap();
        assert_eq!(request.root(), "/bar/index.php/");
        assert_eq!(request.root_url(), "http://www.example.org/bar/index.php/");
    }

    #[test]
    fn root_at_server_root() {
        let request = Request::builder("http://www.example.org/index.php")
            .build()
            .unwrap();
        assert_eq!(request.root(), "/");
    }

    #[test]
    fn header_lookup_returns_absent_for_missing_keys() {
        let request = Request::builder("http://www.example.org/")
            .header("Referer", "http://www.example.org/")
            .build()
            .unwrap();
        assert_eq!(request.header("referer"), Some("http://www.example.org/"));
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn query_parameter_lookup() {
        let request = Request::builder("http://www.example.org/api?foo=bar")
            .build()
            .unwrap();
        assert_eq!(request.query_parameter("foo").as_deref(), Some("bar"));
        assert_eq!(request.query_parameter("baz"), None);
    }

    #[test]
    fn post_parameter_lookup() {
        let request = Request::builder("http://www.example.org/")
            .method("POST")
            .post_parameter("_METHOD", "DELETE")
            .build()
            .unwrap();
        assert_eq!(request.post_parameter("_METHOD"), Some("DELETE"));
        assert_eq!(request.post_parameter("other"), None);
    }
}
