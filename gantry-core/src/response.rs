//! Response value and conversion traits.
//!
//! [`Response`] is the structured value handed to the serialization
//! collaborator: a status code, an ordered header map, and body bytes.
//! [`IntoResponse`] normalizes handler return values — a `Response` passes
//! through, a plain string becomes a default successful text response.

use crate::error::DispatchError;
use crate::headers::HeaderMap;
use serde::Serialize;

const DEFAULT_CONTENT_TYPE: &str = "text/html;charset=UTF-8";

/// A structured HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Create an empty response with the default `text/html` content type.
    pub fn new(status: u16) -> Self {
        Self::with_content_type(status, DEFAULT_CONTENT_TYPE)
    }

    /// Create an empty response with an explicit content type.
    pub fn with_content_type(status: u16, content_type: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.set("Content-Type", content_type);
        Self {
            status,
            headers,
            body: Vec::new(),
        }
    }

    /// Create a 200 response with a JSON-serialized body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, DispatchError> {
        Self::json_with_status(200, value)
    }

    /// Create a response with a JSON-serialized body and the given status.
    pub fn json_with_status<T: Serialize + ?Sized>(
        status: u16,
        value: &T,
    ) -> Result<Self, DispatchError> {
        let body = serde_json::to_string(value)?;
        let mut response = Self::with_content_type(status, "application/json");
        response.set_body(body);
        Ok(response)
    }

    /// Create a 302 redirect to the given location.
    pub fn redirect(location: &str) -> Self {
        let mut response = Self::new(302);
        response.set_header("Location", location);
        response
    }

    /// The response status code.
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// A response header value, case-insensitively, or `None` if absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// All response headers, in insertion order.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Set a header, replacing an existing value under the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.set(name, value);
    }

    /// Append to a header, joining with `", "` if it already has a value.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.add(name, value);
    }

    /// Replace the response body.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// The response body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The response body as text (lossy for non-UTF-8 bodies).
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200)
    }
}

/// Trait for normalizing a handler's return value into a [`Response`].
///
/// # Default Implementations
///
/// - `Response` → passed through unchanged
/// - `String` / `&str` → 200 text response with the value as body
/// - `()` → empty 200 response
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a handler response",
    label = "missing `IntoResponse` implementation",
    note = "Return a `Response`, a string, or a type implementing `IntoResponse`."
)]
pub trait IntoResponse {
    /// Convert the value into a response.
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        let mut response = Response::new(200);
        response.set_body(self);
        response
    }
}

impl IntoResponse for &str {
    fn into_response(self) -> Response {
        self.to_owned().into_response()
    }
}

impl IntoResponse for () {
    fn into_response(self) -> Response {
        Response::new(200)
    }
}
