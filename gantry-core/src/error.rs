//! Error types for Gantry.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`PatternError`] - Malformed route patterns, raised at registration time
//! - [`DispatchError`] - Failures while dispatching a single request
//!
//! A [`PatternError`] is fatal to startup and never occurs during dispatch.
//! A [`DispatchError`] is local to one request and is never retried
//! internally; the boundary maps each variant to an HTTP status code via
//! [`DispatchError::status_code`] and [`DispatchError::to_response`].

use crate::response::Response;
use thiserror::Error;

/// A boxed error type for opaque plugin and handler failure payloads.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while compiling a route pattern.
#[derive(Error, Debug)]
pub enum PatternError {
    /// An optional group is not well-formed (unbalanced or stray
    /// parentheses, or trailing text after a group).
    #[error("unbalanced optional group in pattern \"{0}\"")]
    UnbalancedGroup(String),

    /// Two match-all segments would compete for the same position.
    #[error("competing match-all segments in pattern \"{0}\"")]
    CompetingWildcards(String),
}

/// Errors that can occur while dispatching a request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No registered route's path structurally matched.
    #[error("url not found")]
    NotFound,

    /// A path matched, but no matching route allows the request method.
    #[error("unsupported method")]
    MethodNotAllowed {
        /// Union of the method sets of all structurally-matching routes,
        /// in registration order. Populates the `Allow` response header.
        allowed: Vec<String>,
    },

    /// The callback declares a parameter that no active plugin or path
    /// binding supplies. A programming error, mapped to a server fault.
    #[error("parameter expected by callback not available")]
    MissingParameter {
        /// The declared parameter (path parameter name or context type).
        parameter: String,
    },

    /// The referrer check failed for a state-changing request.
    #[error("CSRF protection triggered")]
    Csrf,

    /// An authentication plugin rejected the request.
    #[error("{error}")]
    Unauthorized {
        /// Short machine-readable error code.
        error: String,
        /// Optional human-readable description.
        description: Option<String>,
        /// Preformatted `WWW-Authenticate` challenge, if any.
        www_authenticate: Option<String>,
    },

    /// The request is malformed in a way a plugin or handler detected.
    #[error("{error}")]
    BadRequest {
        /// Short machine-readable error code.
        error: String,
        /// Optional human-readable description.
        description: Option<String>,
    },

    /// An unexpected internal failure.
    #[error(transparent)]
    Internal(BoxError),
}

impl DispatchError {
    /// The HTTP status code this error maps to at the boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            DispatchError::NotFound => 404,
            DispatchError::MethodNotAllowed { .. } => 405,
            DispatchError::MissingParameter { .. } => 500,
            DispatchError::Csrf => 400,
            DispatchError::Unauthorized { .. } => 401,
            DispatchError::BadRequest { .. } => 400,
            DispatchError::Internal(_) => 500,
        }
    }

    fn description(&self) -> Option<&str> {
        match self {
            DispatchError::Unauthorized { description, .. }
            | DispatchError::BadRequest { description, .. } => description.as_deref(),
            _ => None,
        }
    }

    /// Render this error as a JSON response.
    ///
    /// The body shape is `{"error": …}` with an optional
    /// `"error_description"`. A 405 carries an `Allow` header listing the
    /// allowed methods; a 401 carries the plugin's `WWW-Authenticate`
    /// challenge.
    pub fn to_response(&self) -> Response {
        let mut body = serde_json::json!({ "error": self.to_string() });
        if let Some(description) = self.description() {
            body["error_description"] = serde_json::Value::String(description.to_owned());
        }

        let mut response = Response::with_content_type(self.status_code(), "application/json");
        response.set_body(body.to_string());

        match self {
            DispatchError::MethodNotAllowed { allowed } if !allowed.is_empty() => {
                response.set_header("Allow", allowed.join(","));
            }
            DispatchError::Unauthorized {
                www_authenticate: Some(challenge),
                ..
            } => {
                response.set_header("WWW-Authenticate", challenge.clone());
            }
            _ => {}
        }

        response
    }
}

// Convenience conversions
impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Internal(err)
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        DispatchError::Internal(Box::new(err))
    }
}
