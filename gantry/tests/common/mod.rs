#![allow(dead_code)]

use gantry::{DispatchError, Request, Response, ServicePlugin};

// ============================================================================
// Test Context Types
// ============================================================================

/// A plugin-produced context object, standing in for the output of an
/// authentication plugin.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenInfo {
    pub subject: String,
}

impl TokenInfo {
    pub fn new(subject: &str) -> Self {
        Self {
            subject: subject.to_owned(),
        }
    }
}

// ============================================================================
// Request Builders
// ============================================================================

pub fn get_request(path: &str) -> Request {
    request("GET", path)
}

pub fn request(method: &str, path: &str) -> Request {
    Request::builder("http://www.example.org/api")
        .method(method)
        .path_info(path)
        .build()
        .unwrap()
}

// ============================================================================
// Test Plugins
// ============================================================================

/// An AfterMatch plugin that stamps a fixed header onto every response.
pub struct HeaderStampPlugin {
    pub header: &'static str,
    pub value: &'static str,
}

impl ServicePlugin for HeaderStampPlugin {
    fn name(&self) -> &str {
        "HeaderStampPlugin"
    }

    fn after_match(&self, _request: &Request, response: &mut Response) -> Result<(), DispatchError> {
        response.set_header(self.header, self.value);
        Ok(())
    }
}
