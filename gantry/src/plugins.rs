//! Stock plugins.

use gantry_core::{DispatchError, Request, Response, ServicePlugin};

/// An AfterMatch plugin that logs each dispatched request through
/// `tracing`.
pub struct RequestLogPlugin;

impl ServicePlugin for RequestLogPlugin {
    fn name(&self) -> &str {
        "RequestLogPlugin"
    }

    fn after_match(&self, request: &Request, response: &mut Response) -> Result<(), DispatchError> {
        tracing::info!(
            method = request.method(),
            path = request.path_info().unwrap_or("/"),
            status = %response.status_code(),
            "request dispatched"
        );
        Ok(())
    }
}
