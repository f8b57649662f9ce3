//! The service plugin contract.
//!
//! Plugins are the cross-cutting layer of the dispatch pipeline:
//! authentication, request rewriting, response decoration. A plugin is
//! registered once at setup time for one [`PluginPhase`] and identified by
//! a unique name, which per-route options reference to enable or disable
//! it.
//!
//! # Phases
//!
//! - **BeforeMatching** — runs unconditionally for every request, before
//!   route resolution; may mutate or reject the request.
//! - **OnMatch** — runs for the matched route (subject to the per-route
//!   enable/disable rules); produces a typed context object for the
//!   handler.
//! - **AfterMatch** — runs after the handler; may observe or transform the
//!   response.
//!
//! A failing hook aborts the dispatch; authentication-specific errors
//! ([`DispatchError::Unauthorized`]) propagate verbatim to the boundary.

use crate::context::{ContextObject, DispatchContext};
use crate::error::DispatchError;
use crate::request::Request;
use crate::response::Response;

/// Pipeline stage at which a plugin runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginPhase {
    /// Before route resolution, unconditionally.
    BeforeMatching,
    /// After a route matched, before the handler runs.
    OnMatch,
    /// After the handler produced a response.
    AfterMatch,
}

/// A cross-cutting dispatch plugin.
///
/// Implement the hook for the phase the plugin is registered at; the other
/// hooks default to no-ops and are never invoked for phases the plugin is
/// not registered for.
pub trait ServicePlugin: Send + Sync + 'static {
    /// Unique plugin identifier, referenced by per-route
    /// `enable_plugins`/`disable_plugins` lists.
    fn name(&self) -> &str;

    /// BeforeMatching hook. May mutate the request; an error rejects it.
    fn before_matching(&self, _request: &mut Request) -> Result<(), DispatchError> {
        Ok(())
    }

    /// OnMatch hook. The returned object is stored in the
    /// [`DispatchContext`] under its concrete type, where the handler can
    /// declare it as a parameter. Earlier plugins' outputs are visible
    /// through `context`.
    fn on_match(
        &self,
        _request: &Request,
        _context: &DispatchContext,
    ) -> Result<Option<ContextObject>, DispatchError> {
        Ok(None)
    }

    /// AfterMatch hook. May observe or transform the response.
    fn after_match(
        &self,
        _request: &Request,
        _response: &mut Response,
    ) -> Result<(), DispatchError> {
        Ok(())
    }
}
