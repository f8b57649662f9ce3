//! Testing utilities for Gantry.
//!
//! This module provides plugin fixtures for exercising the dispatch
//! pipeline in tests:
//!
//! - [`RecordingPlugin`]: records which phases ran, and how often
//! - [`StaticContextPlugin`]: deposits a fixed typed context object
//! - [`RejectingPlugin`]: fails every hook with a configured error

use gantry_core::{
    ContextObject, DispatchContext, DispatchError, PluginPhase, Request, Response, ServicePlugin,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording Plugin
// ============================================================================

/// A plugin that records every hook invocation.
///
/// Clones share the same record, so tests can keep a handle after handing
/// the plugin to the service.
pub struct RecordingPlugin {
    name: &'static str,
    calls: Arc<Mutex<Vec<PluginPhase>>>,
}

impl RecordingPlugin {
    /// Create a recording plugin with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The phases recorded so far, in invocation order.
    pub fn calls(&self) -> Vec<PluginPhase> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded invocations.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, phase: PluginPhase) {
        self.calls.lock().unwrap().push(phase);
    }
}

impl Clone for RecordingPlugin {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            calls: self.calls.clone(),
        }
    }
}

impl ServicePlugin for RecordingPlugin {
    fn name(&self) -> &str {
        self.name
    }

    fn before_matching(&self, _request: &mut Request) -> Result<(), DispatchError> {
        self.record(PluginPhase::BeforeMatching);
        Ok(())
    }

    fn on_match(
        &self,
        _request: &Request,
        _context: &DispatchContext,
    ) -> Result<Option<ContextObject>, DispatchError> {
        self.record(PluginPhase::OnMatch);
        Ok(None)
    }

    fn after_match(
        &self,
        _request: &Request,
        _response: &mut Response,
    ) -> Result<(), DispatchError> {
        self.record(PluginPhase::AfterMatch);
        Ok(())
    }
}

// ============================================================================
// Static Context Plugin
// ============================================================================

/// An OnMatch plugin that always produces a clone of a fixed context
/// object.
pub struct StaticContextPlugin<T> {
    name: &'static str,
    value: T,
}

impl<T> StaticContextPlugin<T> {
    /// Create a plugin producing `value` for every matched request.
    pub fn new(name: &'static str, value: T) -> Self {
        Self { name, value }
    }
}

impl<T: Clone + Send + Sync + 'static> ServicePlugin for StaticContextPlugin<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn on_match(
        &self,
        _request: &Request,
        _context: &DispatchContext,
    ) -> Result<Option<ContextObject>, DispatchError> {
        Ok(Some(Box::new(self.value.clone())))
    }
}

// ============================================================================
// Rejecting Plugin
// ============================================================================

/// A plugin whose every hook fails with a configured error.
pub struct RejectingPlugin {
    name: &'static str,
    error: Box<dyn Fn() -> DispatchError + Send + Sync>,
}

impl RejectingPlugin {
    /// Create a plugin failing with errors produced by `error`.
    pub fn new(
        name: &'static str,
        error: impl Fn() -> DispatchError + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            error: Box::new(error),
        }
    }
}

impl ServicePlugin for RejectingPlugin {
    fn name(&self) -> &str {
        self.name
    }

    fn before_matching(&self, _request: &mut Request) -> Result<(), DispatchError> {
        Err((self.error)())
    }

    fn on_match(
        &self,
        _request: &Request,
        _context: &DispatchContext,
    ) -> Result<Option<ContextObject>, DispatchError> {
        Err((self.error)())
    }

    fn after_match(
        &self,
        _request: &Request,
        _response: &mut Response,
    ) -> Result<(), DispatchError> {
        Err((self.error)())
    }
}
