//! Route records and per-route options.

use crate::pattern::PathPattern;
use gantry_core::Callback;
use std::fmt;

/// Per-route overrides, supplied at registration time.
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    enable_plugins: Vec<String>,
    disable_plugins: Vec<String>,
    disable_referrer_check: bool,
}

impl RouteOptions {
    /// Options with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a default-disabled plugin for this route.
    pub fn enable_plugin(mut self, name: impl Into<String>) -> Self {
        self.enable_plugins.push(name.into());
        self
    }

    /// Disable a default-enabled plugin for this route.
    pub fn disable_plugin(mut self, name: impl Into<String>) -> Self {
        self.disable_plugins.push(name.into());
        self
    }

    /// Exempt this route from the global CSRF referrer check.
    pub fn disable_referrer_check(mut self) -> Self {
        self.disable_referrer_check = true;
        self
    }

    /// Whether the named plugin is explicitly enabled for this route.
    pub fn enables(&self, name: &str) -> bool {
        self.enable_plugins.iter().any(|n| n == name)
    }

    /// Whether the named plugin is explicitly disabled for this route.
    pub fn disables(&self, name: &str) -> bool {
        self.disable_plugins.iter().any(|n| n == name)
    }

    /// Whether the CSRF referrer check is disabled for this route.
    pub fn referrer_check_disabled(&self) -> bool {
        self.disable_referrer_check
    }
}

/// A registered route: method set, compiled pattern, handler, and per-route
/// plugin overrides. Created at registration time, immutable thereafter,
/// owned by the service's route table.
pub struct Route {
    methods: Vec<String>,
    pattern: PathPattern,
    callback: Callback,
    options: RouteOptions,
}

impl Route {
    pub(crate) fn new(
        methods: Vec<String>,
        pattern: PathPattern,
        callback: Callback,
        options: RouteOptions,
    ) -> Self {
        Self {
            methods,
            pattern,
            callback,
            options,
        }
    }

    /// The HTTP methods this route answers, in registration order.
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Whether the route's method set contains `method` (case-sensitive).
    pub fn allows_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }

    /// The compiled route pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The per-route overrides.
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    pub(crate) fn callback(&self) -> &Callback {
        &self.callback
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("methods", &self.methods)
            .field("pattern", &self.pattern.raw())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
