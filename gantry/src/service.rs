//! The dispatcher.
//!
//! A [`Service`] owns the route table and the plugin pipeline. Both are
//! read-only after setup, so one `Service` can be shared across
//! concurrently handled requests without synchronization; each dispatch is
//! a single pass with request-local state only.
//!
//! A dispatch walks a fixed sequence: the default-route check, the
//! `_METHOD` override, the CSRF referrer check, the BeforeMatching
//! plugins, route resolution, the active OnMatch plugins, argument binding
//! and handler invocation, then the AfterMatch plugins. Any failing step
//! aborts the remaining ones.

use crate::pattern::PathPattern;
use crate::pipeline::{PluginOptions, PluginPipeline};
use crate::route::{Route, RouteOptions};
use gantry_core::{
    CallArgs, Callback, DispatchContext, DispatchError, ParamSpec, PathParams, PatternError,
    PluginPhase, Request, Response, ServicePlugin,
};
use tracing::{debug, warn};

/// Form field consulted for the method override on `POST` requests.
const METHOD_OVERRIDE_FIELD: &str = "_METHOD";

/// Methods exempt from the CSRF referrer check.
const SAFE_METHODS: [&str; 3] = ["GET", "HEAD", "OPTIONS"];

/// Outcome of resolving a method and path against the route table.
#[derive(Debug)]
pub enum MatchResult<'s> {
    /// No registered pattern structurally matched the path.
    NoPathMatch,
    /// At least one pattern matched, but none of those routes allows the
    /// request method.
    PathMatchWrongMethod {
        /// Union of the matching routes' method sets, registration order.
        allowed: Vec<String>,
    },
    /// A route matched path and method.
    Matched {
        /// The winning route.
        route: &'s Route,
        /// Extracted path parameters, in pattern order.
        params: PathParams,
        /// The match-all binding, for wildcard-terminated patterns.
        match_all: Option<String>,
    },
}

/// The route table, plugin pipeline, and dispatch configuration.
#[derive(Default)]
pub struct Service {
    routes: Vec<Route>,
    pipeline: PluginPipeline,
    default_route: Option<String>,
    referrer_check: bool,
}

macro_rules! method_routes {
    ($($(#[$doc:meta])* $name:ident, $name_with:ident => $method:expr;)+) => {
        $(
            $(#[$doc])*
            pub fn $name(
                &mut self,
                pattern: &str,
                callback: Callback,
            ) -> Result<(), PatternError> {
                self.add_route(&[$method], pattern, callback)
            }

            /// Like the bare registration, with per-route options.
            pub fn $name_with(
                &mut self,
                pattern: &str,
                callback: Callback,
                options: RouteOptions,
            ) -> Result<(), PatternError> {
                self.add_route_with(&[$method], pattern, callback, options)
            }
        )+
    };
}

impl Service {
    /// Create an empty service: no routes, no plugins, CSRF checking off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the default route: root requests are redirected to it
    /// before anything else runs.
    pub fn set_default_route(&mut self, route: impl Into<String>) {
        self.default_route = Some(route.into());
    }

    /// Toggle the global CSRF referrer check (off by default).
    pub fn set_referrer_check(&mut self, enabled: bool) {
        self.referrer_check = enabled;
    }

    /// Register a route for a set of methods. Duplicate registrations are
    /// legal; the first registered wins at resolution time.
    pub fn add_route(
        &mut self,
        methods: &[&str],
        pattern: &str,
        callback: Callback,
    ) -> Result<(), PatternError> {
        self.add_route_with(methods, pattern, callback, RouteOptions::new())
    }

    /// Register a route with per-route options.
    pub fn add_route_with(
        &mut self,
        methods: &[&str],
        pattern: &str,
        callback: Callback,
        options: RouteOptions,
    ) -> Result<(), PatternError> {
        let compiled = PathPattern::compile(pattern)?;
        self.routes.push(Route::new(
            methods.iter().map(|m| (*m).to_owned()).collect(),
            compiled,
            callback,
            options,
        ));
        Ok(())
    }

    method_routes! {
        /// Register a `GET` route.
        get, get_with => "GET";
        /// Register a `POST` route.
        post, post_with => "POST";
        /// Register a `PUT` route.
        put, put_with => "PUT";
        /// Register a `DELETE` route.
        delete, delete_with => "DELETE";
        /// Register a `HEAD` route.
        head, head_with => "HEAD";
        /// Register an `OPTIONS` route.
        options, options_with => "OPTIONS";
    }

    /// Register a plugin at the BeforeMatching phase.
    pub fn register_before_matching_plugin(&mut self, plugin: impl ServicePlugin) {
        self.pipeline
            .register(plugin, PluginPhase::BeforeMatching, PluginOptions::default());
    }

    /// Register a plugin at the OnMatch phase, enabled by default.
    pub fn register_on_match_plugin(&mut self, plugin: impl ServicePlugin) {
        self.pipeline
            .register(plugin, PluginPhase::OnMatch, PluginOptions::default());
    }

    /// Register a plugin at the OnMatch phase with explicit options.
    pub fn register_on_match_plugin_with(
        &mut self,
        plugin: impl ServicePlugin,
        options: PluginOptions,
    ) {
        self.pipeline.register(plugin, PluginPhase::OnMatch, options);
    }

    /// Register a plugin at the AfterMatch phase.
    pub fn register_after_match_plugin(&mut self, plugin: impl ServicePlugin) {
        self.pipeline
            .register(plugin, PluginPhase::AfterMatch, PluginOptions::default());
    }

    /// The registered plugin pipeline.
    pub fn plugins(&self) -> &PluginPipeline {
        &self.pipeline
    }

    /// Resolve a method and path against the route table.
    ///
    /// Scans registration order. Every structurally-matching route feeds
    /// the allowed-method accumulator, so a wrong-method request reports
    /// the union of methods that would have worked — the 405-vs-404
    /// distinction the boundary relies on. Resolution has no side effects;
    /// identical inputs against an unmodified table give identical
    /// results.
    pub fn resolve(&self, method: &str, path: &str) -> MatchResult<'_> {
        let mut allowed: Vec<String> = Vec::new();
        for route in &self.routes {
            let Some(m) = route.pattern().matches(path) else {
                continue;
            };
            for candidate in route.methods() {
                if !allowed.iter().any(|a| a == candidate) {
                    allowed.push(candidate.clone());
                }
            }
            if route.allows_method(method) {
                return MatchResult::Matched {
                    route,
                    params: m.params,
                    match_all: m.match_all,
                };
            }
        }
        if allowed.is_empty() {
            MatchResult::NoPathMatch
        } else {
            MatchResult::PathMatchWrongMethod { allowed }
        }
    }

    /// Dispatch one request to completion.
    pub fn dispatch(&self, mut request: Request) -> Result<Response, DispatchError> {
        // Default-route redirect precedes everything, plugins included.
        if let Some(default_route) = &self.default_route {
            if matches!(request.path_info(), None | Some("/")) {
                let location = format!(
                    "{}{}",
                    request.root_url(),
                    default_route.trim_start_matches('/')
                );
                debug!(location = %location, "redirecting root request to default route");
                return Ok(Response::redirect(&location));
            }
        }

        // Method override, before the CSRF check so an overridden DELETE
        // is checked as a DELETE.
        if request.method() == "POST" {
            if let Some(method) = request.post_parameter(METHOD_OVERRIDE_FIELD) {
                let method = method.to_owned();
                debug!(method = %method, "applying form method override");
                request.set_method(method);
            }
        }

        self.check_referrer(&request)?;

        for entry in self.pipeline.phase(PluginPhase::BeforeMatching) {
            if let Err(error) = entry.plugin().before_matching(&mut request) {
                warn!(plugin = entry.name(), error = %error, "before-matching plugin rejected request");
                return Err(error);
            }
        }

        let Some(path) = request.path_info().map(str::to_owned) else {
            return Err(DispatchError::NotFound);
        };

        let (route, params, match_all) = match self.resolve(request.method(), &path) {
            MatchResult::Matched {
                route,
                params,
                match_all,
            } => (route, params, match_all),
            MatchResult::PathMatchWrongMethod { allowed } => {
                debug!(method = request.method(), path = %path, "path matched but method not allowed");
                return Err(DispatchError::MethodNotAllowed { allowed });
            }
            MatchResult::NoPathMatch => {
                debug!(path = %path, "no route matched");
                return Err(DispatchError::NotFound);
            }
        };
        debug!(pattern = route.pattern().raw(), "route matched");

        let mut context = DispatchContext::new();
        for entry in self.pipeline.active_on_match(route.options()) {
            match entry.plugin().on_match(&request, &context) {
                Ok(Some(object)) => context.insert_boxed(object),
                Ok(None) => {}
                Err(error) => {
                    warn!(plugin = entry.name(), error = %error, "on-match plugin failed");
                    return Err(error);
                }
            }
        }

        ensure_params_available(
            route.callback().params(),
            &params,
            &context,
            match_all.as_deref(),
        )?;
        let args = CallArgs::new(&request, &params, &context, match_all.as_deref());
        let mut response = route.callback().invoke(&args)?;

        for entry in self.pipeline.phase(PluginPhase::AfterMatch) {
            entry.plugin().after_match(&request, &mut response)?;
        }

        Ok(response)
    }

    /// CSRF referrer check: state-changing requests must carry a
    /// same-origin `Referer`. Runs before resolution; the would-be route's
    /// `disable_referrer_check` flag is honored by a side lookup against
    /// the (not yet mutated) request.
    fn check_referrer(&self, request: &Request) -> Result<(), DispatchError> {
        if !self.referrer_check || SAFE_METHODS.contains(&request.method()) {
            return Ok(());
        }

        let exempt = match request.path_info() {
            Some(path) => matches!(
                self.resolve(request.method(), path),
                MatchResult::Matched { route, .. } if route.options().referrer_check_disabled()
            ),
            None => false,
        };
        if exempt {
            return Ok(());
        }

        let same_origin = request
            .header("Referer")
            .is_some_and(|referrer| request.url().same_origin(referrer));
        if same_origin {
            Ok(())
        } else {
            warn!(method = request.method(), "missing or cross-origin referrer");
            Err(DispatchError::Csrf)
        }
    }
}

/// Verify every declared callback parameter has a binding before invoking.
fn ensure_params_available(
    specs: &[ParamSpec],
    params: &PathParams,
    context: &DispatchContext,
    match_all: Option<&str>,
) -> Result<(), DispatchError> {
    for spec in specs {
        match spec {
            ParamSpec::Request => {}
            ParamSpec::Path(name) => {
                if !params.contains(name) {
                    return Err(DispatchError::MissingParameter {
                        parameter: name.clone(),
                    });
                }
            }
            ParamSpec::Context { type_id, type_name } => {
                if !context.contains(*type_id) {
                    return Err(DispatchError::MissingParameter {
                        parameter: (*type_name).to_owned(),
                    });
                }
            }
            ParamSpec::MatchAll => {
                if match_all.is_none() {
                    return Err(DispatchError::MissingParameter {
                        parameter: "matchAll".to_owned(),
                    });
                }
            }
        }
    }
    Ok(())
}
