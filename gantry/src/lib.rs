//! # gantry - HTTP Route Matching and Plugin Dispatch
//!
//! `gantry` is a small dispatch library for HTTP-facing services: register
//! route patterns and handlers, hang cross-cutting plugins on the
//! pipeline, and hand each normalized request to [`Service::dispatch`].
//! It resolves the route (with precise 404-vs-405 semantics), applies the
//! method-override and CSRF-referrer rules, runs the plugin phases, binds
//! the handler's declared parameters, and normalizes the return value
//! into a [`Response`].
//!
//! ## Quick Start
//!
//! ```
//! use gantry::{Callback, ParamSpec, Request, Service};
//!
//! let mut service = Service::new();
//! service
//!     .get(
//!         "/hello/:name",
//!         Callback::with_params([ParamSpec::path("name")], |args| {
//!             Ok(format!("hello {}", args.param("name").unwrap_or_default()))
//!         }),
//!     )
//!     .unwrap();
//!
//! let request = Request::builder("http://www.example.org/api")
//!     .path_info("/hello/world")
//!     .build()
//!     .unwrap();
//!
//! let response = service.dispatch(request).unwrap();
//! assert_eq!(response.body_text(), "hello world");
//! ```
//!
//! ## Pattern language
//!
//! Patterns are `/`-delimited: literals, `:name` placeholders, a single
//! greedy `:name+` wildcard, `(...)` optional suffix groups, and the `*`
//! catch-all. See [`pattern`] for the full rules.
//!
//! ## Plugins
//!
//! A [`ServicePlugin`] registers at one of three phases — BeforeMatching,
//! OnMatch, AfterMatch — and routes can enable or disable OnMatch plugins
//! by name. An OnMatch plugin's output object is available to handlers
//! that declare it as a typed parameter; disabling the plugin for a route
//! makes such handlers fail with a missing-parameter fault rather than
//! silently passing a hole.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod pattern;
pub mod pipeline;
pub mod plugins;
pub mod route;
pub mod service;
pub mod testing;

// Re-exports
pub use gantry_core::{
    BoxError,
    CallArgs,
    Callback,
    ContextObject,
    DispatchContext,
    DispatchError,
    HeaderMap,
    IntoResponse,
    ParamSpec,
    PathParams,
    PatternError,
    PluginPhase,
    Request,
    RequestBuilder,
    Response,
    ServicePlugin,
    Url,
    UrlError,
};

pub use pattern::{PathPattern, PathSegment, PatternMatch};
pub use pipeline::{PluginEntry, PluginOptions, PluginPipeline};
pub use route::{Route, RouteOptions};
pub use service::{MatchResult, Service};

/// Prelude module - common imports for Gantry.
///
/// # Usage
///
/// ```rust,ignore
/// use gantry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CallArgs, Callback, DispatchError, IntoResponse, ParamSpec, PluginPhase, Request,
        Response, RouteOptions, Service, ServicePlugin,
    };
}
