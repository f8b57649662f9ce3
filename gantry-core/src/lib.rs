//! # gantry-core
//!
//! Core types and contracts for the Gantry HTTP dispatch library.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! plugins and embedding code that don't need the full `gantry` engine.
//!
//! # What lives here
//!
//! - **Request side**: [`Request`] (with [`RequestBuilder`]), [`Url`], and
//!   the shared [`HeaderMap`] — the normalized view of a request the
//!   transport collaborator hands over.
//! - **Response side**: [`Response`] and the [`IntoResponse`] normalization
//!   trait for handler return values.
//! - **Plugin contract**: [`ServicePlugin`] with its [`PluginPhase`]s and
//!   the per-request [`DispatchContext`] where on-match plugins deposit
//!   typed context objects.
//! - **Handler contract**: [`Callback`] — a function plus declared
//!   [`ParamSpec`] slots, resolved by the dispatcher against a
//!   [`CallArgs`] table ([`PathParams`], context objects, the request, and
//!   the match-all binding).
//! - **Errors**: [`PatternError`] (registration time) and
//!   [`DispatchError`] (per request), with the JSON error rendering the
//!   boundary uses.
//!
//! The pattern compiler, route table, plugin pipeline, and dispatcher live
//! in the `gantry` crate.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod handler;
mod headers;
mod plugin;
mod request;
mod response;
mod url;

// Re-exports
pub use context::{ContextObject, DispatchContext};
pub use error::{BoxError, DispatchError, PatternError};
pub use handler::{CallArgs, Callback, ParamSpec, PathParams};
pub use headers::HeaderMap;
pub use plugin::{PluginPhase, ServicePlugin};
pub use request::{Request, RequestBuilder};
pub use response::{IntoResponse, Response};
pub use self::url::{Url, UrlError};
