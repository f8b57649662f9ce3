//! Handler representation and argument binding.
//!
//! The original duck-typed callbacks resolved their arguments by runtime
//! reflection over parameter names and type hints. Here a handler is a
//! [`Callback`]: a function plus a declared, ordered list of typed
//! parameter slots ([`ParamSpec`]), fixed at registration time. The
//! dispatcher resolves every declared slot by static lookup before
//! invoking the function — against the live request, the plugin-produced
//! context objects (by type), the extracted path parameters (by name, in
//! the order the callback declares them, not pattern order), and the
//! match-all binding. A declared slot nothing supplies fails the dispatch
//! with [`DispatchError::MissingParameter`]; that is what makes a handler
//! requiring a disabled plugin's output unreachable instead of silently
//! receiving a hole.

use crate::context::DispatchContext;
use crate::error::DispatchError;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use std::any::{Any, TypeId};

/// Ordered `(name, value)` path parameter bindings extracted by a pattern
/// match. A `None` value is the "absent" binding produced by an unvisited
/// optional group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    entries: Vec<(String, Option<String>)>,
}

impl PathParams {
    /// Append a binding.
    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        self.entries.push((name.into(), value));
    }

    /// Look up a binding by name. The outer `None` means the name was not
    /// bound at all; `Some(None)` means it was bound absent.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref())
    }

    /// Whether the name was bound (present or absent).
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterate bindings in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One declared parameter slot of a [`Callback`].
#[derive(Debug, Clone)]
pub enum ParamSpec {
    /// The live request object.
    Request,
    /// A named path parameter.
    Path(String),
    /// A plugin-produced context object, matched by concrete type.
    Context {
        /// Type key of the expected context object.
        type_id: TypeId,
        /// Type name, for the missing-parameter diagnostic.
        type_name: &'static str,
    },
    /// The match-all binding of a wildcard-terminated or `*` pattern.
    MatchAll,
}

impl ParamSpec {
    /// Declare a named path parameter slot.
    pub fn path(name: impl Into<String>) -> Self {
        ParamSpec::Path(name.into())
    }

    /// Declare a context object slot for type `T`.
    pub fn context<T: Any>() -> Self {
        ParamSpec::Context {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// The resolved argument table a [`Callback`] executes against.
pub struct CallArgs<'a> {
    request: &'a Request,
    params: &'a PathParams,
    context: &'a DispatchContext,
    match_all: Option<&'a str>,
}

impl<'a> CallArgs<'a> {
    /// Assemble the argument table for one invocation.
    pub fn new(
        request: &'a Request,
        params: &'a PathParams,
        context: &'a DispatchContext,
        match_all: Option<&'a str>,
    ) -> Self {
        Self {
            request,
            params,
            context,
            match_all,
        }
    }

    /// The live request.
    pub fn request(&self) -> &'a Request {
        self.request
    }

    /// A path parameter value; `None` for an absent optional binding.
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params.get(name).flatten()
    }

    /// A plugin-produced context object by type.
    pub fn context<T: Any>(&self) -> Option<&'a T> {
        self.context.get::<T>()
    }

    /// The match-all binding: the full original request path.
    pub fn match_all(&self) -> Option<&'a str> {
        self.match_all
    }
}

type CallbackFn = Box<dyn Fn(&CallArgs<'_>) -> Result<Response, DispatchError> + Send + Sync>;

/// A registered route handler: the function plus its declared parameter
/// slots.
pub struct Callback {
    params: Vec<ParamSpec>,
    func: CallbackFn,
}

impl Callback {
    /// A callback with no declared parameters.
    pub fn new<F, R>(func: F) -> Self
    where
        F: Fn(&CallArgs<'_>) -> Result<R, DispatchError> + Send + Sync + 'static,
        R: IntoResponse,
    {
        Self::with_params([], func)
    }

    /// A callback declaring its ordered parameter slots.
    pub fn with_params<P, F, R>(params: P, func: F) -> Self
    where
        P: IntoIterator<Item = ParamSpec>,
        F: Fn(&CallArgs<'_>) -> Result<R, DispatchError> + Send + Sync + 'static,
        R: IntoResponse,
    {
        Self {
            params: params.into_iter().collect(),
            func: Box::new(move |args| func(args).map(IntoResponse::into_response)),
        }
    }

    /// The declared parameter slots, in callback order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Invoke the callback against a resolved argument table.
    pub fn invoke(&self, args: &CallArgs<'_>) -> Result<Response, DispatchError> {
        (self.func)(args)
    }
}
