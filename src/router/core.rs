//! Router core module - hot path for request routing.
//!
//! Registration compiles and expands patterns and may allocate freely; the
//! lookup side only allocates to build redirect locations and `Allow` lists.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

use super::group::RouteGroup;
use super::outcome::{RedirectKind, RouteOutcome, Routed};
use crate::error::RouteError;
use crate::path::clean_path;
use crate::pattern::compile;
use crate::runtime_config::RouterConfig;
use crate::tree::{Lookup, Tree};

/// A registered route, as the caller wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// HTTP method
    pub method: Method,
    /// Cleaned pattern, optional markers included
    pub pattern: Arc<str>,
}

/// Method-aware router over one radix tree.
///
/// `H` is whatever the surrounding server dispatches to: a function pointer, a
/// boxed closure, a handler name. The router never calls it.
///
/// # Example
///
/// ```rust
/// use brrtrouter_radix::router::Router;
/// use http::Method;
///
/// let mut router = Router::new();
/// router.get("/users/:id", "show_user").unwrap();
///
/// let m = router.lookup(&Method::GET, "/users/42").found().unwrap();
/// assert_eq!(*m.handler, "show_user");
/// assert_eq!(m.params.get("id"), Some("42"));
/// ```
#[derive(Debug)]
pub struct Router<H> {
    tree: Tree<H>,
    routes: Vec<RouteInfo>,
    config: RouterConfig,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Router with the default [`RouterConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Router with explicit redirect and method-not-allowed behaviour.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            tree: Tree::new(),
            routes: Vec::new(),
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Underlying tree.
    #[must_use]
    pub fn tree(&self) -> &Tree<H> {
        &self.tree
    }

    /// Registered routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    /// Number of registered routes (before optional expansion).
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// `true` when no route is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Register `handler` for `method` and `pattern`.
    ///
    /// The pattern is cleaned, compiled and expanded; every concrete form is
    /// checked before any is inserted, so a failed registration changes nothing.
    ///
    /// # Errors
    ///
    /// [`RouteError::Pattern`] for malformed patterns, [`RouteError::Conflict`]
    /// when the route is ambiguous with an existing one.
    pub fn handle(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouteError> {
        let cleaned = clean_path(pattern);
        match self.register(&method, &cleaned, handler) {
            Ok(expansions) => {
                info!(
                    method = %method,
                    route_pattern = %cleaned,
                    expansions,
                    routes_count = self.routes.len(),
                    "Route registered"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    method = %method,
                    route_pattern = %pattern,
                    error = %err,
                    "Route registration rejected"
                );
                Err(err)
            }
        }
    }

    fn register(&mut self, method: &Method, pattern: &str, handler: H) -> Result<usize, RouteError> {
        let concrete = compile(pattern)?.expand()?;
        for c in &concrete {
            self.tree.check(method, c)?;
        }

        let handler = Arc::new(handler);
        let pattern: Arc<str> = Arc::from(pattern);
        for c in &concrete {
            self.tree
                .insert(method.clone(), c, Arc::clone(&handler), Arc::clone(&pattern))?;
        }
        self.routes.push(RouteInfo {
            method: method.clone(),
            pattern,
        });
        Ok(concrete.len())
    }

    /// Shorthand for [`Router::handle`] with `GET`.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn get(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::GET, pattern, handler)
    }

    /// Shorthand for [`Router::handle`] with `POST`.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn post(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::POST, pattern, handler)
    }

    /// Shorthand for [`Router::handle`] with `PUT`.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn put(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::PUT, pattern, handler)
    }

    /// Shorthand for [`Router::handle`] with `PATCH`.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn patch(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::PATCH, pattern, handler)
    }

    /// Shorthand for [`Router::handle`] with `DELETE`.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn delete(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::DELETE, pattern, handler)
    }

    /// Shorthand for [`Router::handle`] with `HEAD`.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn head(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::HEAD, pattern, handler)
    }

    /// Shorthand for [`Router::handle`] with `OPTIONS`.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn options(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::OPTIONS, pattern, handler)
    }

    /// Registration helper that prefixes every pattern with `prefix`.
    pub fn group(&mut self, prefix: &str) -> RouteGroup<'_, H> {
        RouteGroup::new(self, prefix)
    }

    /// Match an already clean `path`.
    #[inline]
    pub fn lookup<'r, 'p>(&'r self, method: &Method, path: &'p str) -> Lookup<'r, 'p, H> {
        trace!(method = %method, path = %path, "Route match attempt");
        self.tree.lookup(method, path)
    }

    /// Methods with a real route for `path`.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        self.tree.allowed_methods(path)
    }

    /// Route a raw request path, handing `context` back with the outcome.
    ///
    /// Canonical paths are matched directly. A non-canonical path is never
    /// matched; when its cleaned form resolves, a [`RedirectKind::FixedPath`]
    /// redirect is returned instead (if enabled). A trailing-slash hint becomes a
    /// [`RedirectKind::TrailingSlash`] redirect (if enabled). Otherwise a path
    /// served under other methods yields
    /// [`RouteOutcome::MethodNotAllowed`] (if enabled).
    pub fn lookup_with<'r, 'p, C>(
        &'r self,
        method: &Method,
        path: &'p str,
        context: C,
    ) -> Routed<'r, 'p, H, C> {
        let outcome = match clean_path(path) {
            Cow::Borrowed(clean) => self.route_clean(method, clean),
            Cow::Owned(cleaned) => self.route_unclean(method, path, cleaned),
        };
        Routed { context, outcome }
    }

    fn route_clean<'r, 'p>(&'r self, method: &Method, path: &'p str) -> RouteOutcome<'r, 'p, H> {
        match self.lookup(method, path) {
            Lookup::Found(m) => RouteOutcome::Matched(m),
            Lookup::Redirect if self.config.redirect_trailing_slash => {
                let location = toggle_trailing_slash(path);
                debug!(
                    method = %method,
                    path = %path,
                    location = %location,
                    "Trailing slash redirect"
                );
                RouteOutcome::Redirect {
                    location,
                    kind: RedirectKind::TrailingSlash,
                }
            }
            Lookup::Redirect | Lookup::Miss => self.unmatched(method, path),
        }
    }

    fn route_unclean<'r, 'p>(
        &'r self,
        method: &Method,
        raw: &str,
        cleaned: String,
    ) -> RouteOutcome<'r, 'p, H> {
        if self.config.redirect_fixed_path
            && matches!(self.tree.lookup(method, &cleaned), Lookup::Found(_))
        {
            debug!(
                method = %method,
                path = %raw,
                location = %cleaned,
                "Fixed path redirect"
            );
            return RouteOutcome::Redirect {
                location: cleaned,
                kind: RedirectKind::FixedPath,
            };
        }
        self.unmatched(method, &cleaned)
    }

    fn unmatched<'r, 'p>(&'r self, method: &Method, path: &str) -> RouteOutcome<'r, 'p, H> {
        if self.config.handle_method_not_allowed {
            let mut allowed = self.allowed_methods(path);
            allowed.retain(|m| m != method);
            if !allowed.is_empty() {
                debug!(method = %method, path = %path, allowed = ?allowed, "Method not allowed");
                return RouteOutcome::MethodNotAllowed { allowed };
            }
        }
        debug!(method = %method, path = %path, "No route matched");
        RouteOutcome::NotFound
    }
}

/// `path` with its trailing slash removed, or added when absent.
fn toggle_trailing_slash(path: &str) -> String {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped.to_owned(),
        _ => {
            let mut location = String::with_capacity(path.len() + 1);
            location.push_str(path);
            location.push('/');
            location
        }
    }
}
