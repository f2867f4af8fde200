use http::Method;

use super::Router;
use crate::error::RouteError;

/// Registers routes under a common prefix.
///
/// ```rust
/// use brrtrouter_radix::router::Router;
///
/// let mut router = Router::new();
/// let mut api = router.group("/api/v1");
/// api.get("/users", "list_users").unwrap();
/// api.group("/admin").post("/flush", "flush").unwrap();
///
/// let patterns: Vec<&str> = router.routes().iter().map(|r| &*r.pattern).collect();
/// assert_eq!(patterns, ["/api/v1/users", "/api/v1/admin/flush"]);
/// ```
pub struct RouteGroup<'a, H> {
    router: &'a mut Router<H>,
    prefix: String,
}

impl<'a, H> RouteGroup<'a, H> {
    pub(super) fn new(router: &'a mut Router<H>, prefix: &str) -> Self {
        Self {
            router,
            prefix: prefix.trim_end_matches('/').to_owned(),
        }
    }

    /// Prefix applied to every pattern.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Nested group; prefixes concatenate.
    pub fn group(&mut self, prefix: &str) -> RouteGroup<'_, H> {
        let joined = format!("{}{prefix}", self.prefix);
        RouteGroup::new(&mut *self.router, &joined)
    }

    /// [`Router::handle`] with the group prefix prepended.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn handle(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouteError> {
        let full = format!("{}{pattern}", self.prefix);
        self.router.handle(method, &full, handler)
    }

    /// `GET` route under the prefix.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn get(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::GET, pattern, handler)
    }

    /// `POST` route under the prefix.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn post(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::POST, pattern, handler)
    }

    /// `PUT` route under the prefix.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn put(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::PUT, pattern, handler)
    }

    /// `PATCH` route under the prefix.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn patch(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::PATCH, pattern, handler)
    }

    /// `DELETE` route under the prefix.
    ///
    /// # Errors
    ///
    /// See [`Router::handle`].
    pub fn delete(&mut self, pattern: &str, handler: H) -> Result<(), RouteError> {
        self.handle(Method::DELETE, pattern, handler)
    }
}
