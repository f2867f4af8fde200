//! # Router Module
//!
//! Method-aware facade over the radix [`Tree`](crate::tree::Tree).
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Cleaning, compiling and expanding route patterns at registration time
//! - Rejecting malformed or ambiguous registrations with a [`RouteError`](crate::error::RouteError)
//! - Matching request paths and capturing parameters without allocating
//! - Turning near misses into redirects or `405 Method Not Allowed` outcomes
//!
//! ## Example
//!
//! ```rust
//! use brrtrouter_radix::router::{RouteOutcome, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.get("/files/*filepath", "serve_file").unwrap();
//! router.get("/users/:id([0-9]+)", "show_user").unwrap();
//!
//! let routed = router.lookup_with(&Method::GET, "/users/7", "req-1");
//! assert_eq!(routed.context, "req-1");
//! match routed.outcome {
//!     RouteOutcome::Matched(m) => assert_eq!(m.params.get("id"), Some("7")),
//!     other => panic!("unexpected outcome {other:?}"),
//! }
//!
//! // "/files" is one trailing slash away from the catch-all route
//! let routed = router.lookup_with(&Method::GET, "/files", ());
//! assert!(matches!(routed.outcome, RouteOutcome::Redirect { ref location, .. } if location == "/files/"));
//! ```
//!
//! ## Publication
//!
//! A built [`Router`] is immutable during lookups. Servers that reload routes
//! share it through [`SharedRouter`], which swaps whole snapshots atomically.

mod core;
mod group;
mod outcome;
mod shared;
#[cfg(test)]
mod tests;

pub use core::{RouteInfo, Router};
pub use group::RouteGroup;
pub use outcome::{RedirectKind, RouteOutcome, Routed};
pub use shared::SharedRouter;
