//! # BRRTRouter Radix
//!
//! The route-matching core of BRRTRouter: a compressed radix tree that maps an
//! HTTP method and request path to a handler plus the parameters captured from the
//! path.
//!
//! ## Architecture
//!
//! - **[`path`]** - canonicalization of URL paths with a pooled, allocation-free fast path
//! - **[`pattern`]** - parsing of route patterns (`:name`, `:name(regex)`, `:name?`, `*name`)
//! - **[`tree`]** - the radix tree: conflict-checked insertion and backtracking lookup
//! - **[`router`]** - method-aware facade with redirects, `405` reporting and hot-swappable snapshots
//! - **[`route_table`]** - YAML, TOML or JSON route tables
//! - **[`hot_reload`]** - rebuild and republish the router when a route table changes
//! - **[`runtime_config`]** - `BRRTR_*` environment switches
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `brrtrouter-radix` command-line tool
//!
//! ## Matching Order
//!
//! At every node the lookup tries, in order:
//! 1. static children (longest shared prefix first)
//! 2. constrained parameters, in registration order
//! 3. the plain parameter
//! 4. the catch-all
//!
//! When a branch dead-ends the lookup backtracks to the most recent untried
//! alternative, discarding any parameters bound on the abandoned branch.
//!
//! ## Example
//!
//! ```rust
//! use brrtrouter_radix::{Lookup, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.get("/users/:id([0-9]+)", "show_user").unwrap();
//! router.get("/users/:name", "show_user_by_name").unwrap();
//! router.get("/users/new", "new_user_form").unwrap();
//!
//! let m = router.lookup(&Method::GET, "/users/42").found().unwrap();
//! assert_eq!(*m.handler, "show_user");
//! assert_eq!(m.params.get("id"), Some("42"));
//!
//! let m = router.lookup(&Method::GET, "/users/alice").found().unwrap();
//! assert_eq!(*m.handler, "show_user_by_name");
//!
//! assert!(matches!(router.lookup(&Method::GET, "/users/new/"), Lookup::Redirect));
//! ```

pub mod cli;
pub mod error;
pub mod hot_reload;
pub mod logging;
pub mod path;
pub mod pattern;
pub mod route_table;
pub mod router;
pub mod runtime_config;
pub mod tree;

pub use error::{ConflictError, PatternError, RouteError};
pub use path::clean_path;
pub use pattern::compile;
pub use router::{RouteOutcome, Router, SharedRouter};
pub use runtime_config::RouterConfig;
pub use tree::{Lookup, Match, Params};
