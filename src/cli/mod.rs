//! # CLI Module
//!
//! Command-line tools for route tables: validate a table, list its routes, route a
//! single request and clean paths.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Build the router and fail on the first malformed or conflicting route:
//!
//! ```bash
//! brrtrouter-radix check --table routes.yaml
//! ```
//!
//! ### `routes`
//!
//! List the registered routes, or dump the radix tree with `--tree`:
//!
//! ```bash
//! brrtrouter-radix routes --table routes.yaml --tree
//! ```
//!
//! ### `match`
//!
//! Route one request and print the outcome as JSON:
//!
//! ```bash
//! brrtrouter-radix match --table routes.yaml --method POST /users/42/
//! ```
//!
//! ### `clean`
//!
//! ```bash
//! brrtrouter-radix clean '//a/./b/../c'
//! ```
//!
//! ### `watch`
//!
//! Rebuild the router whenever the table file changes:
//!
//! ```bash
//! brrtrouter-radix watch --table routes.yaml
//! ```
//!
//! Logs go to stderr and follow the `BRRTR_LOG_*` variables; command output goes
//! to stdout.

mod commands;


pub use commands::{execute, run_cli, Cli, Commands};
