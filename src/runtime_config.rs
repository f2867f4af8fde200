//! # Runtime Configuration Module
//!
//! Environment-variable configuration for the router's request-time behaviour.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_REDIRECT_TRAILING_SLASH`
//!
//! When a path misses only because of its trailing slash (`/foo/` registered,
//! `/foo` requested, or the reverse), answer with a redirect to the other form.
//!
//! Default: `true`
//!
//! ### `BRRTR_REDIRECT_FIXED_PATH`
//!
//! When the request path is not canonical (`//foo/./bar`), redirect to the cleaned
//! path if that path has a route.
//!
//! Default: `true`
//!
//! ### `BRRTR_HANDLE_METHOD_NOT_ALLOWED`
//!
//! When no route matches the method but other methods are registered for the path,
//! report them instead of a plain not-found.
//!
//! Default: `true`
//!
//! ### `BRRTR_CLEAN_POOL_SIZE`
//!
//! Idle buffers retained by the path-cleaning free-list. Accepts decimal (`64`) or
//! hexadecimal (`0x40`). `0` allocates a fresh buffer for every non-canonical path.
//! The pool is process-wide and sized once, on first use, so this setting is read
//! through [`clean_pool_size_from_env`] and is not part of [`RouterConfig`].
//!
//! Default: `64`
//!
//! ## Usage
//!
//! ```rust
//! use brrtrouter_radix::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("trailing slash redirects: {}", config.redirect_trailing_slash);
//! ```

use std::env;

/// Default idle-buffer count for the path-cleaning pool.
pub const DEFAULT_CLEAN_POOL_SIZE: usize = 64;

/// Per-router behaviour switches loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Redirect when only the trailing slash differs
    pub redirect_trailing_slash: bool,
    /// Redirect non-canonical paths to their cleaned form
    pub redirect_fixed_path: bool,
    /// Report allowed methods when only the method misses
    pub handle_method_not_allowed: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            redirect_trailing_slash: true,
            redirect_fixed_path: true,
            handle_method_not_allowed: true,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|v| parse_bool(&v))
                .unwrap_or(default)
        };

        RouterConfig {
            redirect_trailing_slash: flag(
                "BRRTR_REDIRECT_TRAILING_SLASH",
                defaults.redirect_trailing_slash,
            ),
            redirect_fixed_path: flag("BRRTR_REDIRECT_FIXED_PATH", defaults.redirect_fixed_path),
            handle_method_not_allowed: flag(
                "BRRTR_HANDLE_METHOD_NOT_ALLOWED",
                defaults.handle_method_not_allowed,
            ),
        }
    }
}

/// Idle-buffer count for the path-cleaning pool, from `BRRTR_CLEAN_POOL_SIZE`.
#[must_use]
pub fn clean_pool_size_from_env() -> usize {
    clean_pool_size_from_lookup(|key| env::var(key).ok())
}

/// Idle-buffer count for the path-cleaning pool through an arbitrary key lookup.
pub fn clean_pool_size_from_lookup<F>(lookup: F) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    lookup("BRRTR_CLEAN_POOL_SIZE")
        .and_then(|v| parse_size(&v))
        .unwrap_or(DEFAULT_CLEAN_POOL_SIZE)
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}
