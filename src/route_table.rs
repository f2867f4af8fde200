//! # Route Table Module
//!
//! Declarative route lists loaded from YAML, TOML or JSON files.
//!
//! ```yaml
//! routes:
//!   - method: GET
//!     path: /users/:id([0-9]+)
//!     handler: show_user
//!   - method: GET
//!     path: /static/*filepath
//!     handler: serve_static
//! ```
//!
//! The same document in TOML uses `[[routes]]` tables. Handlers are plain names;
//! the application maps them to callables after routing.

use anyhow::Context;
use http::Method;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::router::Router;
use crate::runtime_config::RouterConfig;

/// One entry of a route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    /// HTTP method, case-insensitive
    pub method: String,
    /// Route pattern
    pub path: String,
    /// Handler name stored as the route's handler
    pub handler: String,
}

/// A list of routes as written in a table file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    /// Routes in registration order
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

/// Serialization format of a table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl TableFormat {
    /// Format implied by the file extension.
    ///
    /// # Errors
    ///
    /// Fails for missing or unknown extensions.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(TableFormat::Yaml),
            Some("toml") => Ok(TableFormat::Toml),
            Some("json") => Ok(TableFormat::Json),
            _ => anyhow::bail!(
                "Unsupported route table format: {} (expected .yaml, .yml, .toml or .json)",
                path.display()
            ),
        }
    }
}

impl RouteTable {
    /// Parse a table from text.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error for malformed documents.
    pub fn parse(text: &str, format: TableFormat) -> anyhow::Result<Self> {
        let table = match format {
            TableFormat::Yaml => serde_yaml::from_str(text)?,
            TableFormat::Toml => toml::from_str(text)?,
            TableFormat::Json => serde_json::from_str(text)?,
        };
        Ok(table)
    }

    /// Read and parse a table file; the format follows the extension.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, has an unknown extension or does not parse.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let format = TableFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route table: {}", path.display()))?;
        Self::parse(&content, format)
            .with_context(|| format!("Failed to parse route table: {}", path.display()))
    }

    /// Register every route in table order.
    ///
    /// # Errors
    ///
    /// Stops at the first unknown method, malformed pattern or conflict and names
    /// the offending entry.
    pub fn build_router(&self, config: RouterConfig) -> anyhow::Result<Router<String>> {
        let mut router = Router::with_config(config);
        for (idx, route) in self.routes.iter().enumerate() {
            let method = parse_method(&route.method)
                .with_context(|| format!("Route #{idx} ({} {})", route.method, route.path))?;
            router
                .handle(method, &route.path, route.handler.clone())
                .with_context(|| format!("Route #{idx} ({} {})", route.method, route.path))?;
        }

        let routes_summary: Vec<String> = router
            .routes()
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.method, r.pattern))
            .collect();
        info!(
            routes_count = router.len(),
            routes_summary = ?routes_summary,
            routing_algorithm = "radix_tree",
            "Routing table loaded"
        );
        Ok(router)
    }
}

/// Load `path` and build a router from it.
///
/// # Errors
///
/// See [`RouteTable::load`] and [`RouteTable::build_router`].
pub fn load_router(path: &Path, config: RouterConfig) -> anyhow::Result<Router<String>> {
    RouteTable::load(path)?.build_router(config)
}

/// Parse an HTTP method name, accepting any letter case.
///
/// # Errors
///
/// Fails for empty names and names with characters not allowed in a method token.
pub fn parse_method(name: &str) -> anyhow::Result<Method> {
    let upper = name.trim().to_ascii_uppercase();
    if upper.is_empty() {
        anyhow::bail!("Empty HTTP method");
    }
    Method::from_bytes(upper.as_bytes()).with_context(|| format!("Invalid HTTP method: {name}"))
}
