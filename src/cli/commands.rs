use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::hot_reload::watch_route_table;
use crate::logging::{init_logging_with_config, LogConfig};
use crate::path::clean_path;
use crate::route_table::{parse_method, RouteTable};
use crate::router::{RedirectKind, RouteOutcome, Router, SharedRouter};
use crate::runtime_config::RouterConfig;

/// Command-line interface for route tables
///
/// Loads YAML, TOML or JSON route tables, validates them and answers routing
/// questions without starting a server.
#[derive(Parser)]
#[command(name = "brrtrouter-radix")]
#[command(about = "Radix route table tools", long_about = None)]
pub struct Cli {
    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true, env = "BRRTR_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build the router from a route table and report the first problem
    Check {
        /// Route table file (.yaml, .yml, .toml or .json)
        #[arg(short, long)]
        table: PathBuf,
    },
    /// List the routes of a table
    Routes {
        /// Route table file (.yaml, .yml, .toml or .json)
        #[arg(short, long)]
        table: PathBuf,

        /// Print the radix tree structure instead of the route list
        #[arg(long, default_value_t = false)]
        tree: bool,
    },
    /// Route one request and print the outcome as JSON
    Match {
        /// Route table file (.yaml, .yml, .toml or .json)
        #[arg(short, long)]
        table: PathBuf,

        /// HTTP method of the request
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Raw request path
        path: String,
    },
    /// Print the canonical form of each path
    Clean {
        /// Paths to clean
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Watch a table and rebuild the router whenever it changes
    Watch {
        /// Route table file (.yaml, .yml, .toml or .json)
        #[arg(short, long)]
        table: PathBuf,
    },
}

/// Parse the process arguments, install logging and run the selected command
///
/// # Errors
///
/// Returns an error if:
/// - Logging cannot be initialized
/// - The route table cannot be read or parsed
/// - A route is malformed or conflicts with another
/// - The method given to `match` is invalid
/// - The watcher cannot be set up
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_config = LogConfig {
        log_level: cli.log_level.clone(),
        ..LogConfig::from_env()
    };
    init_logging_with_config(&log_config)?;

    let stdout = std::io::stdout();
    execute(&cli.command, &mut stdout.lock())
}

/// Run `command`, writing its output to `out`.
///
/// # Errors
///
/// See [`run_cli`].
pub fn execute<W: Write>(command: &Commands, out: &mut W) -> anyhow::Result<()> {
    let config = RouterConfig::from_env();
    match command {
        Commands::Check { table } => {
            let (_, router) = load(table, config)?;
            let methods: Vec<&str> = router.tree().methods().iter().map(|m| m.as_str()).collect();
            writeln!(
                out,
                "ok: {} routes ({} concrete) for {}",
                router.len(),
                router.tree().len(),
                methods.join(", ")
            )?;
        }
        Commands::Routes { table, tree } => {
            let (route_table, router) = load(table, config)?;
            if *tree {
                write!(out, "{}", router.tree().render())?;
            } else {
                for (info, entry) in router.routes().iter().zip(&route_table.routes) {
                    writeln!(out, "{:<7} {} -> {}", info.method.as_str(), info.pattern, entry.handler)?;
                }
            }
        }
        Commands::Match {
            table,
            method,
            path,
        } => {
            let (_, router) = load(table, config)?;
            let method = parse_method(method)?;
            let report = describe_match(&router, &method, path);
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        Commands::Clean { paths } => {
            for path in paths {
                writeln!(out, "{}", clean_path(path))?;
            }
        }
        Commands::Watch { table } => {
            let (_, router) = load(table, config)?;
            writeln!(out, "watching {} ({} routes)", table.display(), router.len())?;
            out.flush()?;
            let shared = Arc::new(SharedRouter::new(router));
            let _watcher = watch_route_table(table, shared, config, |router| {
                println!("reloaded: {} routes", router.len());
            })
            .with_context(|| format!("Failed to watch {}", table.display()))?;
            loop {
                std::thread::park();
            }
        }
    }
    Ok(())
}

fn load(table: &Path, config: RouterConfig) -> anyhow::Result<(RouteTable, Router<String>)> {
    let parsed = RouteTable::load(table)?;
    let router = parsed.build_router(config)?;
    Ok((parsed, router))
}

/// JSON description of how `router` handles `method path`.
pub(crate) fn describe_match(router: &Router<String>, method: &http::Method, path: &str) -> Value {
    let routed = router.lookup_with(method, path, ());
    let status = routed.outcome.status(method).map(|s| s.as_u16());
    let mut report = json!({
        "method": method.as_str(),
        "path": path,
    });
    let details = match routed.outcome {
        RouteOutcome::Matched(m) => {
            let params: Map<String, Value> = m
                .params
                .iter()
                .map(|(k, v)| (k.to_owned(), Value::from(v)))
                .collect();
            json!({
                "outcome": "matched",
                "handler": m.handler,
                "pattern": m.pattern,
                "params": params,
            })
        }
        RouteOutcome::Redirect { location, kind } => json!({
            "outcome": "redirect",
            "location": location,
            "kind": match kind {
                RedirectKind::TrailingSlash => "trailing_slash",
                RedirectKind::FixedPath => "fixed_path",
            },
            "status": status,
        }),
        RouteOutcome::MethodNotAllowed { allowed } => json!({
            "outcome": "method_not_allowed",
            "allowed": allowed.iter().map(http::Method::as_str).collect::<Vec<_>>(),
            "status": status,
        }),
        RouteOutcome::NotFound => json!({
            "outcome": "not_found",
            "status": status,
        }),
    };
    if let (Value::Object(report), Value::Object(details)) = (&mut report, details) {
        report.extend(details);
    }
    report
}
