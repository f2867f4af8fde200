//! # Hot Reload Module
//!
//! Rebuilds the router from a route-table file whenever the file changes and
//! publishes the result through a [`SharedRouter`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brrtrouter_radix::hot_reload::watch_route_table;
//! use brrtrouter_radix::route_table::load_router;
//! use brrtrouter_radix::router::SharedRouter;
//! use brrtrouter_radix::runtime_config::RouterConfig;
//! use std::sync::Arc;
//!
//! let config = RouterConfig::from_env();
//! let shared = Arc::new(SharedRouter::new(load_router("routes.yaml".as_ref(), config)?));
//!
//! // keep the watcher alive for as long as reloads are wanted
//! let _watcher = watch_route_table("routes.yaml", Arc::clone(&shared), config, |router| {
//!     println!("serving {} routes", router.len());
//! })?;
//! ```
//!
//! ## Reload Process
//!
//! 1. **Detection** - the filesystem watcher reports a modify or create event
//! 2. **Build** - the table is parsed and a complete new router is built off to the side
//! 3. **Publish** - the new router replaces the old one in a single atomic swap
//! 4. **Hook** - the callback sees the freshly published router
//!
//! Requests in flight keep the snapshot they loaded, so a lookup never observes
//! a half-built tree.
//!
//! ## Error Handling
//!
//! If the new table fails to parse or contains an invalid or conflicting route,
//! the error is logged and the previous router keeps serving.

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::route_table::load_router;
use crate::router::{Router, SharedRouter};
use crate::runtime_config::RouterConfig;

/// Rebuild the router from `table_path` once and publish it.
///
/// Returns the number of routes now being served.
///
/// # Errors
///
/// Any load or registration error; `shared` is left untouched in that case.
pub fn reload_route_table(
    table_path: &Path,
    shared: &SharedRouter<String>,
    config: RouterConfig,
) -> anyhow::Result<usize> {
    let router = load_router(table_path, config)?;
    let routes_count = router.len();
    shared.publish(router);
    Ok(routes_count)
}

/// Watch a route-table file and republish the router when it changes.
///
/// `on_reload` runs after every successful publish. Failed reloads are logged
/// and skipped.
///
/// # Errors
///
/// Fails if the watcher cannot be created or the path cannot be watched.
pub fn watch_route_table<P, F>(
    table_path: P,
    shared: Arc<SharedRouter<String>>,
    config: RouterConfig,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&Router<String>) + Send + 'static,
{
    let path: PathBuf = table_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                match reload_route_table(&watch_path, &shared, config) {
                    Ok(routes_count) => {
                        info!(
                            table = %watch_path.display(),
                            routes_count,
                            "hot-reload: route table applied"
                        );
                        on_reload(&shared.load());
                    }
                    Err(err) => {
                        warn!(
                            table = %watch_path.display(),
                            error = %format!("{err:#}"),
                            "hot-reload: keeping previous routes"
                        );
                    }
                }
            }
            Err(err) => warn!(error = %err, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    info!(table = %path.display(), "hot-reload: watching route table");
    Ok(watcher)
}
