use arc_swap::{ArcSwap, Guard};
use std::sync::Arc;
use tracing::info;

use super::Router;

/// Router snapshot shared between request workers and a reloader.
///
/// Readers take a lock-free snapshot with [`SharedRouter::load`]; a writer builds
/// a complete new [`Router`] and swaps it in with [`SharedRouter::publish`].
/// A snapshot stays valid for as long as a reader holds it, even across a publish.
pub struct SharedRouter<H> {
    current: ArcSwap<Router<H>>,
}

impl<H> SharedRouter<H> {
    /// Start serving `router`.
    #[must_use]
    pub fn new(router: Router<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    /// Cheap snapshot for a single lookup.
    #[inline]
    pub fn load(&self) -> Guard<Arc<Router<H>>> {
        self.current.load()
    }

    /// Owned snapshot that may outlive many publishes.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Router<H>> {
        self.current.load_full()
    }

    /// Replace the served router and return the previous one.
    pub fn publish(&self, router: Router<H>) -> Arc<Router<H>> {
        let routes_count = router.len();
        let previous = self.current.swap(Arc::new(router));
        info!(
            routes_count,
            previous_routes_count = previous.len(),
            "Router snapshot published"
        );
        previous
    }
}

impl<H> Default for SharedRouter<H> {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

impl<H> std::fmt::Debug for SharedRouter<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRouter")
            .field("routes_count", &self.current.load().len())
            .finish()
    }
}
