//! # Tree Module
//!
//! Byte-oriented radix tree keyed by concrete route patterns.
//!
//! ## Layout
//!
//! Every node owns a literal prefix (possibly empty) and up to three kinds of
//! continuation:
//!
//! - **static children** whose prefixes start with pairwise distinct bytes, so
//!   choosing one costs a single byte comparison
//! - **parameters**: regex-constrained ones in registration order followed by at
//!   most one plain parameter
//! - **a catch-all**, which excludes parameters at the same position
//!
//! Handlers live in per-method [`RouteEntry`](node::RouteEntry) slots. An entry
//! without a handler but with its `tsr` flag set records that the same path with
//! its trailing slash toggled is registered; lookup turns it into
//! [`Lookup::Redirect`].
//!
//! ## Matching
//!
//! [`Tree::lookup`] walks the tree iteratively and keeps a small stack of choice
//! points. A failed branch pops the stack, truncates the bindings made since and
//! tries the next alternative, so no state from an abandoned branch leaks into
//! the result.

mod insert;
mod lookup;
mod node;


use http::Method;

pub use lookup::{Lookup, Match, Params, MAX_INLINE_PARAMS};
use node::Node;

/// Radix tree mapping `(method, path)` to handlers of type `H`.
#[derive(Debug)]
pub struct Tree<H> {
    root: Node<H>,
    /// Methods with at least one route, in first-registration order
    methods: Vec<Method>,
    len: usize,
}

impl<H> Default for Tree<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Tree<H> {
    /// Empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            methods: Vec::new(),
            len: 0,
        }
    }

    /// Number of concrete routes inserted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Methods that have at least one route.
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Methods for which `path` resolves to a handler.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        self.methods
            .iter()
            .filter(|m| matches!(self.lookup(m, path), Lookup::Found(_)))
            .cloned()
            .collect()
    }

    /// Human readable dump of the node structure, one node per line.
    ///
    /// Placeholders created for trailing-slash redirects are shown as `METHOD(tsr)`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.root.render_into(&mut out, 0);
        out
    }
}
