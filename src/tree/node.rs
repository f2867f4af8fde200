use http::Method;
use smallvec::SmallVec;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::pattern::Constraint;

/// What a node's edge contributes to the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Root,
    Static,
    Param {
        name: Arc<str>,
        constraint: Option<Constraint>,
    },
    CatchAll {
        name: Arc<str>,
    },
}

/// Per-method data stored at a node.
///
/// `handler == None` with `tsr == true` marks a position that exists only because
/// the same route with the trailing slash toggled is registered.
#[derive(Debug)]
pub(crate) struct RouteEntry<H> {
    pub(crate) handler: Option<Arc<H>>,
    /// A variant of this path differing only by its trailing `/` is registered
    pub(crate) tsr: bool,
    /// Pattern as the caller registered it (before optional expansion)
    pub(crate) pattern: Option<Arc<str>>,
}

impl<H> RouteEntry<H> {
    fn placeholder() -> Self {
        Self {
            handler: None,
            tsr: false,
            pattern: None,
        }
    }
}

/// Wildcard continuation of a node: parameters or one catch-all, never both.
#[derive(Debug)]
pub(crate) enum Wildcard<H> {
    /// Constrained parameters first (registration order), the plain one last
    Params(Vec<Node<H>>),
    CatchAll(Box<Node<H>>),
}

/// One edge of the radix tree.
#[derive(Debug)]
pub(crate) struct Node<H> {
    /// Literal bytes of a static edge; empty for root and wildcard nodes
    pub(crate) prefix: Vec<u8>,
    pub(crate) kind: NodeKind,
    /// Static children, pairwise distinct first byte
    pub(crate) children: Vec<Node<H>>,
    pub(crate) wildcard: Option<Wildcard<H>>,
    /// Method set per node is tiny; linear scan beats hashing
    pub(crate) routes: SmallVec<[(Method, RouteEntry<H>); 2]>,
}

impl<H> Node<H> {
    pub(crate) fn root() -> Self {
        Self::with_kind(Vec::new(), NodeKind::Root)
    }

    pub(crate) fn new_static(prefix: Vec<u8>) -> Self {
        Self::with_kind(prefix, NodeKind::Static)
    }

    pub(crate) fn new_param(name: Arc<str>, constraint: Option<Constraint>) -> Self {
        Self::with_kind(Vec::new(), NodeKind::Param { name, constraint })
    }

    pub(crate) fn new_catch_all(name: Arc<str>) -> Self {
        Self::with_kind(Vec::new(), NodeKind::CatchAll { name })
    }

    fn with_kind(prefix: Vec<u8>, kind: NodeKind) -> Self {
        Self {
            prefix,
            kind,
            children: Vec::new(),
            wildcard: None,
            routes: SmallVec::new(),
        }
    }

    /// Bound name of a wildcard node.
    pub(crate) fn param_name(&self) -> &str {
        match &self.kind {
            NodeKind::Param { name, .. } | NodeKind::CatchAll { name } => name,
            NodeKind::Root | NodeKind::Static => "",
        }
    }

    pub(crate) fn constraint(&self) -> Option<&Constraint> {
        match &self.kind {
            NodeKind::Param { constraint, .. } => constraint.as_ref(),
            _ => None,
        }
    }

    /// Wildcard as it would be written in a pattern.
    pub(crate) fn describe(&self) -> String {
        match &self.kind {
            NodeKind::Param {
                name,
                constraint: Some(c),
            } => format!(":{name}({})", c.source()),
            NodeKind::Param { name, .. } => format!(":{name}"),
            NodeKind::CatchAll { name } => format!("*{name}"),
            NodeKind::Root | NodeKind::Static => String::from_utf8_lossy(&self.prefix).into_owned(),
        }
    }

    #[inline]
    pub(crate) fn entry(&self, method: &Method) -> Option<&RouteEntry<H>> {
        self.routes
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, entry)| entry)
    }

    pub(crate) fn entry_or_placeholder(&mut self, method: &Method) -> &mut RouteEntry<H> {
        let idx = match self.routes.iter().position(|(m, _)| m == method) {
            Some(idx) => idx,
            None => {
                self.routes
                    .push((method.clone(), RouteEntry::placeholder()));
                self.routes.len() - 1
            }
        };
        &mut self.routes[idx].1
    }

    /// Static child whose prefix starts with `byte`.
    #[inline]
    pub(crate) fn static_child(&self, byte: u8) -> Option<&Node<H>> {
        self.children.iter().find(|c| c.prefix.first() == Some(&byte))
    }

    /// Move everything after `at` into a new child, keeping `prefix[..at]` here.
    pub(crate) fn split_at(&mut self, at: usize) {
        let tail = Node {
            prefix: self.prefix.split_off(at),
            kind: NodeKind::Static,
            children: std::mem::take(&mut self.children),
            wildcard: self.wildcard.take(),
            routes: std::mem::take(&mut self.routes),
        };
        self.children.push(tail);
    }

    /// Indented dump of the subtree, one node per line.
    pub(crate) fn render_into(&self, out: &mut String, depth: usize) {
        let methods: Vec<String> = self
            .routes
            .iter()
            .map(|(m, e)| match (&e.handler, e.tsr) {
                (Some(_), true) => format!("{m}+tsr"),
                (Some(_), false) => m.to_string(),
                (None, _) => format!("{m}(tsr)"),
            })
            .collect();
        let label = match self.kind {
            NodeKind::Root => "<root>".to_owned(),
            _ => self.describe(),
        };
        let _ = if methods.is_empty() {
            writeln!(out, "{:indent$}{label}", "", indent = depth * 2)
        } else {
            writeln!(
                out,
                "{:indent$}{label} [{}]",
                "",
                methods.join(", "),
                indent = depth * 2
            )
        };

        for child in &self.children {
            child.render_into(out, depth + 1);
        }
        match &self.wildcard {
            Some(Wildcard::Params(params)) => {
                for p in params {
                    p.render_into(out, depth + 1);
                }
            }
            Some(Wildcard::CatchAll(node)) => node.render_into(out, depth + 1),
            None => {}
        }
    }
}

/// Length of the shared leading byte run.
#[inline]
pub(crate) fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
