use http::Method;
use smallvec::SmallVec;

use super::node::{Node, RouteEntry, Wildcard};
use super::Tree;

/// Maximum number of parameters captured before the binding list spills to the heap.
/// Most APIs bind at most four segments (`/users/:id/posts/:post`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Choice points kept inline; deeper backtracking spills to the heap.
const INLINE_CHOICES: usize = 8;

/// Parameter bindings of one match, in left-to-right path order.
///
/// Names borrow from the tree (`'r`), values from the looked-up path (`'p`);
/// nothing is copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'r, 'p> {
    inner: SmallVec<[(&'r str, &'p str); MAX_INLINE_PARAMS]>,
}

impl<'r, 'p> Params<'r, 'p> {
    /// Empty binding list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SmallVec::new(),
        }
    }

    /// Value bound to `name`.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'p str> {
        self.inner
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// Bindings in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&'r str, &'p str)> + '_ {
        self.inner.iter().copied()
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// `true` when nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// `true` once the bindings no longer fit inline.
    #[must_use]
    pub fn spilled(&self) -> bool {
        self.inner.spilled()
    }

    fn push(&mut self, name: &'r str, value: &'p str) {
        self.inner.push((name, value));
    }

    fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }
}

impl<'r, 'p> IntoIterator for Params<'r, 'p> {
    type Item = (&'r str, &'p str);
    type IntoIter = smallvec::IntoIter<[(&'r str, &'p str); MAX_INLINE_PARAMS]>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Successful lookup.
#[derive(Debug)]
pub struct Match<'r, 'p, H> {
    /// Handler registered for the route
    pub handler: &'r H,
    /// Captured parameters
    pub params: Params<'r, 'p>,
    /// Pattern the route was registered with
    pub pattern: &'r str,
}

/// Outcome of [`Tree::lookup`].
#[derive(Debug)]
pub enum Lookup<'r, 'p, H> {
    /// A route matched
    Found(Match<'r, 'p, H>),
    /// No route matched, but one does with the trailing slash toggled
    Redirect,
    /// Nothing matched
    Miss,
}

impl<'r, 'p, H> Lookup<'r, 'p, H> {
    /// The match, if any.
    #[must_use]
    pub fn found(self) -> Option<Match<'r, 'p, H>> {
        match self {
            Lookup::Found(m) => Some(m),
            Lookup::Redirect | Lookup::Miss => None,
        }
    }

    /// `true` for [`Lookup::Redirect`].
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Lookup::Redirect)
    }

    /// `true` for [`Lookup::Miss`].
    #[must_use]
    pub fn is_miss(&self) -> bool {
        matches!(self, Lookup::Miss)
    }
}

/// Node to revisit after a deeper branch fails.
struct Choice<'r, H> {
    node: &'r Node<H>,
    pos: usize,
    bindings: usize,
    /// Index of the next wildcard alternative to try
    next: usize,
}

impl<H> Tree<H> {
    /// Match `path` for `method`.
    ///
    /// Static edges are preferred, then constrained parameters in registration
    /// order, then the plain parameter, then the catch-all. When a branch dead-ends
    /// the walk resumes at the last choice point with the next alternative and
    /// discards the bindings made after it. Allocation free unless more than
    /// [`MAX_INLINE_PARAMS`] parameters are captured.
    ///
    /// `path` is expected to be clean (see [`clean_path`](crate::path::clean_path)).
    pub fn lookup<'r, 'p>(&'r self, method: &Method, path: &'p str) -> Lookup<'r, 'p, H> {
        let bytes = path.as_bytes();
        let mut params = Params::new();
        let mut choices: SmallVec<[Choice<'r, H>; INLINE_CHOICES]> = SmallVec::new();
        let mut tsr = false;

        let mut node = &self.root;
        let mut pos = 0;
        // `Some(i)`: resume the wildcard alternatives of `node` at index `i`
        let mut resume: Option<usize> = None;

        loop {
            let start = match resume.take() {
                Some(start) => start,
                None if pos == bytes.len() => {
                    if let Some(entry) = node.entry(method) {
                        if let Some((handler, pattern)) = entry.target() {
                            return Lookup::Found(Match {
                                handler,
                                params,
                                pattern,
                            });
                        }
                        tsr |= entry.tsr;
                    }
                    // a catch-all also matches an empty remainder
                    if let Some(Wildcard::CatchAll(child)) = &node.wildcard {
                        if let Some((handler, pattern)) = child.entry(method).and_then(|e| e.target()) {
                            params.push(child.param_name(), "");
                            return Lookup::Found(Match {
                                handler,
                                params,
                                pattern,
                            });
                        }
                    }
                    usize::MAX
                }
                None => {
                    if let Some(child) = node.static_child(bytes[pos]) {
                        if bytes[pos..].starts_with(&child.prefix) {
                            if node.wildcard.is_some() {
                                choices.push(Choice {
                                    node,
                                    pos,
                                    bindings: params.len(),
                                    next: 0,
                                });
                            }
                            node = child;
                            pos += child.prefix.len();
                            continue;
                        }
                    }
                    0
                }
            };

            match &node.wildcard {
                Some(Wildcard::Params(candidates)) if start < candidates.len() => {
                    let end = bytes[pos..]
                        .iter()
                        .position(|&b| b == b'/')
                        .map_or(bytes.len(), |i| pos + i);
                    let segment = path.get(pos..end).filter(|s| !s.is_empty());
                    let next = segment.and_then(|value| {
                        candidates[start..]
                            .iter()
                            .position(|c| c.constraint().map_or(true, |re| re.test(value)))
                            .map(|i| (start + i, value))
                    });
                    if let Some((idx, value)) = next {
                        if idx + 1 < candidates.len() {
                            choices.push(Choice {
                                node,
                                pos,
                                bindings: params.len(),
                                next: idx + 1,
                            });
                        }
                        let child = &candidates[idx];
                        params.push(child.param_name(), value);
                        node = child;
                        pos = end;
                        continue;
                    }
                }
                Some(Wildcard::CatchAll(child)) if start == 0 => {
                    let target = child.entry(method).and_then(|e| e.target());
                    if let (Some((handler, pattern)), Some(rest)) = (target, path.get(pos..)) {
                        params.push(child.param_name(), rest);
                        return Lookup::Found(Match {
                            handler,
                            params,
                            pattern,
                        });
                    }
                }
                _ => {}
            }

            // backtrack
            match choices.pop() {
                Some(choice) => {
                    params.truncate(choice.bindings);
                    node = choice.node;
                    pos = choice.pos;
                    resume = Some(choice.next);
                }
                None if tsr => return Lookup::Redirect,
                None => return Lookup::Miss,
            }
        }
    }
}

impl<H> RouteEntry<H> {
    /// Handler and registered pattern, `None` for trailing-slash placeholders.
    #[inline]
    fn target(&self) -> Option<(&H, &str)> {
        Some((self.handler.as_deref()?, self.pattern.as_deref()?))
    }
}
