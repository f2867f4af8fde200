use http::Method;
use std::sync::Arc;

use super::node::{common_prefix_len, Node, Wildcard};
use super::Tree;
use crate::error::ConflictError;
use crate::pattern::{ConcretePattern, Constraint, Piece};

impl<H> Tree<H> {
    /// Report the conflict [`Tree::insert`] would hit, without modifying the tree.
    ///
    /// # Errors
    ///
    /// The same errors as [`Tree::insert`].
    pub fn check(&self, method: &Method, concrete: &ConcretePattern) -> Result<(), ConflictError> {
        self.root.probe(&concrete.pieces, method, &concrete.path)
    }

    /// Insert one concrete pattern for `method`.
    ///
    /// All conflicts are detected before the tree is modified, so a failed insert
    /// leaves it exactly as it was. On success the route with its trailing slash
    /// toggled is marked so that lookup can report a redirect instead of a miss.
    ///
    /// # Errors
    ///
    /// - [`ConflictError::DuplicateRoute`] if `(method, concrete.path)` already has a handler
    /// - [`ConflictError::WildcardConflict`] if a different wildcard occupies a position
    ///   this pattern needs
    pub fn insert(
        &mut self,
        method: Method,
        concrete: &ConcretePattern,
        handler: Arc<H>,
        pattern: Arc<str>,
    ) -> Result<(), ConflictError> {
        let path = concrete.path.as_str();
        self.root.probe(&concrete.pieces, &method, path)?;

        let toggled = toggle_trailing_slash(&concrete.pieces);
        let variant_exists = match &toggled {
            Some(pieces) => {
                let node = self.root.descend(pieces, path)?;
                let entry = node.entry_or_placeholder(&method);
                entry.tsr = true;
                entry.handler.is_some()
            }
            None => false,
        };

        let node = self.root.descend(&concrete.pieces, path)?;
        let entry = node.entry_or_placeholder(&method);
        entry.handler = Some(handler);
        entry.pattern = Some(pattern);
        entry.tsr |= variant_exists;

        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self.len += 1;
        Ok(())
    }
}

impl<H> Node<H> {
    /// Read-only walk reporting the conflict `descend` would run into.
    fn probe(&self, pieces: &[Piece], method: &Method, path: &str) -> Result<(), ConflictError> {
        let Some((first, rest)) = pieces.split_first() else {
            return match self.entry(method) {
                Some(entry) if entry.handler.is_some() => Err(ConflictError::DuplicateRoute {
                    method: method.clone(),
                    path: path.to_owned(),
                }),
                _ => Ok(()),
            };
        };

        match first {
            Piece::Static(text) => {
                let mut node = self;
                let mut text = text.as_bytes();
                while let Some(&byte) = text.first() {
                    match node.static_child(byte) {
                        Some(child) if text.starts_with(&child.prefix) => {
                            text = &text[child.prefix.len()..];
                            node = child;
                        }
                        // the remainder lands on freshly created nodes
                        _ => return Ok(()),
                    }
                }
                node.probe(rest, method, path)
            }
            Piece::Param { name, constraint } => match &self.wildcard {
                None => Ok(()),
                Some(Wildcard::CatchAll(existing)) => Err(conflict(path, &**existing, first)),
                Some(Wildcard::Params(params)) => {
                    match params
                        .iter()
                        .find(|p| p.constraint() == constraint.as_ref())
                    {
                        Some(p) if p.param_name() != &**name => Err(conflict(path, p, first)),
                        Some(p) => p.probe(rest, method, path),
                        None => Ok(()),
                    }
                }
            },
            Piece::CatchAll { name } => match &self.wildcard {
                None => Ok(()),
                Some(Wildcard::CatchAll(existing)) if existing.param_name() == &**name => {
                    existing.probe(rest, method, path)
                }
                Some(Wildcard::CatchAll(existing)) => Err(conflict(path, &**existing, first)),
                Some(Wildcard::Params(params)) => match params.first() {
                    Some(p) => Err(conflict(path, p, first)),
                    None => Ok(()),
                },
            },
        }
    }

    /// Walk `pieces`, creating and splitting nodes as needed, and return the end node.
    pub(super) fn descend(
        &mut self,
        pieces: &[Piece],
        path: &str,
    ) -> Result<&mut Node<H>, ConflictError> {
        let Some((first, rest)) = pieces.split_first() else {
            return Ok(self);
        };
        let next = match first {
            Piece::Static(text) => self.static_path(text.as_bytes()),
            Piece::Param { name, constraint } => self.param_child(name, constraint, first, path)?,
            Piece::CatchAll { name } => self.catch_all_child(name, first, path)?,
        };
        next.descend(rest, path)
    }

    /// Follow or create static edges for `text`, splitting on partial overlap.
    fn static_path(&mut self, text: &[u8]) -> &mut Node<H> {
        let Some(&byte) = text.first() else {
            return self;
        };
        let idx = match self
            .children
            .iter()
            .position(|c| c.prefix.first() == Some(&byte))
        {
            Some(idx) => idx,
            None => {
                self.children.push(Node::new_static(text.to_vec()));
                let last = self.children.len() - 1;
                return &mut self.children[last];
            }
        };

        let child = &mut self.children[idx];
        let common = common_prefix_len(&child.prefix, text);
        if common < child.prefix.len() {
            child.split_at(common);
        }
        child.static_path(&text[common..])
    }

    fn param_child(
        &mut self,
        name: &Arc<str>,
        constraint: &Option<Constraint>,
        piece: &Piece,
        path: &str,
    ) -> Result<&mut Node<H>, ConflictError> {
        let params = match self
            .wildcard
            .get_or_insert_with(|| Wildcard::Params(Vec::new()))
        {
            Wildcard::Params(params) => params,
            Wildcard::CatchAll(existing) => return Err(conflict(path, &**existing, piece)),
        };

        if let Some(idx) = params
            .iter()
            .position(|p| p.constraint() == constraint.as_ref())
        {
            if params[idx].param_name() != &**name {
                return Err(conflict(path, &params[idx], piece));
            }
            return Ok(&mut params[idx]);
        }

        // constrained parameters keep registration order ahead of the plain one
        let idx = if constraint.is_some() {
            params
                .iter()
                .position(|p| p.constraint().is_none())
                .unwrap_or(params.len())
        } else {
            params.len()
        };
        params.insert(idx, Node::new_param(Arc::clone(name), constraint.clone()));
        Ok(&mut params[idx])
    }

    fn catch_all_child(
        &mut self,
        name: &Arc<str>,
        piece: &Piece,
        path: &str,
    ) -> Result<&mut Node<H>, ConflictError> {
        let wildcard = self
            .wildcard
            .get_or_insert_with(|| Wildcard::CatchAll(Box::new(Node::new_catch_all(Arc::clone(name)))));
        match wildcard {
            Wildcard::CatchAll(existing) if existing.param_name() != &**name => {
                Err(conflict(path, &**existing, piece))
            }
            Wildcard::CatchAll(existing) => Ok(&mut **existing),
            Wildcard::Params(params) => Err(ConflictError::WildcardConflict {
                path: path.to_owned(),
                existing: params.first().map(Node::describe).unwrap_or_default(),
                new: describe_piece(piece),
            }),
        }
    }
}

fn conflict<H>(path: &str, existing: &Node<H>, new: &Piece) -> ConflictError {
    ConflictError::WildcardConflict {
        path: path.to_owned(),
        existing: existing.describe(),
        new: describe_piece(new),
    }
}

fn describe_piece(piece: &Piece) -> String {
    match piece {
        Piece::Static(text) => text.clone(),
        Piece::Param {
            name,
            constraint: Some(c),
        } => format!(":{name}({})", c.source()),
        Piece::Param { name, .. } => format!(":{name}"),
        Piece::CatchAll { name } => format!("*{name}"),
    }
}

/// Pieces of the same route with its trailing slash added or removed.
///
/// A pattern ending in `/` loses it, a pattern ending in `/*name` is reduced to the
/// path before that slash, anything else gains a `/`. `None` when the variant would
/// be empty (the root route and `/*name`).
pub(crate) fn toggle_trailing_slash(pieces: &[Piece]) -> Option<Vec<Piece>> {
    let mut toggled = pieces.to_vec();
    match toggled.last_mut()? {
        Piece::Static(text) if text.ends_with('/') => {
            text.pop();
            if text.is_empty() {
                toggled.pop();
            }
        }
        Piece::Static(text) => text.push('/'),
        Piece::Param { .. } => toggled.push(Piece::Static("/".to_owned())),
        Piece::CatchAll { .. } => {
            toggled.pop();
            match toggled.last_mut() {
                Some(Piece::Static(text)) if text.ends_with('/') => {
                    text.pop();
                    if text.is_empty() {
                        toggled.pop();
                    }
                }
                _ => return None,
            }
        }
    }
    if toggled.is_empty() {
        None
    } else {
        Some(toggled)
    }
}
