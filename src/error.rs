//! Registration errors.
//!
//! Lookups never fail; only [`Router::handle`](crate::router::Router::handle) and
//! [`Tree::insert`](crate::tree::Tree::insert) return these. Every error carries the
//! pattern that caused it so startup code can print a useful message before aborting.

use http::Method;
use std::fmt;

/// Malformed route pattern
///
/// Returned by the pattern compiler before the tree is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// `:` or `*` with nothing after it
    EmptyParamName {
        /// The offending pattern
        pattern: String,
        /// Byte offset of the `:` or `*`
        position: usize,
    },
    /// Parameter name that does not start with a letter
    InvalidParamName {
        /// The offending pattern
        pattern: String,
        /// Byte offset of the `:` or `*`
        position: usize,
    },
    /// A parameter followed by text other than `/` inside the same segment
    ParamNotAtSegmentEnd {
        /// The offending pattern
        pattern: String,
        /// Parameter name
        name: String,
    },
    /// `(` without its closing `)`
    UnterminatedConstraint {
        /// The offending pattern
        pattern: String,
        /// Parameter name
        name: String,
    },
    /// Constraint expression rejected by the regex engine
    InvalidConstraint {
        /// The offending pattern
        pattern: String,
        /// Constraint source text
        constraint: String,
        /// Message from the regex compiler
        message: String,
    },
    /// `*name` preceded by literal text in its segment
    CatchAllNotAtSegmentStart {
        /// The offending pattern
        pattern: String,
        /// Catch-all name
        name: String,
    },
    /// `*name` followed by more path
    CatchAllNotLast {
        /// The offending pattern
        pattern: String,
    },
    /// More than one `*name`
    DuplicateCatchAll {
        /// The offending pattern
        pattern: String,
    },
    /// Same parameter name bound twice
    DuplicateParamName {
        /// The offending pattern
        pattern: String,
        /// Repeated name
        name: String,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EmptyParamName { pattern, position } => write!(
                f,
                "pattern '{pattern}': empty parameter name at byte {position}"
            ),
            PatternError::InvalidParamName { pattern, position } => write!(
                f,
                "pattern '{pattern}': parameter name at byte {position} must start with a letter \
                and contain only letters, digits and '_'"
            ),
            PatternError::ParamNotAtSegmentEnd { pattern, name } => write!(
                f,
                "pattern '{pattern}': parameter '{name}' must be followed by '/' or the end of the pattern"
            ),
            PatternError::UnterminatedConstraint { pattern, name } => write!(
                f,
                "pattern '{pattern}': constraint of parameter '{name}' is missing its closing ')'"
            ),
            PatternError::InvalidConstraint {
                pattern,
                constraint,
                message,
            } => write!(
                f,
                "pattern '{pattern}': constraint '{constraint}' does not compile: {message}"
            ),
            PatternError::CatchAllNotAtSegmentStart { pattern, name } => write!(
                f,
                "pattern '{pattern}': catch-all '*{name}' must start a segment"
            ),
            PatternError::CatchAllNotLast { pattern } => write!(
                f,
                "pattern '{pattern}': catch-all segment must be the last segment"
            ),
            PatternError::DuplicateCatchAll { pattern } => write!(
                f,
                "pattern '{pattern}': only one catch-all segment is allowed"
            ),
            PatternError::DuplicateParamName { pattern, name } => write!(
                f,
                "pattern '{pattern}': parameter '{name}' is bound more than once"
            ),
        }
    }
}

impl std::error::Error for PatternError {}

/// Ambiguous registration
///
/// The pattern itself is valid but cannot coexist with a route already in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    /// Exact (method, concrete path) registered twice
    DuplicateRoute {
        /// HTTP method
        method: Method,
        /// Concrete (expanded) path
        path: String,
    },
    /// A different wildcard already occupies the same tree position
    WildcardConflict {
        /// Concrete path being inserted
        path: String,
        /// Wildcard already in the tree, rendered as it appears in a pattern
        existing: String,
        /// Wildcard being inserted
        new: String,
    },
}

impl fmt::Display for ConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictError::DuplicateRoute { method, path } => {
                write!(f, "route {method} {path} is already registered")
            }
            ConflictError::WildcardConflict {
                path,
                existing,
                new,
            } => write!(
                f,
                "'{new}' in '{path}' conflicts with existing wildcard '{existing}' at the same position"
            ),
        }
    }
}

impl std::error::Error for ConflictError {}

/// Any registration failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// See [`PatternError`]
    Pattern(PatternError),
    /// See [`ConflictError`]
    Conflict(ConflictError),
}

impl RouteError {
    /// `true` for [`RouteError::Conflict`]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, RouteError::Conflict(_))
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Pattern(e) => write!(f, "invalid route pattern: {e}"),
            RouteError::Conflict(e) => write!(f, "route conflict: {e}"),
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::Pattern(e) => Some(e),
            RouteError::Conflict(e) => Some(e),
        }
    }
}

impl From<PatternError> for RouteError {
    fn from(e: PatternError) -> Self {
        RouteError::Pattern(e)
    }
}

impl From<ConflictError> for RouteError {
    fn from(e: ConflictError) -> Self {
        RouteError::Conflict(e)
    }
}
