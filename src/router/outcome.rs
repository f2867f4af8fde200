use http::{Method, StatusCode};

use crate::tree::Match;

/// Why a redirect was suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// The path matches with its trailing slash added or removed
    TrailingSlash,
    /// The path was not canonical and its cleaned form matches
    FixedPath,
}

impl RedirectKind {
    /// Status code to redirect with: `301` for `GET`, `308` otherwise so the
    /// client repeats the request body.
    #[must_use]
    pub fn status(self, method: &Method) -> StatusCode {
        if *method == Method::GET {
            StatusCode::MOVED_PERMANENTLY
        } else {
            StatusCode::PERMANENT_REDIRECT
        }
    }
}

/// What the caller should do with a request.
#[derive(Debug)]
pub enum RouteOutcome<'r, 'p, H> {
    /// Invoke the handler
    Matched(Match<'r, 'p, H>),
    /// Redirect the client to `location`
    Redirect {
        /// Target path
        location: String,
        /// Reason for the redirect
        kind: RedirectKind,
    },
    /// The path exists, but not for this method
    MethodNotAllowed {
        /// Methods the path does answer to
        allowed: Vec<Method>,
    },
    /// Nothing matched
    NotFound,
}

impl<'r, 'p, H> RouteOutcome<'r, 'p, H> {
    /// Status code for outcomes that are not a match; `None` for [`RouteOutcome::Matched`].
    #[must_use]
    pub fn status(&self, method: &Method) -> Option<StatusCode> {
        match self {
            RouteOutcome::Matched(_) => None,
            RouteOutcome::Redirect { kind, .. } => Some(kind.status(method)),
            RouteOutcome::MethodNotAllowed { .. } => Some(StatusCode::METHOD_NOT_ALLOWED),
            RouteOutcome::NotFound => Some(StatusCode::NOT_FOUND),
        }
    }

    /// `Allow` header value for [`RouteOutcome::MethodNotAllowed`].
    #[must_use]
    pub fn allow_header(&self) -> Option<String> {
        match self {
            RouteOutcome::MethodNotAllowed { allowed } => Some(
                allowed
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }
}

/// Routing result with the caller's context handed back untouched.
#[derive(Debug)]
pub struct Routed<'r, 'p, H, C> {
    /// Context passed to [`Router::lookup_with`](super::Router::lookup_with)
    pub context: C,
    /// Routing decision
    pub outcome: RouteOutcome<'r, 'p, H>,
}
