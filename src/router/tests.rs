use super::{RedirectKind, RouteOutcome, Router, SharedRouter};
use crate::error::{ConflictError, PatternError, RouteError};
use crate::runtime_config::RouterConfig;
use http::{Method, StatusCode};

fn router(routes: &[(Method, &'static str)]) -> Router<&'static str> {
    let mut router = Router::new();
    for (method, pattern) in routes {
        router.handle(method.clone(), pattern, *pattern).unwrap();
    }
    router
}

fn matched(router: &Router<&'static str>, method: &Method, path: &str) -> Option<&'static str> {
    match router.lookup_with(method, path, ()).outcome {
        RouteOutcome::Matched(m) => Some(*m.handler),
        _ => None,
    }
}

#[test]
fn test_handle_cleans_pattern() {
    let r = router(&[(Method::GET, "users//./:id/../list")]);
    assert_eq!(&*r.routes()[0].pattern, "/users/list");
    assert_eq!(matched(&r, &Method::GET, "/users/list"), Some("users//./:id/../list"));
}

#[test]
fn test_shorthands_register_methods() {
    let mut r = Router::new();
    r.get("/x", 1).unwrap();
    r.post("/x", 2).unwrap();
    r.put("/x", 3).unwrap();
    r.patch("/x", 4).unwrap();
    r.delete("/x", 5).unwrap();
    r.head("/x", 6).unwrap();
    r.options("/x", 7).unwrap();
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::HEAD,
        Method::OPTIONS,
    ];
    for (i, method) in methods.iter().enumerate() {
        let m = r.lookup(method, "/x").found().unwrap();
        assert_eq!(*m.handler, i + 1);
    }
    assert_eq!(r.len(), 7);
}

#[test]
fn test_match_exposes_registered_pattern() {
    let r = router(&[(Method::GET, "/u/:id/:tab?")]);
    let m = r.lookup(&Method::GET, "/u/1").found().unwrap();
    assert_eq!(m.pattern, "/u/:id/:tab?");
    let m = r.lookup(&Method::GET, "/u/1/posts").found().unwrap();
    assert_eq!(m.params.get("tab"), Some("posts"));
}

#[test]
fn test_pattern_error_is_reported() {
    let mut r: Router<()> = Router::new();
    let err = r.get("/a/*rest/b", ()).unwrap_err();
    assert_eq!(
        err,
        RouteError::Pattern(PatternError::CatchAllNotLast {
            pattern: "/a/*rest/b".to_owned()
        })
    );
    assert!(!err.is_conflict());
    assert!(r.is_empty());
}

#[test]
fn test_conflicting_optional_expansion_is_atomic() {
    let mut r = router(&[(Method::GET, "/a/:id/edit")]);
    let err = r.get("/a/:other?", "x").unwrap_err();
    assert!(err.is_conflict());
    // "/a" and "/a/" from the expansion were not inserted either
    assert!(r.lookup(&Method::GET, "/a").is_miss());
    assert_eq!(r.routes().len(), 1);
}

#[test]
fn test_duplicate_through_optional_expansion() {
    let mut r = router(&[(Method::GET, "/p/:x?")]);
    let err = r.get("/p", "again").unwrap_err();
    assert_eq!(
        err,
        RouteError::Conflict(ConflictError::DuplicateRoute {
            method: Method::GET,
            path: "/p".to_owned(),
        })
    );
}

#[test]
fn test_trailing_slash_redirect_location() {
    let r = router(&[(Method::GET, "/foo"), (Method::POST, "/bar/")]);
    match r.lookup_with(&Method::GET, "/foo/", ()).outcome {
        RouteOutcome::Redirect { location, kind } => {
            assert_eq!(location, "/foo");
            assert_eq!(kind, RedirectKind::TrailingSlash);
            assert_eq!(kind.status(&Method::GET), StatusCode::MOVED_PERMANENTLY);
        }
        other => panic!("unexpected {other:?}"),
    }
    let outcome = r.lookup_with(&Method::POST, "/bar", ()).outcome;
    match outcome {
        RouteOutcome::Redirect { location, kind } => {
            assert_eq!(location, "/bar/");
            assert_eq!(kind.status(&Method::POST), StatusCode::PERMANENT_REDIRECT);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_trailing_slash_redirect_disabled() {
    let config = RouterConfig {
        redirect_trailing_slash: false,
        ..RouterConfig::default()
    };
    let mut r = Router::with_config(config);
    r.get("/foo", ()).unwrap();
    assert!(matches!(
        r.lookup_with(&Method::GET, "/foo/", ()).outcome,
        RouteOutcome::NotFound
    ));
}

#[test]
fn test_fixed_path_redirect() {
    let r = router(&[(Method::GET, "/docs/intro")]);
    match r.lookup_with(&Method::GET, "/docs/../docs//intro", ()).outcome {
        RouteOutcome::Redirect { location, kind } => {
            assert_eq!(location, "/docs/intro");
            assert_eq!(kind, RedirectKind::FixedPath);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(
        r.lookup_with(&Method::GET, "/nope/../x", ()).outcome,
        RouteOutcome::NotFound
    ));
}

#[test]
fn test_fixed_path_redirect_disabled() {
    let config = RouterConfig {
        redirect_fixed_path: false,
        ..RouterConfig::default()
    };
    let mut r = Router::with_config(config);
    r.get("/docs", ()).unwrap();
    assert!(matches!(
        r.lookup_with(&Method::GET, "//docs", ()).outcome,
        RouteOutcome::NotFound
    ));
}

#[test]
fn test_empty_path_routes_as_root() {
    let r = router(&[(Method::GET, "/")]);
    assert_eq!(matched(&r, &Method::GET, ""), Some("/"));
}

#[test]
fn test_method_not_allowed() {
    let r = router(&[(Method::GET, "/items/:id"), (Method::DELETE, "/items/:id")]);
    let outcome = r.lookup_with(&Method::POST, "/items/9", ()).outcome;
    assert_eq!(outcome.status(&Method::POST), Some(StatusCode::METHOD_NOT_ALLOWED));
    assert_eq!(outcome.allow_header().as_deref(), Some("GET, DELETE"));

    let config = RouterConfig {
        handle_method_not_allowed: false,
        ..RouterConfig::default()
    };
    let mut r = Router::with_config(config);
    r.get("/items/:id", ()).unwrap();
    assert!(matches!(
        r.lookup_with(&Method::POST, "/items/9", ()).outcome,
        RouteOutcome::NotFound
    ));
}

#[test]
fn test_context_passes_through() {
    let r = router(&[(Method::GET, "/")]);
    let ctx = vec![1u8, 2, 3];
    let routed = r.lookup_with(&Method::GET, "/missing", ctx);
    assert_eq!(routed.context, vec![1, 2, 3]);
    assert_eq!(routed.outcome.status(&Method::GET), Some(StatusCode::NOT_FOUND));
}

#[test]
fn test_group_prefixes_patterns() {
    let mut r = Router::new();
    {
        let mut api = r.group("/api/");
        api.get("/users/:id", "user").unwrap();
        api.group("/v2").put("/users/:id", "user_v2").unwrap();
    }
    assert_eq!(matched(&r, &Method::GET, "/api/users/1"), Some("user"));
    assert_eq!(matched(&r, &Method::PUT, "/api/v2/users/1"), Some("user_v2"));
}

#[test]
fn test_shared_router_publish() {
    let shared = SharedRouter::new(router(&[(Method::GET, "/old")]));
    let before = shared.snapshot();
    let previous = shared.publish(router(&[(Method::GET, "/new")]));
    assert_eq!(previous.len(), 1);
    assert!(before.lookup(&Method::GET, "/old").found().is_some());
    assert!(shared.load().lookup(&Method::GET, "/old").is_miss());
    assert!(shared.load().lookup(&Method::GET, "/new").found().is_some());
}
