//! Heap-allocation checks for the request path.
//!
//! A counting global allocator records allocations per thread, so tests running
//! in parallel do not disturb each other.

use brrtrouter_radix::path::clean_path;
use brrtrouter_radix::router::Router;
use http::Method;
use std::alloc::{GlobalAlloc, Layout, System};
use std::borrow::Cow;
use std::cell::Cell;

struct CountingAllocator;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

#[allow(unsafe_code)]
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        ALLOCATIONS.with(|count| count.set(count.get() + 1));
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        ALLOCATIONS.with(|count| count.set(count.get() + 1));
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn allocations_during<R>(f: impl FnOnce() -> R) -> (usize, R) {
    let before = ALLOCATIONS.with(Cell::get);
    let result = f();
    let after = ALLOCATIONS.with(Cell::get);
    (after - before, result)
}

#[test]
fn test_clean_path_canonical_input_does_not_allocate() {
    for path in ["/", "/abc", "/abc/def/", "/api/v1/users/123/posts"] {
        let (count, cleaned) = allocations_during(|| clean_path(path));
        assert!(matches!(cleaned, Cow::Borrowed(_)), "{path}");
        assert_eq!(count, 0, "{path} allocated");
    }
}

#[test]
fn test_clean_path_dirty_input_allocates_result_only() {
    // warm the pool so the scratch buffer already exists
    drop(clean_path("//warm/../up"));
    let (count, cleaned) = allocations_during(|| clean_path("/a//b/./c/../d"));
    assert_eq!(cleaned, "/a/b/d");
    assert_eq!(count, 1);
}

#[test]
fn test_lookup_does_not_allocate() {
    let mut router = Router::new();
    router.get("/users/:id([0-9]+)", "show_user").unwrap();
    router.get("/users/:name", "show_by_name").unwrap();
    router
        .get("/api/:version/users/:user_id/posts/:post_id", "post")
        .unwrap();
    router.get("/static/*filepath", "static").unwrap();

    let paths = [
        "/users/42",
        "/users/alice",
        "/api/v1/users/7/posts/9",
        "/static/css/site.css",
    ];
    // first use sets up per-thread regex caches and log callsites
    for path in paths {
        assert!(router.lookup(&Method::GET, path).found().is_some());
    }

    for path in paths {
        let (count, found) =
            allocations_during(|| router.lookup(&Method::GET, path).found().is_some());
        assert!(found, "{path}");
        assert_eq!(count, 0, "{path} allocated");
    }

    assert!(router.lookup(&Method::GET, "/nope").is_miss());
    let (count, miss) = allocations_during(|| router.lookup(&Method::GET, "/nope").is_miss());
    assert!(miss);
    assert_eq!(count, 0);
}
