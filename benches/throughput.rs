use brrtrouter_radix::path::clean_path;
use brrtrouter_radix::route_table::{RouteTable, TableFormat};
use brrtrouter_radix::router::Router;
use brrtrouter_radix::runtime_config::RouterConfig;
use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use std::hint::black_box;

fn example_table() -> &'static str {
    r"
routes:
  - { method: GET, path: '/', handler: root_handler }
  - { method: GET, path: '/zoo/animals', handler: get_animals }
  - { method: POST, path: '/zoo/animals', handler: create_animal }
  - { method: GET, path: '/zoo/animals/:id([0-9]+)', handler: get_animal }
  - { method: GET, path: '/zoo/animals/:name([a-z]+)', handler: get_animal_by_name }
  - { method: PUT, path: '/zoo/animals/:id', handler: update_animal }
  - { method: DELETE, path: '/zoo/animals/:id', handler: delete_animal }
  - { method: GET, path: '/zoo/animals/:id/toys/:toy_id', handler: animal_toy }
  - { method: GET, path: '/zoo/:category/animals/:id/habitats/:habitat_id/sections/:section_id', handler: habitat_section }
  - { method: POST, path: '/inventory/:warehouse_id/feeds/:feed_id/items/:item_id/batches/:batch_id', handler: post_item_batch }
  - { method: GET, path: '/complex/:a/:b/:c/:d/:e/:f/:g/:h/:i', handler: complex_many_params }
  - { method: HEAD, path: '/zoo/health', handler: health_check }
  - { method: GET, path: '/static/*filepath', handler: serve_static }
"
}

fn build_router() -> Router<String> {
    RouteTable::parse(example_table(), TableFormat::Yaml)
        .and_then(|table| table.build_router(RouterConfig::default()))
        .expect("failed to build router")
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = build_router();
    c.bench_function("route_match", |b| {
        let test_paths = [
            (Method::GET, "/zoo/animals/123"),
            (Method::GET, "/zoo/animals/123/toys/456"),
            (Method::GET, "/zoo/cats/animals/123/habitats/88/sections/5"),
            (Method::POST, "/inventory/1/feeds/2/items/3/batches/4"),
            (Method::GET, "/complex/1/2/3/4/5/6/7/8/9"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                let res = router.lookup(method, path);
                black_box(&res);
            }
        })
    });
}

fn bench_static_and_catch_all(c: &mut Criterion) {
    let router = build_router();
    c.bench_function("route_static", |b| {
        b.iter(|| black_box(router.lookup(&Method::GET, black_box("/zoo/animals"))))
    });
    c.bench_function("route_catch_all", |b| {
        b.iter(|| {
            black_box(router.lookup(&Method::GET, black_box("/static/css/site/main.css")))
        })
    });
    c.bench_function("route_backtrack", |b| {
        // the numeric id fails on "rex", so the name constraint is tried next
        b.iter(|| black_box(router.lookup(&Method::GET, black_box("/zoo/animals/rex"))))
    });
}

fn bench_misses(c: &mut Criterion) {
    let router = build_router();
    c.bench_function("route_miss", |b| {
        b.iter(|| black_box(router.lookup(&Method::GET, black_box("/nothing/here"))))
    });
    c.bench_function("route_outcome_method_not_allowed", |b| {
        b.iter(|| {
            let routed = router.lookup_with(&Method::PATCH, black_box("/zoo/animals/7"), ());
            black_box(routed.outcome.status(&Method::PATCH))
        })
    });
}

fn bench_clean_path(c: &mut Criterion) {
    c.bench_function("clean_path_canonical", |b| {
        b.iter(|| black_box(clean_path(black_box("/zoo/animals/123/toys/456"))))
    });
    c.bench_function("clean_path_dirty", |b| {
        b.iter(|| black_box(clean_path(black_box("//zoo/./animals/../animals//123/"))))
    });
}

criterion_group!(
    benches,
    bench_route_throughput,
    bench_static_and_catch_all,
    bench_misses,
    bench_clean_path
);
criterion_main!(benches);
