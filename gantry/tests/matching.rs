//! Route resolution tests: registration order, method unions, and the
//! 404-vs-405 distinction.

use gantry::{Callback, MatchResult, Service};

fn null_callback() -> Callback {
    Callback::new(|_args| Ok(""))
}

#[test]
fn first_matching_route_wins() {
    let mut service = Service::new();
    service.get("/:x", null_callback()).unwrap();
    service.get("/foo", null_callback()).unwrap();

    match service.resolve("GET", "/foo") {
        MatchResult::Matched { route, params, .. } => {
            assert_eq!(route.pattern().raw(), "/:x");
            assert_eq!(params.get("x"), Some(Some("foo")));
        }
        other => panic!("expected a match, got {other:?}"),
    }
}

#[test]
fn wrong_method_keeps_scanning_for_a_matching_route() {
    let mut service = Service::new();
    service.post("/:x", null_callback()).unwrap();
    service.get("/foo", null_callback()).unwrap();

    match service.resolve("GET", "/foo") {
        MatchResult::Matched { route, .. } => assert_eq!(route.pattern().raw(), "/foo"),
        other => panic!("expected a match, got {other:?}"),
    }
}

#[test]
fn wrong_method_reports_the_union_of_candidates() {
    let mut service = Service::new();
    service.get("/foo/bar/baz.txt", null_callback()).unwrap();
    service.post("/foo/bar/baz.txt", null_callback()).unwrap();
    service.post("/unrelated", null_callback()).unwrap();

    match service.resolve("DELETE", "/foo/bar/baz.txt") {
        MatchResult::PathMatchWrongMethod { allowed } => {
            assert_eq!(allowed, vec!["GET".to_owned(), "POST".to_owned()]);
        }
        other => panic!("expected wrong-method, got {other:?}"),
    }
}

#[test]
fn no_structural_match_is_distinct_from_wrong_method() {
    let mut service = Service::new();
    service.get("/foo/:xyz", null_callback()).unwrap();

    assert!(matches!(
        service.resolve("GET", "/bar/foo.txt"),
        MatchResult::NoPathMatch
    ));
    assert!(matches!(
        service.resolve("POST", "/foo/anything"),
        MatchResult::PathMatchWrongMethod { .. }
    ));
}

#[test]
fn method_matching_is_case_sensitive() {
    let mut service = Service::new();
    service.get("/foo", null_callback()).unwrap();

    assert!(matches!(
        service.resolve("get", "/foo"),
        MatchResult::PathMatchWrongMethod { .. }
    ));
}

#[test]
fn multi_method_routes_match_each_method() {
    let mut service = Service::new();
    service
        .add_route(&["GET", "HEAD"], "*", null_callback())
        .unwrap();

    assert!(matches!(
        service.resolve("GET", "/admin/money/a/b/c/"),
        MatchResult::Matched { .. }
    ));
    assert!(matches!(
        service.resolve("HEAD", "/admin/money/a/b/c/"),
        MatchResult::Matched { .. }
    ));
    match service.resolve("POST", "/admin/money/a/b/c/") {
        MatchResult::PathMatchWrongMethod { allowed } => {
            assert_eq!(allowed, vec!["GET".to_owned(), "HEAD".to_owned()]);
        }
        other => panic!("expected wrong-method, got {other:?}"),
    }
}

#[test]
fn duplicate_registrations_are_legal() {
    let mut service = Service::new();
    service.get("/foo", null_callback()).unwrap();
    service.get("/foo", null_callback()).unwrap();

    assert!(matches!(
        service.resolve("GET", "/foo"),
        MatchResult::Matched { .. }
    ));
}

#[test]
fn resolution_is_deterministic() {
    let mut service = Service::new();
    service.get("/:a/:b+/:c", null_callback()).unwrap();

    for _ in 0..3 {
        match service.resolve("GET", "/foo/bar/baz/foobar") {
            MatchResult::Matched { params, .. } => {
                assert_eq!(params.get("a"), Some(Some("foo")));
                assert_eq!(params.get("b"), Some(Some("bar/baz")));
                assert_eq!(params.get("c"), Some(Some("foobar")));
            }
            other => panic!("expected a match, got {other:?}"),
        }
    }
}

#[test]
fn wildcard_route_requires_enough_segments() {
    let mut service = Service::new();
    service.get("/:one/:two/:three+", null_callback()).unwrap();

    assert!(matches!(
        service.resolve("GET", "/foo/bar/"),
        MatchResult::NoPathMatch
    ));
}
