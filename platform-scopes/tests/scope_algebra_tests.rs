//! Integration tests for the scope algebra.
//!
//! These tests exercise the public API the way a host service does:
//! validating client scopes, checking them against endpoint requirements,
//! and combining the scopes of roles and credentials.
//!
//! Test groups:
//! 1. Scope validation
//! 2. Requirement satisfaction
//! 3. Intersection (checked in both argument orders)
//! 4. Union and normalization

use std::collections::BTreeSet;

use platform_scopes::{
    is_valid_scope, merge_normalized, normalize, ordering::sort_scopes, scope_intersection,
    scope_satisfies, scope_union, validate_expression, RoleDefinition, RoleScopes,
    ScopeExpression, ScopeSet, ValidationError,
};

/// Assert that `x ∩ y` and `y ∩ x` both equal `expected`, as sets.
fn assert_intersection(x: &[&str], y: &[&str], expected: &[&str]) {
    let expected: BTreeSet<String> = expected.iter().map(|s| s.to_string()).collect();
    let forward: BTreeSet<String> = scope_intersection(x, y).unwrap().into_iter().collect();
    let backward: BTreeSet<String> = scope_intersection(y, x).unwrap().into_iter().collect();
    assert_eq!(forward, expected, "intersection({:?}, {:?})", x, y);
    assert_eq!(backward, expected, "intersection({:?}, {:?})", y, x);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn normal_looking_scopes_are_valid() {
    assert!(is_valid_scope("auth:credentials"));
    assert!(is_valid_scope("queue:*"));
    assert!(is_valid_scope("secrets:garbage:foo bar"));
    assert!(is_valid_scope(""));
}

#[test]
fn control_and_unicode_scopes_are_invalid() {
    assert!(!is_valid_scope("some:garbage\nauth:credentials"));
    assert!(!is_valid_scope("some:garbage\0auth:credentials"));
    assert!(!is_valid_scope("halt:\u{1f6c7}"));
}

#[test]
fn expression_validation_reports_location() {
    let err = validate_expression(&[vec!["ok"], vec!["ok", "bad\n"]]).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidExpression {
            conjunction: 1,
            index: 1,
            scope: "bad\n".to_string(),
        }
    );
}

// ============================================================================
// Satisfaction
// ============================================================================

#[test]
fn satisfaction_cases() {
    let cases: &[(&[&str], &[&[&str]], bool)] = &[
        (&["foo:bar"], &[&["foo:bar"]], true),
        (&["foo:bar"], &[&[""]], false),
        (&["foo:*"], &[&["foo:bar"]], true),
        (&["foo:*:bing"], &[&["foo:bar:bing"]], false),
        (&["*:bar"], &[&["foo:bar"]], false),
        (&["foo:"], &[&["foo:bar"]], false),
        (&["foo:bar:*"], &[&["bar:bing"]], false),
        (&["bar:*"], &[&["foo:bar:bing"]], false),
        (&["bar:*"], &[&["foo:x"], &["bar:x"]], true),
        (&["bar:*", "foo:x"], &[&["foo:x", "bar:y"]], true),
        (&[""], &[&["foo:bar"]], false),
        (&[], &[&["foo:bar"]], false),
        (&["*"], &[&["foo:bar", "bar:bing"]], true),
        (&["foo:bar"], &[&[]], true),
        (&[], &[&[]], true),
        (&["foo:bar"], &[], false),
        (&["a"], &[], false),
    ];

    for (held, expression, expected) in cases {
        assert_eq!(
            scope_satisfies(*held, *expression).unwrap(),
            *expected,
            "scope_satisfies({:?}, {:?})",
            held,
            expression
        );
    }
}

#[test]
fn queue_worker_can_create_tasks() {
    let held = ["queue:*", "auth:credentials"];
    let requirement = [vec!["queue:create-task", "auth:credentials"]];
    assert!(scope_satisfies(&held, &requirement).unwrap());
}

#[test]
fn malformed_input_never_yields_a_decision() {
    assert!(scope_satisfies(&["*"], &[vec!["x\0"]]).is_err());
    assert!(scope_satisfies(&["*\n"], &[vec!["x"]]).is_err());
}

// ============================================================================
// Intersection
// ============================================================================

#[test]
fn intersection_exact_match() {
    assert_intersection(&["foo:bar"], &["foo:bar"], &["foo:bar"]);
}

#[test]
fn intersection_with_empty_scope() {
    assert_intersection(&["foo:bar"], &[""], &[]);
    assert_intersection(&[""], &["foo:bar"], &[]);
}

#[test]
fn intersection_prefix() {
    assert_intersection(&["foo:bar"], &["foo:*"], &["foo:bar"]);
}

#[test]
fn intersection_star_not_at_end() {
    assert_intersection(&["foo:bar:bing"], &["foo:*:bing"], &[]);
    assert_intersection(&["foo:bar"], &["*:bar"], &[]);
}

#[test]
fn intersection_prefix_with_no_star() {
    assert_intersection(&["foo:bar"], &["foo:"], &[]);
}

#[test]
fn intersection_star_but_not_prefix() {
    assert_intersection(&["foo:bar:*"], &["bar:bing"], &[]);
    assert_intersection(&["bar:*"], &["foo:bar:bing"], &[]);
}

#[test]
fn intersection_disjunction() {
    assert_intersection(&["bar:*"], &["foo:x", "bar:x"], &["bar:x"]);
}

#[test]
fn intersection_conjunction() {
    assert_intersection(&["bar:y", "foo:x"], &["bar:*", "foo:x"], &["bar:y", "foo:x"]);
}

#[test]
fn intersection_bare_star_is_identity() {
    assert_intersection(&["foo:bar", "bar:bing"], &["*"], &["foo:bar", "bar:bing"]);
    assert_intersection(&["foo:bar", "foo:bar", "q:*"], &["*"], &["foo:bar", "q:*"]);
}

#[test]
fn intersection_nested_wildcards() {
    assert_intersection(&["queue:*"], &["queue:tasks:*"], &["queue:tasks:*"]);
}

#[test]
fn intersection_with_nothing() {
    assert_intersection(&[], &["foo:bar"], &[]);
    assert_intersection(&["foo:bar"], &[], &[]);
}

// ============================================================================
// Union and normalization
// ============================================================================

#[test]
fn union_is_minimal_and_canonical() {
    let union = scope_union(
        &["queue:create-task", "auth:credentials", "queue:*"],
        &["queue:tasks:*", "auth:credentials", "secrets:get"],
    )
    .unwrap();
    assert_eq!(union, vec!["auth:credentials", "queue:*", "secrets:get"]);
}

#[test]
fn union_with_universal_wildcard() {
    assert_eq!(scope_union(&["a", "b:*"], &["*"]).unwrap(), vec!["*"]);
}

#[test]
fn union_matches_normalize_then_merge() {
    let mut x = vec!["b:c", "a", "b:*", "a:*"];
    let mut y = vec!["b", "a:q", "c"];
    sort_scopes(&mut x);
    sort_scopes(&mut y);

    let merged = merge_normalized(&normalize(&x).unwrap(), &normalize(&y).unwrap()).unwrap();
    assert_eq!(merged, scope_union(&x, &y).unwrap());
    assert_eq!(merged, vec!["a", "a:*", "b", "b:*", "c"]);
}

#[test]
fn normalize_requires_sorted_input() {
    assert!(matches!(
        normalize(&["z", "a"]),
        Err(ValidationError::Unsorted { index: 1 })
    ));
}

// ============================================================================
// Typed API
// ============================================================================

#[test]
fn granted_scopes_limited_by_held_scopes() {
    let held = ScopeSet::from_scopes(&["bar:*"]).unwrap();
    let granted = ScopeSet::from_scopes(&["foo:x", "bar:x"]).unwrap();
    assert_eq!(held.intersection(&granted).as_slice(), ["bar:x"]);
}

#[test]
fn role_requirements_end_to_end() {
    let mut roles = RoleScopes::new();
    roles
        .define("reader", RoleDefinition::new(["queue:get-task"]))
        .unwrap();
    roles
        .define(
            "operator",
            RoleDefinition::new(["queue:*", "auth:credentials"]).inheriting("reader"),
        )
        .unwrap();

    let requirement: ScopeExpression =
        serde_json::from_str(r#"[["queue:create-task", "auth:credentials"], ["admin"]]"#).unwrap();

    assert!(roles.grants("operator", &requirement).unwrap());
    assert!(!roles.grants("reader", &requirement).unwrap());
}
