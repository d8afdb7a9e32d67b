//! # Scope Set Operations
//!
//! Union and intersection of scope collections.
//!
//! Union works on canonically sorted input (see [`crate::ordering`]) so that
//! redundancy can be removed in one linear pass: every scope covered by a
//! wildcard sorts directly after that wildcard, so tracking the most recent
//! kept wildcard is enough to spot covered entries.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::{ScopeResult, ValidationError};
use crate::ordering::{compare_scopes, first_unsorted, sort_scopes};
use crate::scope::{covers, is_wildcard, WILDCARD};
use crate::validate::validate_scopes;

/// Running state of a normalizing scan over canonically sorted scopes.
#[derive(Debug)]
struct Normalizer {
    output: Vec<String>,
    /// Index into `output` of the most recently kept wildcard.
    wildcard: Option<usize>,
}

impl Normalizer {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            wildcard: None,
        }
    }

    /// Keep `scope` unless it duplicates the last kept scope or is covered by
    /// the current wildcard. Scopes must arrive in canonical order.
    fn push(&mut self, scope: &str) {
        if let Some(i) = self.wildcard {
            if covers(&self.output[i], scope) {
                return;
            }
        }
        if self.output.last().is_some_and(|last| last == scope) {
            return;
        }
        if is_wildcard(scope) {
            self.wildcard = Some(self.output.len());
        }
        self.output.push(scope.to_string());
    }

    fn finish(self) -> Vec<String> {
        self.output
    }
}

fn validate_sorted<S: AsRef<str>>(scopes: &[S]) -> ScopeResult<()> {
    validate_scopes(scopes)?;
    match first_unsorted(scopes) {
        Some(index) => Err(ValidationError::Unsorted { index }),
        None => Ok(()),
    }
}

/// Reduce canonically sorted scopes to their minimal form.
///
/// Drops duplicates and every scope covered by an earlier wildcard. The result
/// stays in canonical order and covers exactly what the input covers.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidScope`] for malformed scopes and
/// [`ValidationError::Unsorted`] if the input is not in canonical order.
///
/// # Example
///
/// ```
/// use platform_scopes::normalize;
///
/// let scopes = ["a", "foo:*", "foo:", "foo:bar", "foo:bar:*", "fop"];
/// assert_eq!(normalize(&scopes).unwrap(), vec!["a", "foo:*", "fop"]);
/// ```
pub fn normalize<S: AsRef<str>>(sorted: &[S]) -> ScopeResult<Vec<String>> {
    validate_sorted(sorted)?;
    Ok(normalize_sorted(sorted))
}

/// Normalize scopes already known to be valid and sorted.
pub(crate) fn normalize_sorted<S: AsRef<str>>(sorted: &[S]) -> Vec<String> {
    let mut normalizer = Normalizer::with_capacity(sorted.len());
    for scope in sorted {
        normalizer.push(scope.as_ref());
    }
    normalizer.finish()
}

/// Merge two normalized scope collections into their normalized union.
///
/// Interleaves the inputs in canonical order and drops entries from either
/// side that a wildcard from the other side already covers.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidScope`] for malformed scopes and
/// [`ValidationError::Unsorted`] if either input is not in canonical order.
///
/// # Example
///
/// ```
/// use platform_scopes::merge_normalized;
///
/// let merged = merge_normalized(&["a", "c:*"], &["b:*", "c:d"]).unwrap();
/// assert_eq!(merged, vec!["a", "b:*", "c:*"]);
/// ```
pub fn merge_normalized<A, B>(a: &[A], b: &[B]) -> ScopeResult<Vec<String>>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    validate_sorted(a)?;
    validate_sorted(b)?;
    Ok(merge_sorted(a, b))
}

/// Merge scopes already known to be valid and sorted.
pub(crate) fn merge_sorted<A, B>(a: &[A], b: &[B]) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut normalizer = Normalizer::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let (x, y) = (a[i].as_ref(), b[j].as_ref());
        match compare_scopes(x, y) {
            Ordering::Less => {
                normalizer.push(x);
                i += 1;
            }
            Ordering::Greater => {
                normalizer.push(y);
                j += 1;
            }
            Ordering::Equal => {
                normalizer.push(x);
                i += 1;
                j += 1;
            }
        }
    }
    for scope in &a[i..] {
        normalizer.push(scope.as_ref());
    }
    for scope in &b[j..] {
        normalizer.push(scope.as_ref());
    }
    normalizer.finish()
}

/// Compute the minimal canonical union of two scope collections.
///
/// Neither input needs to be sorted. Each is sorted and normalized, then the
/// two are merged.
///
/// # Example
///
/// ```
/// use platform_scopes::scope_union;
///
/// let union = scope_union(&["queue:create-task", "auth:*"], &["queue:*"]).unwrap();
/// assert_eq!(union, vec!["auth:*", "queue:*"]);
/// ```
pub fn scope_union<X, Y>(x: &[X], y: &[Y]) -> ScopeResult<Vec<String>>
where
    X: AsRef<str>,
    Y: AsRef<str>,
{
    validate_scopes(x)?;
    validate_scopes(y)?;

    let x = normalize_sorted(&sorted(x));
    let y = normalize_sorted(&sorted(y));
    Ok(merge_sorted(&x, &y))
}

pub(crate) fn sorted<S: AsRef<str>>(scopes: &[S]) -> Vec<&str> {
    let mut scopes: Vec<&str> = scopes.iter().map(AsRef::as_ref).collect();
    sort_scopes(&mut scopes);
    scopes
}

/// Intersect the scope sets denoted by two individual scopes.
///
/// Returns the single scope denoting their overlap, or `None` if they do not
/// overlap in a way expressible as one scope.
fn intersect_pair<'a>(a: &'a str, b: &'a str) -> Option<&'a str> {
    if a == b {
        return Some(a);
    }
    match (a.strip_suffix(WILDCARD), b.strip_suffix(WILDCARD)) {
        // The wildcard with the longer prefix is the narrower one.
        (Some(pa), Some(pb)) => {
            if pb.starts_with(pa) {
                Some(b)
            } else if pa.starts_with(pb) {
                Some(a)
            } else {
                None
            }
        }
        (Some(pa), None) => b.starts_with(pa).then_some(b),
        (None, Some(pb)) => a.starts_with(pb).then_some(a),
        (None, None) => None,
    }
}

/// Compute the pairwise intersection of two scope collections.
///
/// The result holds, for every pair of scopes drawn from `x` and `y`, the
/// narrower of the two when one covers the other. Wildcards only intersect
/// by prefix containment; `*` in any other position is literal. The result is
/// deduplicated and returned in canonical order.
///
/// # Example
///
/// ```
/// use platform_scopes::scope_intersection;
///
/// let granted = scope_intersection(&["bar:*"], &["foo:x", "bar:x"]).unwrap();
/// assert_eq!(granted, vec!["bar:x"]);
///
/// let all = scope_intersection(&["*"], &["foo:bar", "bar:bing"]).unwrap();
/// assert_eq!(all, vec!["bar:bing", "foo:bar"]);
/// ```
pub fn scope_intersection<X, Y>(x: &[X], y: &[Y]) -> ScopeResult<Vec<String>>
where
    X: AsRef<str>,
    Y: AsRef<str>,
{
    validate_scopes(x)?;
    validate_scopes(y)?;
    Ok(intersect(x, y))
}

/// Intersect scopes already known to be valid.
pub(crate) fn intersect<X, Y>(x: &[X], y: &[Y]) -> Vec<String>
where
    X: AsRef<str>,
    Y: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result: Vec<String> = Vec::new();
    for a in x {
        for b in y {
            if let Some(scope) = intersect_pair(a.as_ref(), b.as_ref()) {
                if seen.insert(scope) {
                    result.push(scope.to_string());
                }
            }
        }
    }
    sort_scopes(&mut result);
    result
}
