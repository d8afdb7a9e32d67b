//! # Canonical Ordering
//!
//! A total order over scopes in which every wildcard sorts immediately before
//! the run of scopes it covers. With this order a single left-to-right scan
//! can tell whether an earlier wildcard already covers the current entry,
//! which keeps normalization and merging linear.
//!
//! The order is byte-lexicographic, except that a trailing `*` sorts before
//! everything, including the end of the other string:
//!
//! ```text
//! bar < foo:* < foo: < foo:bar < foo:bar:* < foo:bar:baz < foo:c
//! ```

use std::cmp::Ordering;
use std::iter;

use crate::scope::WILDCARD;

/// One position of a scope as seen by the comparator.
///
/// Variant order is significant: a trailing wildcard sorts before the end of
/// a concrete scope, which sorts before any further byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Symbol {
    Wildcard,
    End,
    Byte(u8),
}

fn symbols(scope: &str) -> impl Iterator<Item = Symbol> + '_ {
    let (body, tail) = match scope.strip_suffix(WILDCARD) {
        Some(prefix) => (prefix, Symbol::Wildcard),
        None => (scope, Symbol::End),
    };
    body.bytes().map(Symbol::Byte).chain(iter::once(tail))
}

/// Compare two scopes in canonical order.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use platform_scopes::ordering::compare_scopes;
///
/// assert_eq!(compare_scopes("foo:*", "foo:"), Ordering::Less);
/// assert_eq!(compare_scopes("foo:*", "foo:anything"), Ordering::Less);
/// assert_eq!(compare_scopes("foo:", "foo:anything"), Ordering::Less);
/// assert_eq!(compare_scopes("foo:*", "foo:*"), Ordering::Equal);
/// ```
pub fn compare_scopes(a: &str, b: &str) -> Ordering {
    symbols(a).cmp(symbols(b))
}

/// Sort scopes into canonical order, in place.
pub fn sort_scopes<S: AsRef<str>>(scopes: &mut [S]) {
    scopes.sort_by(|a, b| compare_scopes(a.as_ref(), b.as_ref()));
}

/// Check whether scopes are in canonical (non-decreasing) order.
///
/// Returns the index of the first entry that sorts before its predecessor.
pub(crate) fn first_unsorted<S: AsRef<str>>(scopes: &[S]) -> Option<usize> {
    scopes
        .windows(2)
        .position(|pair| compare_scopes(pair[0].as_ref(), pair[1].as_ref()) == Ordering::Greater)
        .map(|i| i + 1)
}
