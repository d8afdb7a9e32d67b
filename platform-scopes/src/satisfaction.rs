//! # Satisfaction
//!
//! The core authorization predicate: does a held scope collection satisfy a
//! requirement written in disjunctive normal form?
//!
//! A requirement is an array of conjunctions. For example
//! `[["a", "b"], ["c"]]` is satisfied if either
//!
//! 1. both `a` and `b` are covered, or
//! 2. `c` is covered.

use tracing::trace;

use crate::error::ScopeResult;
use crate::scope::covers;
use crate::validate::{validate_expression, validate_scopes};

/// Check whether `held` satisfies the DNF requirement `expression`.
///
/// An empty conjunction is satisfied trivially. An expression with no
/// conjunctions is never satisfied.
///
/// # Errors
///
/// Returns a [`ValidationError`](crate::ValidationError) if any held scope or
/// required scope is malformed. Validation runs before any matching.
///
/// # Example
///
/// ```
/// use platform_scopes::scope_satisfies;
///
/// let held = ["queue:*", "auth:credentials"];
/// assert!(scope_satisfies(&held, &[vec!["queue:create-task", "auth:credentials"]]).unwrap());
/// assert!(!scope_satisfies(&held, &[vec!["secrets:get"]]).unwrap());
/// ```
pub fn scope_satisfies<H, C, S>(held: &[H], expression: &[C]) -> ScopeResult<bool>
where
    H: AsRef<str>,
    C: AsRef<[S]>,
    S: AsRef<str>,
{
    validate_expression(expression)?;
    validate_scopes(held)?;

    let satisfied = satisfied_by(held, expression);

    trace!(
        held = held.len(),
        conjunctions = expression.len(),
        satisfied_by = ?satisfied,
        "Evaluated scope requirement"
    );

    Ok(satisfied.is_some())
}

/// Index of the first conjunction `held` satisfies. Inputs must be valid.
pub(crate) fn satisfied_by<H, C, S>(held: &[H], expression: &[C]) -> Option<usize>
where
    H: AsRef<str>,
    C: AsRef<[S]>,
    S: AsRef<str>,
{
    expression.iter().position(|conjunction| {
        conjunction
            .as_ref()
            .iter()
            .all(|required| is_covered(held, required.as_ref()))
    })
}

/// Check whether any pattern in `held` covers `scope`.
pub(crate) fn is_covered<H: AsRef<str>>(held: &[H], scope: &str) -> bool {
    held.iter().any(|pattern| covers(pattern.as_ref(), scope))
}
