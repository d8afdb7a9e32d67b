//! # Scope Expressions
//!
//! Typed DNF requirements. A [`ScopeExpression`] is an OR of conjunctions,
//! each conjunction an AND of scopes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ScopeResult;
use crate::satisfaction::scope_satisfies;
use crate::scope::Scope;
use crate::validate::validate_expression;

/// A scope requirement in disjunctive normal form.
///
/// Serializes as an array of arrays of strings, e.g.
/// `[["queue:create-task", "auth:credentials"], ["admin"]]`.
///
/// # Example
///
/// ```
/// use platform_scopes::{ScopeExpression, ScopeSet};
///
/// let requirement = ScopeExpression::all_of(["queue:create-task", "auth:credentials"])
///     .unwrap()
///     .or(ScopeExpression::all_of(["admin"]).unwrap());
/// assert_eq!(
///     requirement.to_string(),
///     "(queue:create-task AND auth:credentials) OR (admin)"
/// );
///
/// let held = ScopeSet::from_scopes(&["queue:*", "auth:credentials"]).unwrap();
/// assert!(held.satisfies(&requirement));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeExpression {
    conjunctions: Vec<Vec<Scope>>,
}

impl ScopeExpression {
    /// An expression with no conjunctions. Never satisfied.
    pub fn never() -> Self {
        Self::default()
    }

    /// An expression with a single empty conjunction. Always satisfied.
    pub fn always() -> Self {
        Self {
            conjunctions: vec![Vec::new()],
        }
    }

    /// Require every one of `scopes`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any scope is malformed.
    pub fn all_of<I, S>(scopes: I) -> ScopeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let conjunction = scopes
            .into_iter()
            .map(Scope::new)
            .collect::<ScopeResult<Vec<_>>>()?;
        Ok(Self {
            conjunctions: vec![conjunction],
        })
    }

    /// Require any one of `scopes`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any scope is malformed.
    pub fn any_of<I, S>(scopes: I) -> ScopeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let conjunctions = scopes
            .into_iter()
            .map(|scope| Scope::new(scope).map(|scope| vec![scope]))
            .collect::<ScopeResult<Vec<_>>>()?;
        Ok(Self { conjunctions })
    }

    /// Build an expression from raw conjunctions.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first malformed scope.
    pub fn from_conjunctions<C, S>(conjunctions: &[C]) -> ScopeResult<Self>
    where
        C: AsRef<[S]>,
        S: AsRef<str>,
    {
        validate_expression(conjunctions)?;
        let conjunctions = conjunctions
            .iter()
            .map(|conjunction| {
                conjunction
                    .as_ref()
                    .iter()
                    .map(|scope| Scope::new(scope.as_ref()))
                    .collect::<ScopeResult<Vec<_>>>()
            })
            .collect::<ScopeResult<Vec<_>>>()?;
        Ok(Self { conjunctions })
    }

    /// Combine two expressions: satisfied if either one is.
    pub fn or(mut self, other: ScopeExpression) -> Self {
        self.conjunctions.extend(other.conjunctions);
        self
    }

    /// The conjunctions of this expression.
    pub fn conjunctions(&self) -> &[Vec<Scope>] {
        &self.conjunctions
    }

    /// Check if this expression can never be satisfied.
    pub fn is_never(&self) -> bool {
        self.conjunctions.is_empty()
    }

    /// Check whether `held` satisfies this expression.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any held scope is malformed.
    pub fn is_satisfied_by<H: AsRef<str>>(&self, held: &[H]) -> ScopeResult<bool> {
        scope_satisfies(held, self.conjunctions.as_slice())
    }
}

impl fmt::Display for ScopeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conjunctions.is_empty() {
            return f.write_str("<never>");
        }
        for (i, conjunction) in self.conjunctions.iter().enumerate() {
            if i > 0 {
                f.write_str(" OR ")?;
            }
            f.write_str("(")?;
            for (j, scope) in conjunction.iter().enumerate() {
                if j > 0 {
                    f.write_str(" AND ")?;
                }
                write!(f, "{}", scope)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_and_always() {
        assert!(ScopeExpression::never().is_never());
        assert!(!ScopeExpression::never().is_satisfied_by(&["*"]).unwrap());
        assert!(ScopeExpression::always().is_satisfied_by::<&str>(&[]).unwrap());
        assert_eq!(ScopeExpression::never().to_string(), "<never>");
        assert_eq!(ScopeExpression::always().to_string(), "()");
    }

    #[test]
    fn test_any_of() {
        let expr = ScopeExpression::any_of(["foo:x", "bar:x"]).unwrap();
        assert_eq!(expr.conjunctions().len(), 2);
        assert!(expr.is_satisfied_by(&["bar:*"]).unwrap());
        assert!(!expr.is_satisfied_by(&["baz:*"]).unwrap());
    }

    #[test]
    fn test_all_of_rejects_invalid() {
        assert!(ScopeExpression::all_of(["ok", "not\nok"]).is_err());
    }

    #[test]
    fn test_from_conjunctions() {
        let expr = ScopeExpression::from_conjunctions(&[vec!["a", "b"], vec!["c"]]).unwrap();
        assert_eq!(expr.to_string(), "(a AND b) OR (c)");

        let err = ScopeExpression::from_conjunctions(&[vec!["a"], vec!["\u{1f6c7}"]]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SCOPE_EXPRESSION");
    }

    #[test]
    fn test_serde_round_trip_shape() {
        let expr: ScopeExpression =
            serde_json::from_str(r#"[["queue:create-task","auth:credentials"],[]]"#).unwrap();
        assert_eq!(expr.conjunctions().len(), 2);
        assert!(expr.is_satisfied_by::<&str>(&[]).unwrap());
        assert_eq!(
            serde_json::to_string(&expr).unwrap(),
            r#"[["queue:create-task","auth:credentials"],[]]"#
        );

        let bad: Result<ScopeExpression, _> = serde_json::from_str(r#"[["ok"],["a\u0000"]]"#);
        assert!(bad.is_err());
    }
}
