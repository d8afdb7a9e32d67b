//! # Scope Sets
//!
//! [`ScopeSet`] is a normalized scope collection: duplicate-free, minimal
//! (no member covers another), and in canonical order. Any two sets covering
//! the same scopes through the same wildcards compare equal.

use serde::{Deserialize, Serialize};

use crate::error::{ScopeResult, ValidationError};
use crate::expression::ScopeExpression;
use crate::satisfaction::{is_covered, satisfied_by};
use crate::scope::Scope;
use crate::sets::{intersect, merge_sorted, normalize_sorted, sorted};
use crate::validate::validate_scopes;

/// A normalized set of scopes, such as the scopes a client holds or a role
/// grants.
///
/// # Example
///
/// ```
/// use platform_scopes::ScopeSet;
///
/// let mut set = ScopeSet::from_scopes(&["queue:create-task", "queue:*"]).unwrap();
/// assert_eq!(set.len(), 1);
/// assert!(set.covers("queue:delete-task"));
///
/// set.insert("auth:credentials".parse().unwrap());
/// assert_eq!(set.as_slice(), ["auth:credentials", "queue:*"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ScopeSet {
    /// Normalized scopes in canonical order.
    scopes: Vec<String>,
}

impl ScopeSet {
    /// Create a new empty scope set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding only the universal wildcard `*`.
    pub fn any() -> Self {
        Self {
            scopes: vec![Scope::any().into_string()],
        }
    }

    /// Create a set from scopes in any order, normalizing them.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidScope`] for the first malformed scope.
    pub fn from_scopes<S: AsRef<str>>(scopes: &[S]) -> ScopeResult<Self> {
        validate_scopes(scopes)?;
        Ok(Self {
            scopes: normalize_sorted(&sorted(scopes)),
        })
    }

    /// Add a scope to the set.
    ///
    /// Members the new scope covers are removed; if the set already covers
    /// it, nothing changes.
    pub fn insert(&mut self, scope: Scope) {
        if self.covers(scope.as_str()) {
            return;
        }
        self.scopes = merge_sorted(&self.scopes, &[scope]);
    }

    /// Check if any member of the set covers `scope`.
    pub fn covers(&self, scope: &str) -> bool {
        is_covered(&self.scopes, scope)
    }

    /// Check whether this set satisfies a requirement.
    pub fn satisfies(&self, expression: &ScopeExpression) -> bool {
        satisfied_by(&self.scopes, expression.conjunctions()).is_some()
    }

    /// Check whether this set covers every member of `other`.
    pub fn is_superset_of(&self, other: &ScopeSet) -> bool {
        other.scopes.iter().all(|scope| self.covers(scope))
    }

    /// The normalized union of two sets.
    pub fn union(&self, other: &ScopeSet) -> ScopeSet {
        Self {
            scopes: merge_sorted(&self.scopes, &other.scopes),
        }
    }

    /// The normalized intersection of two sets.
    ///
    /// See [`scope_intersection`](crate::scope_intersection) for the pairwise
    /// rule.
    pub fn intersection(&self, other: &ScopeSet) -> ScopeSet {
        Self {
            scopes: normalize_sorted(&intersect(&self.scopes, &other.scopes)),
        }
    }

    /// Iterate over the scopes in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    /// The scopes in canonical order.
    pub fn as_slice(&self) -> &[String] {
        &self.scopes
    }

    /// Get the count of scopes.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Consume the set, returning its scopes in canonical order.
    pub fn into_vec(self) -> Vec<String> {
        self.scopes
    }
}

impl TryFrom<Vec<String>> for ScopeSet {
    type Error = ValidationError;

    fn try_from(scopes: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_scopes(&scopes)
    }
}

impl From<ScopeSet> for Vec<String> {
    fn from(set: ScopeSet) -> Self {
        set.scopes
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<T: IntoIterator<Item = Scope>>(iter: T) -> Self {
        let mut scopes: Vec<Scope> = iter.into_iter().collect();
        scopes.sort();
        Self {
            scopes: normalize_sorted(&scopes),
        }
    }
}

impl Extend<Scope> for ScopeSet {
    fn extend<T: IntoIterator<Item = Scope>>(&mut self, iter: T) {
        let other: ScopeSet = iter.into_iter().collect();
        *self = self.union(&other);
    }
}
