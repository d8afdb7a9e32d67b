//! # Scopes
//!
//! A scope is a printable-ASCII permission token such as `queue:create-task`.
//! A scope ending in `*` is a wildcard: it covers every scope that starts with
//! the text before the `*`, including that text itself. A `*` anywhere else is
//! an ordinary character.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::ordering::compare_scopes;
use crate::validate::is_valid_scope;

/// The wildcard marker. Only meaningful as the final character of a scope.
pub const WILDCARD: char = '*';

/// Check whether a scope is a wildcard (ends in `*`).
pub fn is_wildcard(scope: &str) -> bool {
    scope.ends_with(WILDCARD)
}

/// Check whether `pattern` covers `scope`.
///
/// A pattern covers a scope if the two are equal, or if the pattern is a
/// wildcard whose prefix is a byte-wise prefix of the scope. Matching is over
/// the whole string; `:` separators have no special meaning.
///
/// # Example
///
/// ```
/// use platform_scopes::scope::covers;
///
/// assert!(covers("foo:*", "foo:bar"));
/// assert!(covers("*", "anything"));
/// assert!(!covers("foo:*:bing", "foo:bar:bing"));
/// assert!(!covers("*:bar", "foo:bar"));
/// assert!(!covers("foo:", "foo:bar"));
/// ```
pub fn covers(pattern: &str, scope: &str) -> bool {
    if pattern == scope {
        return true;
    }
    match pattern.strip_suffix(WILDCARD) {
        Some(prefix) => scope.starts_with(prefix),
        None => false,
    }
}

/// A validated scope.
///
/// Construction fails for strings containing anything other than printable
/// ASCII, so every `Scope` is safe to hand to the algebra.
///
/// # Example
///
/// ```
/// use platform_scopes::Scope;
///
/// let scope: Scope = "queue:*".parse().unwrap();
/// assert!(scope.is_wildcard());
/// assert_eq!(scope.prefix(), Some("queue:"));
/// assert!(scope.covers("queue:create-task"));
///
/// assert!("bad\nscope".parse::<Scope>().is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Scope(String);

impl Scope {
    /// Create a scope, validating its syntax.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidScope`] if the scope contains bytes
    /// outside 0x20-0x7E.
    pub fn new(scope: impl Into<String>) -> Result<Self, ValidationError> {
        let scope = scope.into();
        if is_valid_scope(&scope) {
            Ok(Self(scope))
        } else {
            Err(ValidationError::InvalidScope { index: 0, scope })
        }
    }

    /// The universal wildcard `*`, which covers every scope.
    pub fn any() -> Self {
        Self(WILDCARD.to_string())
    }

    /// Get the scope as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the scope, returning the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Check if this scope ends in `*`.
    pub fn is_wildcard(&self) -> bool {
        is_wildcard(&self.0)
    }

    /// The prefix a wildcard covers, or `None` for a concrete scope.
    pub fn prefix(&self) -> Option<&str> {
        self.0.strip_suffix(WILDCARD)
    }

    /// Check if this scope covers another.
    pub fn covers(&self, scope: &str) -> bool {
        covers(&self.0, scope)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scopes order canonically (see [`compare_scopes`]), not lexicographically.
impl Ord for Scope {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_scopes(&self.0, &other.0)
    }
}

impl PartialOrd for Scope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AsRef<str> for Scope {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Scope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Scope {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Scope {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.0
    }
}
