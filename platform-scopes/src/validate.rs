//! # Validation
//!
//! Syntax checks for scopes, scope collections, and DNF scope expressions.
//! A scope is any string of printable ASCII (0x20-0x7E), including the empty
//! string and space, but no other whitespace or control characters.

use crate::error::{ScopeResult, ValidationError};

/// Check whether a string is a syntactically legal scope.
///
/// # Example
///
/// ```
/// use platform_scopes::validate::is_valid_scope;
///
/// assert!(is_valid_scope("queue:*"));
/// assert!(is_valid_scope(""));
/// assert!(!is_valid_scope("some:garbage\nauth:credentials"));
/// ```
pub fn is_valid_scope(scope: &str) -> bool {
    scope.bytes().all(|b| (0x20..=0x7e).contains(&b))
}

/// Validate a scope collection.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidScope`] naming the first scope that is
/// not valid.
pub fn validate_scopes<S: AsRef<str>>(scopes: &[S]) -> ScopeResult<()> {
    match scopes.iter().position(|s| !is_valid_scope(s.as_ref())) {
        Some(index) => Err(ValidationError::InvalidScope {
            index,
            scope: scopes[index].as_ref().to_string(),
        }),
        None => Ok(()),
    }
}

/// Validate a scope expression in disjunctive normal form.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidExpression`] naming the first scope
/// that is not valid, along with its conjunction.
pub fn validate_expression<C, S>(expression: &[C]) -> ScopeResult<()>
where
    C: AsRef<[S]>,
    S: AsRef<str>,
{
    for (conjunction, scopes) in expression.iter().enumerate() {
        if let Err(ValidationError::InvalidScope { index, scope }) = validate_scopes(scopes.as_ref()) {
            return Err(ValidationError::InvalidExpression {
                conjunction,
                index,
                scope,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_scopes() {
        assert!(is_valid_scope("auth:credentials"));
        assert!(is_valid_scope("queue:*"));
        assert!(is_valid_scope("secrets:garbage:foo bar"));
        assert!(is_valid_scope(""));
        assert!(is_valid_scope("~!@#$%^&()"));
    }

    #[test]
    fn test_invalid_scopes() {
        assert!(!is_valid_scope("some:garbage\nauth:credentials"));
        assert!(!is_valid_scope("some:garbage\0auth:credentials"));
        assert!(!is_valid_scope("tab\there"));
        assert!(!is_valid_scope("halt:\u{1f6c7}"));
        assert!(!is_valid_scope("caf\u{e9}"));
        assert!(!is_valid_scope("del\u{7f}"));
    }

    #[test]
    fn test_validate_scopes() {
        assert!(validate_scopes::<&str>(&[]).is_ok());
        assert!(validate_scopes(&["a", "b:*", ""]).is_ok());

        let err = validate_scopes(&["a", "b\n"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidScope {
                index: 1,
                scope: "b\n".to_string()
            }
        );
    }

    #[test]
    fn test_validate_expression() {
        let empty: [Vec<&str>; 0] = [];
        assert!(validate_expression(&empty).is_ok());
        assert!(validate_expression(&[Vec::<&str>::new()]).is_ok());
        assert!(validate_expression(&[vec!["a", "b"], vec!["c"]]).is_ok());

        let err = validate_expression(&[vec!["a"], vec!["b", "c\0"]]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidExpression {
                conjunction: 1,
                index: 1,
                scope: "c\0".to_string()
            }
        );
    }
}
