//! Error types for scope operations
//!
//! This module defines the errors raised when scope input is malformed,
//! when role scopes cannot be resolved, and when configuration is invalid.

use thiserror::Error;

/// Validation error for scope input.
///
/// Every scope algebra operation validates its arguments eagerly and fails
/// with this error before doing any matching, merging, or intersection work.
/// There is no partial success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A scope in a collection contains bytes outside printable ASCII
    #[error("scopes must be an array of strings: invalid scope {scope:?} at index {index}")]
    InvalidScope {
        /// Position of the offending scope in the collection.
        index: usize,
        /// The offending scope.
        scope: String,
    },

    /// A scope in a DNF expression contains bytes outside printable ASCII
    #[error(
        "scopes must be an array of arrays of strings (disjunctive normal form): \
         invalid scope {scope:?} in conjunction {conjunction} at index {index}"
    )]
    InvalidExpression {
        /// Position of the conjunction within the expression.
        conjunction: usize,
        /// Position of the scope within the conjunction.
        index: usize,
        /// The offending scope.
        scope: String,
    },

    /// Input that must be in canonical order is not
    #[error("scopes must be sorted in canonical order: entry {index} sorts before its predecessor")]
    Unsorted {
        /// Position of the first out-of-order entry.
        index: usize,
    },
}

/// Result type for scope operations.
pub type ScopeResult<T> = Result<T, ValidationError>;

impl ValidationError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidScope { .. } => "INVALID_SCOPE",
            ValidationError::InvalidExpression { .. } => "INVALID_SCOPE_EXPRESSION",
            ValidationError::Unsorted { .. } => "UNSORTED_SCOPES",
        }
    }
}

/// Errors raised while resolving the effective scopes of a role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// The role (or a role it inherits from) is not defined
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Role inheritance loops back on itself
    #[error("Role inheritance cycle: {}", .0.join(" -> "))]
    InheritanceCycle(Vec<String>),

    /// A role definition contains an invalid scope
    #[error("Invalid scope in role {role}: {source}")]
    InvalidScope {
        /// Role holding the invalid scope.
        role: String,
        /// Underlying validation failure.
        #[source]
        source: ValidationError,
    },
}

impl RoleError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RoleError::UnknownRole(_) => "UNKNOWN_ROLE",
            RoleError::InheritanceCycle(_) => "ROLE_INHERITANCE_CYCLE",
            RoleError::InvalidScope { .. } => "INVALID_ROLE_SCOPE",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration could not be parsed.
    #[error("Invalid scope configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },

    /// A configured scope is malformed.
    #[error("Invalid scope in configuration {key}: {source}")]
    InvalidScope {
        /// Configuration key holding the scope.
        key: String,
        /// Underlying validation failure.
        #[source]
        source: ValidationError,
    },

    /// Configured roles cannot be resolved.
    #[error("Invalid role configuration: {0}")]
    Role(#[from] RoleError),
}

impl ConfigError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::InvalidScope { .. } => "CONFIG_INVALID_SCOPE",
            ConfigError::Role(_) => "CONFIG_INVALID_ROLE",
        }
    }
}
