//! # Platform Scopes
//!
//! This crate provides the scope algebra behind authorization decisions on
//! the Relay platform, shared across Verity, NoteMan, and ShipCheck.
//!
//! ## Overview
//!
//! A **scope** is a printable-ASCII permission token such as
//! `queue:create-task`. A scope ending in `*` is a **wildcard** covering every
//! scope that starts with the text before the `*`:
//!
//! ```text
//! queue:*       covers  queue:create-task, queue:, queue:*
//! *             covers  everything
//! queue:*:get   covers  only itself (inner stars are literal)
//! ```
//!
//! The platform-scopes crate handles:
//! - **Validation**: scope syntax, collections, and DNF expressions
//! - **Satisfaction**: does a held collection meet a requirement?
//! - **Ordering**: a canonical order that keeps wildcards next to what they cover
//! - **Union**: minimal canonical union of scope collections
//! - **Intersection**: scopes covered by both of two collections
//! - **Roles**: effective scopes of roles built from inherited sources
//!
//! ## Usage
//!
//! ```rust
//! use platform_scopes::{scope_intersection, scope_satisfies, scope_union};
//!
//! // Requirements are in disjunctive normal form: an OR of ANDs.
//! let held = ["queue:*", "auth:credentials"];
//! let required = [vec!["queue:create-task", "auth:credentials"]];
//! assert!(scope_satisfies(&held, &required).unwrap());
//!
//! // Union drops redundant scopes.
//! let union = scope_union(&["queue:create-task"], &["queue:*"]).unwrap();
//! assert_eq!(union, vec!["queue:*"]);
//!
//! // Intersection keeps what both sides cover.
//! let granted = scope_intersection(&["bar:*"], &["foo:x", "bar:x"]).unwrap();
//! assert_eq!(granted, vec!["bar:x"]);
//! ```
//!
//! ## Typed API
//!
//! [`Scope`], [`ScopeSet`], and [`ScopeExpression`] validate on construction
//! and deserialization, so code holding them no longer needs to handle
//! validation errors.
//!
//! ## Errors
//!
//! Every free function validates its input eagerly and returns
//! [`ValidationError`] before doing any other work.

pub mod config;
pub mod error;
pub mod expression;
pub mod ordering;
pub mod roles;
pub mod satisfaction;
pub mod scope;
pub mod scope_set;
pub mod sets;
pub mod validate;

// Re-export main types for convenience
pub use config::ScopeConfig;
pub use error::{ConfigError, RoleError, ScopeResult, ValidationError};
pub use expression::ScopeExpression;
pub use ordering::compare_scopes;
pub use roles::{RoleDefinition, RoleScopes};
pub use satisfaction::scope_satisfies;
pub use scope::{covers, Scope};
pub use scope_set::ScopeSet;
pub use sets::{merge_normalized, normalize, scope_intersection, scope_union};
pub use validate::{is_valid_scope, validate_expression, validate_scopes};
