//! Role scope resolution
//!
//! A role grants scopes directly and by inheriting from other roles. The
//! effective scopes of a role are the normalized union of its own scopes,
//! the effective scopes of every role it inherits from, and any default
//! scopes granted to all roles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::RoleError;
use crate::expression::ScopeExpression;
use crate::scope_set::ScopeSet;
use crate::validate::validate_scopes;

/// The scope sources of a single role.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleDefinition {
    /// Scopes granted directly by this role.
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Roles whose effective scopes this role also grants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inherits: Vec<String>,
}

impl RoleDefinition {
    /// Create a role granting the given scopes.
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scopes: scopes.into_iter().map(Into::into).collect(),
            inherits: Vec::new(),
        }
    }

    /// Also grant the effective scopes of `role`.
    pub fn inheriting(mut self, role: impl Into<String>) -> Self {
        self.inherits.push(role.into());
        self
    }
}

/// A registry of role definitions.
///
/// # Example
///
/// ```
/// use platform_scopes::{RoleDefinition, RoleScopes, ScopeExpression};
///
/// let mut roles = RoleScopes::new();
/// roles.define("viewer", RoleDefinition::new(["queue:list-tasks", "queue:get-task"])).unwrap();
/// roles.define("operator", RoleDefinition::new(["queue:*"]).inheriting("viewer")).unwrap();
///
/// let effective = roles.effective_scopes("operator").unwrap();
/// assert_eq!(effective.as_slice(), ["queue:*"]);
///
/// let requirement = ScopeExpression::all_of(["queue:create-task"]).unwrap();
/// assert!(roles.grants("operator", &requirement).unwrap());
/// assert!(!roles.grants("viewer", &requirement).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoleScopes {
    roles: BTreeMap<String, RoleDefinition>,
    default_scopes: ScopeSet,
}

impl RoleScopes {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `scopes` to every role.
    pub fn with_default_scopes(mut self, scopes: ScopeSet) -> Self {
        self.default_scopes = scopes;
        self
    }

    /// Define (or replace) a role.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::InvalidScope`] if any directly granted scope is
    /// malformed. Inherited roles are checked when scopes are resolved.
    pub fn define(&mut self, name: impl Into<String>, definition: RoleDefinition) -> Result<(), RoleError> {
        let name = name.into();
        validate_scopes(&definition.scopes).map_err(|source| RoleError::InvalidScope {
            role: name.clone(),
            source,
        })?;
        self.roles.insert(name, definition);
        Ok(())
    }

    /// Get a role definition.
    pub fn get(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.get(name)
    }

    /// Names of all defined roles, in sorted order.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    /// Get the count of defined roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if no roles are defined.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Compute the effective scopes of a role.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError::UnknownRole`] if the role, or any role it
    /// inherits from, is not defined, and [`RoleError::InheritanceCycle`] if
    /// inheritance loops.
    pub fn effective_scopes(&self, role: &str) -> Result<ScopeSet, RoleError> {
        let scopes = self
            .resolve(role, &mut Vec::new(), &mut BTreeMap::new())?
            .union(&self.default_scopes);
        debug!(role = %role, scopes = scopes.len(), "Resolved effective role scopes");
        Ok(scopes)
    }

    /// Check whether a role's effective scopes satisfy a requirement.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`RoleScopes::effective_scopes`].
    pub fn grants(&self, role: &str, requirement: &ScopeExpression) -> Result<bool, RoleError> {
        Ok(self.effective_scopes(role)?.satisfies(requirement))
    }

    /// Compute the effective scopes of every defined role.
    ///
    /// Each role is resolved once, however many roles inherit from it.
    ///
    /// # Errors
    ///
    /// Returns the first error [`RoleScopes::effective_scopes`] would return
    /// for any role.
    pub fn resolve_all(&self) -> Result<BTreeMap<String, ScopeSet>, RoleError> {
        let mut resolved = BTreeMap::new();
        for name in self.roles.keys() {
            self.resolve(name, &mut Vec::new(), &mut resolved)?;
        }
        let all: BTreeMap<String, ScopeSet> = resolved
            .into_iter()
            .map(|(name, scopes)| {
                let scopes = scopes.union(&self.default_scopes);
                (name, scopes)
            })
            .collect();
        debug!(roles = all.len(), "Resolved effective scopes of all roles");
        Ok(all)
    }

    fn resolve(
        &self,
        role: &str,
        path: &mut Vec<String>,
        resolved: &mut BTreeMap<String, ScopeSet>,
    ) -> Result<ScopeSet, RoleError> {
        if let Some(scopes) = resolved.get(role) {
            return Ok(scopes.clone());
        }
        if let Some(start) = path.iter().position(|r| r == role) {
            let mut cycle = path[start..].to_vec();
            cycle.push(role.to_string());
            warn!(cycle = ?cycle, "Role inheritance cycle detected");
            return Err(RoleError::InheritanceCycle(cycle));
        }
        let definition = self
            .roles
            .get(role)
            .ok_or_else(|| RoleError::UnknownRole(role.to_string()))?;

        let mut scopes =
            ScopeSet::from_scopes(&definition.scopes).map_err(|source| RoleError::InvalidScope {
                role: role.to_string(),
                source,
            })?;

        path.push(role.to_string());
        for parent in &definition.inherits {
            scopes = scopes.union(&self.resolve(parent, path, resolved)?);
        }
        path.pop();

        resolved.insert(role.to_string(), scopes.clone());
        Ok(scopes)
    }
}
