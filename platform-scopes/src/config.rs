//! Role scope configuration.
//!
//! Role definitions are loaded from JSON, either directly or from
//! environment variables, and turned into a [`RoleScopes`] registry.
//!
//! ```json
//! {
//!   "default_scopes": ["profile:read"],
//!   "roles": {
//!     "viewer": { "scopes": ["queue:get-task"] },
//!     "admin": { "scopes": ["queue:*"], "inherits": ["viewer"] }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env::VarError;

use crate::error::ConfigError;
use crate::roles::{RoleDefinition, RoleScopes};
use crate::scope_set::ScopeSet;
use crate::validate::validate_scopes;

/// Environment variable holding role definitions as JSON.
pub const ROLES_ENV: &str = "PLATFORM_SCOPE_ROLES";

/// Environment variable holding comma-separated default scopes.
pub const DEFAULT_SCOPES_ENV: &str = "PLATFORM_DEFAULT_SCOPES";

/// Scope configuration for role resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScopeConfig {
    /// Role definitions by role name.
    pub roles: BTreeMap<String, RoleDefinition>,

    /// Scopes granted to every role.
    pub default_scopes: Vec<String>,
}

impl ScopeConfig {
    /// Parse configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PLATFORM_SCOPE_ROLES`: JSON object of role definitions (default: none)
    /// - `PLATFORM_DEFAULT_SCOPES`: comma-separated scopes granted to every
    ///   role, taken verbatim (no trimming, empty entries are the empty scope)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key))
    }

    fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let roles = match read_var(&var, ROLES_ENV)? {
            Some(json) => serde_json::from_str(&json)?,
            None => BTreeMap::new(),
        };
        let default_scopes = read_var(&var, DEFAULT_SCOPES_ENV)?
            .map(|s| parse_scope_list(&s))
            .unwrap_or_default();

        Ok(Self {
            roles,
            default_scopes,
        })
    }

    /// Check every scope and every inherited role reference.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_scopes(&self.default_scopes).map_err(|source| ConfigError::InvalidScope {
            key: "default_scopes".to_string(),
            source,
        })?;
        for (name, role) in &self.roles {
            validate_scopes(&role.scopes).map_err(|source| ConfigError::InvalidScope {
                key: format!("roles.{}.scopes", name),
                source,
            })?;
            if let Some(parent) = role.inherits.iter().find(|p| !self.roles.contains_key(*p)) {
                return Err(ConfigError::InvalidValue {
                    key: format!("roles.{}.inherits", name),
                    message: format!("unknown role {:?}", parent),
                });
            }
        }
        Ok(())
    }

    /// Build a role registry, resolving every role once to reject
    /// inheritance cycles up front.
    pub fn into_role_scopes(self) -> Result<RoleScopes, ConfigError> {
        self.validate()?;

        let default_scopes =
            ScopeSet::from_scopes(&self.default_scopes).map_err(|source| ConfigError::InvalidScope {
                key: "default_scopes".to_string(),
                source,
            })?;
        let mut registry = RoleScopes::new().with_default_scopes(default_scopes);
        for (name, role) in self.roles {
            registry.define(name, role)?;
        }

        registry.resolve_all()?;
        Ok(registry)
    }
}

fn read_var<F>(var: &F, key: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "value is not valid unicode".to_string(),
        }),
    }
}

fn parse_scope_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}
