use std::env;

use clinaccess_core::{AppError, AppResult};
use clinaccess_domain::{RoleRegistry, SUPERUSER_ROLE_NAME};

/// Environment variable overriding the reserved superuser role name.
pub const SUPERUSER_ROLE_ENV: &str = "CLINACCESS_SUPERUSER_ROLE";

/// Access resolution settings supplied by the embedding system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessConfig {
    superuser_role_name: String,
}

impl AccessConfig {
    /// Creates a configuration reserving `superuser_role_name`.
    pub fn new(superuser_role_name: impl Into<String>) -> AppResult<Self> {
        let superuser_role_name = superuser_role_name.into();
        if superuser_role_name.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "{SUPERUSER_ROLE_ENV} must not be empty"
            )));
        }

        Ok(Self {
            superuser_role_name,
        })
    }

    /// Loads the configuration from process environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        match lookup(SUPERUSER_ROLE_ENV) {
            Some(value) => Self::new(value),
            None => Ok(Self::default()),
        }
    }

    /// Returns the reserved superuser role name.
    #[must_use]
    pub fn superuser_role_name(&self) -> &str {
        self.superuser_role_name.as_str()
    }

    /// Builds an empty role registry reserving the configured superuser name.
    pub fn role_registry(&self) -> AppResult<RoleRegistry> {
        RoleRegistry::new(self.superuser_role_name.as_str())
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            superuser_role_name: SUPERUSER_ROLE_NAME.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clinaccess_core::AppError;
    use clinaccess_domain::{RoleDefinitionInput, SUPERUSER_ROLE_NAME};

    use super::{AccessConfig, SUPERUSER_ROLE_ENV};

    #[test]
    fn missing_variable_falls_back_to_standard_name() {
        let config = AccessConfig::from_lookup(|_| None);
        assert_eq!(
            config
                .map(|value| value.superuser_role_name().to_owned())
                .unwrap_or_default(),
            SUPERUSER_ROLE_NAME
        );
    }

    #[test]
    fn variable_overrides_superuser_name() {
        let config = AccessConfig::from_lookup(|name| {
            (name == SUPERUSER_ROLE_ENV).then(|| "Root".to_owned())
        });
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert_eq!(config.superuser_role_name(), "Root");

        let registry = config.role_registry();
        assert!(registry.is_ok());
        let mut registry = registry.unwrap_or_default();
        let root = registry.define_role(RoleDefinitionInput {
            name: "Root".to_owned(),
            ..RoleDefinitionInput::default()
        });
        assert!(root.map(|role| role.is_superuser()).unwrap_or(false));
    }

    #[test]
    fn blank_variable_is_rejected() {
        let config = AccessConfig::from_lookup(|_| Some("  ".to_owned()));
        assert!(matches!(config, Err(AppError::Validation(_))));
    }
}
