use std::collections::BTreeMap;
use std::sync::Arc;

use clinaccess_core::{AppError, AppResult, NonEmptyString};

use crate::SUPERUSER_ROLE_NAME;
use crate::privilege::Privilege;
use crate::role::Role;

/// Input payload used to define a role in a [`RoleRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDefinitionInput {
    /// Unique role name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Privileges granted directly.
    pub privileges: Vec<Privilege>,
    /// Names of already defined roles this role inherits.
    pub inherited_role_names: Vec<String>,
}

/// Owner of shared role definitions.
///
/// Accounts hold handles into the registry instead of copies. Roles are
/// immutable once defined; a role can only inherit roles defined before it.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    superuser_role_name: String,
    roles: BTreeMap<String, Arc<Role>>,
}

impl RoleRegistry {
    /// Creates an empty registry that reserves `superuser_role_name`.
    pub fn new(superuser_role_name: impl Into<String>) -> AppResult<Self> {
        let superuser_role_name = NonEmptyString::new(superuser_role_name)?;

        Ok(Self {
            superuser_role_name: superuser_role_name.into(),
            roles: BTreeMap::new(),
        })
    }

    /// Returns the reserved superuser role name.
    #[must_use]
    pub fn superuser_role_name(&self) -> &str {
        self.superuser_role_name.as_str()
    }

    /// Defines a new role and returns its shared handle.
    pub fn define_role(&mut self, input: RoleDefinitionInput) -> AppResult<Arc<Role>> {
        let mut role = Role::new_with_superuser_name(input.name, &self.superuser_role_name)?
            .with_description(input.description);

        if self.roles.contains_key(role.name()) {
            return Err(AppError::Conflict(format!(
                "role '{}' is already defined",
                role.name()
            )));
        }

        for inherited_name in &input.inherited_role_names {
            let inherited = self.find_role(inherited_name).ok_or_else(|| {
                AppError::NotFound(format!(
                    "inherited role '{inherited_name}' for role '{}' is not defined",
                    role.name()
                ))
            })?;
            role.inherit_role(inherited);
        }

        for privilege in input.privileges {
            role.grant_privilege(privilege);
        }

        let role = Arc::new(role);
        self.roles
            .insert(role.name().to_owned(), Arc::clone(&role));

        Ok(role)
    }

    /// Finds a role by exact name.
    #[must_use]
    pub fn find_role(&self, name: &str) -> Option<Arc<Role>> {
        self.roles.get(name).cloned()
    }

    /// Returns defined roles ordered by name.
    pub fn roles(&self) -> impl Iterator<Item = &Arc<Role>> {
        self.roles.values()
    }

    /// Returns the number of defined roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns whether no role is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self {
            superuser_role_name: SUPERUSER_ROLE_NAME.to_owned(),
            roles: BTreeMap::new(),
        }
    }
}
