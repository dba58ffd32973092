use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use clinaccess_core::{AccountId, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::name_match::{names_match_exact, names_match_ignoring_case};
use crate::privilege::Privilege;
use crate::role::Role;

/// Whether a role check lets a superuser role satisfy any role name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuperuserOverride {
    /// A superuser holds every role.
    #[default]
    Apply,
    /// Only real membership counts, even for superusers.
    Ignore,
}

/// Account whose role membership drives access decisions.
///
/// Membership is keyed by exact role name, so an account never holds two
/// roles with the same name. Role definitions are shared handles; removing a
/// role from one account does not affect any other holder.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    username: NonEmptyString,
    roles: BTreeMap<String, Arc<Role>>,
}

impl Account {
    /// Creates an account without roles.
    pub fn new(id: AccountId, username: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            username: NonEmptyString::new(username)?,
            roles: BTreeMap::new(),
        })
    }

    /// Returns the account identifier.
    #[must_use]
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Adds a role. Returns `false` and keeps the held role when one with the
    /// same name is already present.
    pub fn add_role(&mut self, role: Arc<Role>) -> bool {
        match self.roles.entry(role.name().to_owned()) {
            Entry::Vacant(entry) => {
                entry.insert(role);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Removes the role with the same name. Returns `false` when absent.
    pub fn remove_role(&mut self, role: &Role) -> bool {
        self.roles.remove(role.name()).is_some()
    }

    /// Returns directly held roles ordered by name.
    pub fn roles(&self) -> impl Iterator<Item = &Arc<Role>> {
        self.roles.values()
    }

    /// Returns the number of directly held roles.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Returns whether the account holds the role, treating superusers as
    /// holding every role.
    #[must_use]
    pub fn has_role(&self, name: &str) -> bool {
        self.has_role_with(name, SuperuserOverride::Apply)
    }

    /// Returns whether the account holds the role named exactly `name`,
    /// directly or through inheritance.
    ///
    /// With [`SuperuserOverride::Apply`] a superuser account holds every
    /// role. With [`SuperuserOverride::Ignore`] only membership counts.
    #[must_use]
    pub fn has_role_with(&self, name: &str, superuser_override: SuperuserOverride) -> bool {
        if superuser_override == SuperuserOverride::Apply && self.is_super_user() {
            return true;
        }

        self.roles
            .values()
            .any(|role| names_match_exact(role.name(), name) || role.inherits_role(name))
    }

    /// Returns whether a directly held role matches `name` ignoring case.
    ///
    /// Meant for membership inspection. It never applies the superuser
    /// override and never follows inheritance, so it must not gate access.
    #[must_use]
    pub fn contains_role(&self, name: &str) -> bool {
        self.roles
            .values()
            .any(|role| names_match_ignoring_case(role.name(), name))
    }

    /// Returns whether a directly held role carries the superuser marker.
    #[must_use]
    pub fn is_super_user(&self) -> bool {
        self.roles.values().any(|role| role.is_superuser())
    }

    /// Returns whether the account holds the privilege named exactly `name`.
    ///
    /// Superusers hold every privilege. Otherwise some held role, or a role
    /// it inherits, must grant it explicitly; inheriting the superuser role
    /// grants nothing extra. An account without roles holds nothing.
    #[must_use]
    pub fn has_privilege(&self, name: &str) -> bool {
        if self.is_super_user() {
            return true;
        }

        self.roles.values().any(|role| role.grants_privilege(name))
    }

    /// Returns held roles together with every role they inherit, each once.
    #[must_use]
    pub fn all_roles(&self) -> Vec<Arc<Role>> {
        let mut collected: BTreeMap<String, Arc<Role>> = BTreeMap::new();

        for role in self.roles.values() {
            collected
                .entry(role.name().to_owned())
                .or_insert_with(|| Arc::clone(role));

            for inherited in role.all_inherited_roles() {
                collected
                    .entry(inherited.name().to_owned())
                    .or_insert(inherited);
            }
        }

        collected.into_values().collect()
    }

    /// Returns every privilege granted by [`Account::all_roles`], ordered by name.
    #[must_use]
    pub fn privileges(&self) -> Vec<Privilege> {
        let mut collected: BTreeMap<String, Privilege> = BTreeMap::new();

        for role in self.all_roles() {
            for privilege in role.privileges() {
                collected
                    .entry(privilege.name().to_owned())
                    .or_insert_with(|| privilege.clone());
            }
        }

        collected.into_values().collect()
    }
}
