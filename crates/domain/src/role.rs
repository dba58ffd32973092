use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use clinaccess_core::{AppResult, NonEmptyString};

use crate::SUPERUSER_ROLE_NAME;
use crate::name_match::names_match_exact;
use crate::privilege::Privilege;

/// Named bundle of privileges assignable to an account.
///
/// A role may inherit other roles. Inherited roles are shared handles, and a
/// role can only inherit roles that already exist, so the hierarchy never
/// contains cycles. Traversals still skip ancestors reached twice.
#[derive(Debug, Clone)]
pub struct Role {
    name: NonEmptyString,
    description: String,
    superuser: bool,
    privileges: BTreeMap<String, Privilege>,
    inherited_roles: BTreeMap<String, Arc<Role>>,
}

impl Role {
    /// Creates a role, marking it superuser when its name is [`SUPERUSER_ROLE_NAME`].
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        Self::new_with_superuser_name(name, SUPERUSER_ROLE_NAME)
    }

    /// Creates a role, marking it superuser when its name equals `superuser_role_name`.
    pub fn new_with_superuser_name(
        name: impl Into<String>,
        superuser_role_name: &str,
    ) -> AppResult<Self> {
        let name = NonEmptyString::new(name)?;
        let superuser = names_match_exact(name.as_str(), superuser_role_name);

        Ok(Self {
            name,
            description: String::new(),
            superuser,
            privileges: BTreeMap::new(),
            inherited_roles: BTreeMap::new(),
        })
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Grants a privilege and returns the role.
    #[must_use]
    pub fn with_privilege(mut self, privilege: Privilege) -> Self {
        self.grant_privilege(privilege);
        self
    }

    /// Inherits a parent role and returns the role.
    #[must_use]
    pub fn inheriting(mut self, role: Arc<Role>) -> Self {
        self.inherit_role(role);
        self
    }

    /// Grants a privilege. Returns `false` when it was already granted.
    pub fn grant_privilege(&mut self, privilege: Privilege) -> bool {
        if self.privileges.contains_key(privilege.name()) {
            return false;
        }

        self.privileges
            .insert(privilege.name().to_owned(), privilege);
        true
    }

    /// Revokes a directly granted privilege. Returns `false` when absent.
    pub fn revoke_privilege(&mut self, name: &str) -> bool {
        self.privileges.remove(name).is_some()
    }

    /// Adds an inherited role. A role never inherits a role with its own name.
    pub fn inherit_role(&mut self, role: Arc<Role>) -> bool {
        if names_match_exact(role.name(), self.name())
            || self.inherited_roles.contains_key(role.name())
        {
            return false;
        }

        self.inherited_roles.insert(role.name().to_owned(), role);
        true
    }

    /// Returns the unique role name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns whether this role grants unrestricted access.
    #[must_use]
    pub fn is_superuser(&self) -> bool {
        self.superuser
    }

    /// Returns directly granted privileges ordered by name.
    pub fn privileges(&self) -> impl Iterator<Item = &Privilege> {
        self.privileges.values()
    }

    /// Returns directly inherited roles ordered by name.
    pub fn inherited_roles(&self) -> impl Iterator<Item = &Arc<Role>> {
        self.inherited_roles.values()
    }

    /// Returns every role reachable through inheritance, excluding this role.
    #[must_use]
    pub fn all_inherited_roles(&self) -> Vec<Arc<Role>> {
        let mut visited = BTreeSet::from([self.name()]);
        let mut collected = Vec::new();
        let mut pending: Vec<&Arc<Role>> = self.inherited_roles.values().collect();

        while let Some(role) = pending.pop() {
            if !visited.insert(role.name()) {
                continue;
            }

            collected.push(Arc::clone(role));
            pending.extend(role.inherited_roles.values());
        }

        collected
    }

    /// Returns whether a role named exactly `name` is inherited, directly or transitively.
    #[must_use]
    pub fn inherits_role(&self, name: &str) -> bool {
        self.lineage()
            .into_iter()
            .skip(1)
            .any(|role| names_match_exact(role.name(), name))
    }

    /// Returns whether this role, or any role it inherits, explicitly grants the privilege.
    ///
    /// The superuser marker is not a grant; accounts apply it separately.
    #[must_use]
    pub fn grants_privilege(&self, name: &str) -> bool {
        self.lineage()
            .into_iter()
            .any(|role| role.privileges.values().any(|privilege| privilege.matches(name)))
    }

    /// This role followed by its inherited roles, each visited once.
    fn lineage(&self) -> Vec<&Role> {
        let mut visited = BTreeSet::new();
        let mut ordered = Vec::new();
        let mut pending = vec![self];

        while let Some(role) = pending.pop() {
            if !visited.insert(role.name()) {
                continue;
            }

            ordered.push(role);
            pending.extend(role.inherited_roles.values().map(Arc::as_ref));
        }

        ordered
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Role {}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Role;
    use crate::{Privilege, SUPERUSER_ROLE_NAME};

    fn privilege(name: &str) -> Privilege {
        Privilege::new(name).unwrap_or_else(|_| unreachable!())
    }

    fn role(name: &str) -> Role {
        Role::new(name).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn superuser_marker_follows_reserved_name() {
        assert!(role(SUPERUSER_ROLE_NAME).is_superuser());
        assert!(!role("system developer").is_superuser());
        assert!(!role("Some Role").is_superuser());
    }

    #[test]
    fn injected_superuser_name_replaces_default() {
        let custom = Role::new_with_superuser_name("Root", "Root");
        let default_name = Role::new_with_superuser_name(SUPERUSER_ROLE_NAME, "Root");
        assert!(custom.map(|value| value.is_superuser()).unwrap_or(false));
        assert!(!default_name.map(|value| value.is_superuser()).unwrap_or(true));
    }

    #[test]
    fn role_rejects_blank_name() {
        assert!(Role::new("").is_err());
    }

    #[test]
    fn granting_same_privilege_twice_keeps_one_entry() {
        let mut nurse = role("Nurse");
        assert!(nurse.grant_privilege(privilege("View Patients")));
        assert!(!nurse.grant_privilege(privilege("View Patients")));
        assert_eq!(nurse.privileges().count(), 1);

        assert!(nurse.revoke_privilege("View Patients"));
        assert!(!nurse.revoke_privilege("View Patients"));
        assert!(!nurse.grants_privilege("View Patients"));
    }

    #[test]
    fn privileges_are_granted_through_inheritance() {
        let clerk = Arc::new(role("Clerk").with_privilege(privilege("View Patients")));
        let nurse = Arc::new(
            role("Nurse")
                .with_privilege(privilege("Edit Encounters"))
                .inheriting(clerk),
        );
        let head_nurse = role("Head Nurse").inheriting(nurse);

        assert!(head_nurse.grants_privilege("Edit Encounters"));
        assert!(head_nurse.grants_privilege("View Patients"));
        assert!(!head_nurse.grants_privilege("view patients"));
        assert!(head_nurse.inherits_role("Clerk"));
        assert!(!head_nurse.inherits_role("Head Nurse"));
    }

    #[test]
    fn shared_ancestors_are_listed_once() {
        let base = Arc::new(role("Authenticated"));
        let clerk = Arc::new(role("Clerk").inheriting(Arc::clone(&base)));
        let nurse = Arc::new(role("Nurse").inheriting(base));
        let ward_lead = role("Ward Lead").inheriting(clerk).inheriting(nurse);

        let mut names: Vec<String> = ward_lead
            .all_inherited_roles()
            .iter()
            .map(|inherited| inherited.name().to_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Authenticated", "Clerk", "Nurse"]);
    }

    #[test]
    fn role_does_not_inherit_its_own_name() {
        let mut nurse = role("Nurse");
        assert!(!nurse.inherit_role(Arc::new(role("Nurse"))));
        assert_eq!(nurse.inherited_roles().count(), 0);
    }

    #[test]
    fn superuser_marker_is_not_a_grant() {
        let superuser = role(SUPERUSER_ROLE_NAME).with_privilege(privilege("Manage Users"));
        let admin = role("Admin").inheriting(Arc::new(superuser));

        assert!(admin.grants_privilege("Manage Users"));
        assert!(!admin.grants_privilege("Anything At All"));
        assert!(!admin.is_superuser());
    }
}
