use std::sync::Arc;

use clinaccess_core::{AccountId, AppError, AppResult};
use clinaccess_domain::{Account, Role, RoleRegistry, SuperuserOverride};
use tracing::{info, warn};

use crate::AccountRepository;

/// Application service for account role and privilege decisions.
#[derive(Clone)]
pub struct AccessService {
    repository: Arc<dyn AccountRepository>,
    registry: Arc<RoleRegistry>,
}

impl AccessService {
    /// Creates a new access service from a repository and role registry.
    #[must_use]
    pub fn new(repository: Arc<dyn AccountRepository>, registry: Arc<RoleRegistry>) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// Returns whether the account holds the role, superusers holding every role.
    pub async fn has_role(&self, account_id: AccountId, role_name: &str) -> AppResult<bool> {
        self.has_role_with(account_id, role_name, SuperuserOverride::Apply)
            .await
    }

    /// Returns whether the account holds the role under the given override.
    pub async fn has_role_with(
        &self,
        account_id: AccountId,
        role_name: &str,
        superuser_override: SuperuserOverride,
    ) -> AppResult<bool> {
        let account = self.load_account(account_id).await?;
        Ok(account.has_role_with(role_name, superuser_override))
    }

    /// Returns whether the account holds the privilege.
    pub async fn has_privilege(
        &self,
        account_id: AccountId,
        privilege_name: &str,
    ) -> AppResult<bool> {
        let account = self.load_account(account_id).await?;
        Ok(account.has_privilege(privilege_name))
    }

    /// Returns whether the account is a superuser.
    pub async fn is_super_user(&self, account_id: AccountId) -> AppResult<bool> {
        let account = self.load_account(account_id).await?;
        Ok(account.is_super_user())
    }

    /// Ensures the account holds the role.
    pub async fn require_role(&self, account_id: AccountId, role_name: &str) -> AppResult<()> {
        if self.has_role(account_id, role_name).await? {
            return Ok(());
        }

        warn!(
            account_id = %account_id,
            role = role_name,
            "access denied: missing role"
        );
        Err(AppError::Forbidden(format!(
            "account '{account_id}' is missing role '{role_name}'"
        )))
    }

    /// Ensures the account holds the privilege.
    pub async fn require_privilege(
        &self,
        account_id: AccountId,
        privilege_name: &str,
    ) -> AppResult<()> {
        if self.has_privilege(account_id, privilege_name).await? {
            return Ok(());
        }

        warn!(
            account_id = %account_id,
            privilege = privilege_name,
            "access denied: missing privilege"
        );
        Err(AppError::Forbidden(format!(
            "account '{account_id}' is missing privilege '{privilege_name}'"
        )))
    }

    /// Assigns a registry role to the account. Returns `false` when already held.
    pub async fn assign_role(&self, account_id: AccountId, role_name: &str) -> AppResult<bool> {
        let role = self.find_registered_role(role_name)?;
        let mut account = self.load_account(account_id).await?;

        if !account.add_role(role) {
            return Ok(false);
        }

        self.repository.save_account(account).await?;
        info!(account_id = %account_id, role = role_name, "role assigned");
        Ok(true)
    }

    /// Removes a registry role from the account. Returns `false` when not held.
    pub async fn unassign_role(&self, account_id: AccountId, role_name: &str) -> AppResult<bool> {
        let role = self.find_registered_role(role_name)?;
        let mut account = self.load_account(account_id).await?;

        if !account.remove_role(&role) {
            return Ok(false);
        }

        self.repository.save_account(account).await?;
        info!(account_id = %account_id, role = role_name, "role unassigned");
        Ok(true)
    }

    fn find_registered_role(&self, role_name: &str) -> AppResult<Arc<Role>> {
        self.registry
            .find_role(role_name)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_name}' is not defined")))
    }

    async fn load_account(&self, account_id: AccountId) -> AppResult<Account> {
        self.repository
            .find_account(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("account '{account_id}' does not exist")))
    }
}
