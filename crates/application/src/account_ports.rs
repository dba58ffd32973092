use async_trait::async_trait;
use clinaccess_core::{AccountId, AppResult};
use clinaccess_domain::Account;

/// Repository port for loading and storing accounts with their role membership.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Finds an account by identifier.
    async fn find_account(&self, account_id: AccountId) -> AppResult<Option<Account>>;

    /// Inserts or replaces an account.
    async fn save_account(&self, account: Account) -> AppResult<()>;
}
