use std::collections::HashMap;

use async_trait::async_trait;
use clinaccess_application::AccountRepository;
use clinaccess_core::{AccountId, AppResult};
use clinaccess_domain::Account;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory account repository implementation.
///
/// Reads hand out clones, so callers mutate a private copy and save it back.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_account(&self, account_id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(&account_id).cloned())
    }

    async fn save_account(&self, account: Account) -> AppResult<()> {
        debug!(
            account_id = %account.id(),
            role_count = account.role_count(),
            "saving account"
        );
        self.accounts.write().await.insert(account.id(), account);
        Ok(())
    }
}
