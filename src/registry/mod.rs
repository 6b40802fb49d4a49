use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::{Account, AccountError, AccountId};

pub mod in_memory_registry;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Account not found")]
    AccountNotFound { id: AccountId },
    #[error("Account `{id}` is already registered")]
    DuplicateId { id: AccountId },
    #[error("Account numbers exhausted")]
    IdsExhausted,
    #[error(transparent)]
    AccountErr(#[from] AccountError),
}

/// How account ids are generated: `id_prefix` followed by the counter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub id_prefix: String,
    /// The counter is incremented before use, so the first id ends with `first_sequence + 1`.
    pub first_sequence: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            id_prefix: "ACC".to_string(),
            first_sequence: 1000,
        }
    }
}

pub trait AccountRegistry {
    /// Fails once the counter cannot advance; it never wraps around.
    fn generate_id(&mut self) -> Result<AccountId, RegistryError>;

    fn register(&mut self, account: Account) -> Result<(), RegistryError>;

    fn find(&self, id: &str) -> Option<&Account>;

    /// Returns the balance after the deposit.
    fn deposit(&mut self, id: &str, amount: Decimal) -> Result<Decimal, RegistryError>;

    /// Returns the balance after the withdrawal.
    fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<Decimal, RegistryError>;

    fn balance(&self, id: &str) -> Result<Decimal, RegistryError> {
        self.find(id)
            .map(Account::balance)
            .ok_or_else(|| RegistryError::AccountNotFound { id: id.to_string() })
    }

    /// An id is only consumed once the opening balance has been accepted.
    fn open_account(
        &mut self,
        holder_name: &str,
        opening_balance: Decimal,
    ) -> Result<AccountId, RegistryError> {
        Account::check_opening_balance(opening_balance)?;
        let id = self.generate_id()?;
        let account = Account::create(id.clone(), holder_name, opening_balance)?;
        self.register(account)?;
        Ok(id)
    }
}
