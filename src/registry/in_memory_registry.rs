use std::collections::{HashMap, hash_map::Entry};

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::account::{Account, AccountId};

use super::{AccountRegistry, RegistryConfig, RegistryError};

#[derive(Debug)]
pub struct InMemoryRegistry {
    config: RegistryConfig,
    next_sequence: u64,
    accounts: HashMap<AccountId, Account>,
    // ids in insertion order, so listings are stable
    order: Vec<AccountId>,
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl InMemoryRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            next_sequence: config.first_sequence,
            config,
            accounts: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.order.iter().filter_map(|id| self.accounts.get(id))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account_mut(&mut self, id: &str) -> Result<&mut Account, RegistryError> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| RegistryError::AccountNotFound { id: id.to_string() })
    }
}

impl AccountRegistry for InMemoryRegistry {
    fn generate_id(&mut self) -> Result<AccountId, RegistryError> {
        let Some(sequence) = self.next_sequence.checked_add(1) else {
            warn!(sequence = self.next_sequence, "account id counter exhausted");
            return Err(RegistryError::IdsExhausted);
        };
        self.next_sequence = sequence;
        Ok(format!("{}{}", self.config.id_prefix, sequence))
    }

    fn register(&mut self, account: Account) -> Result<(), RegistryError> {
        match self.accounts.entry(account.id().to_string()) {
            Entry::Occupied(entry) => {
                warn!(id = %entry.key(), "rejected account with duplicate id");
                Err(RegistryError::DuplicateId {
                    id: entry.key().clone(),
                })
            }
            Entry::Vacant(entry) => {
                debug!(
                    id = %entry.key(),
                    holder = account.holder_name(),
                    balance = %account.balance(),
                    "account registered"
                );
                self.order.push(entry.key().clone());
                entry.insert(account);
                Ok(())
            }
        }
    }

    fn find(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    fn deposit(&mut self, id: &str, amount: Decimal) -> Result<Decimal, RegistryError> {
        let acc = self.account_mut(id)?;
        acc.deposit(amount)?;
        debug!(id, %amount, balance = %acc.balance(), "deposited");
        Ok(acc.balance())
    }

    fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<Decimal, RegistryError> {
        let acc = self.account_mut(id)?;
        acc.withdraw(amount)?;
        debug!(id, %amount, balance = %acc.balance(), "withdrawn");
        Ok(acc.balance())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal_macros::dec;

    use crate::account::AccountError;

    use super::*;

    fn registry() -> InMemoryRegistry {
        InMemoryRegistry::new(RegistryConfig::default())
    }

    #[test]
    fn generated_ids_never_repeat() {
        let mut registry = registry();
        assert_eq!(registry.generate_id(), Ok("ACC1001".to_string()));
        assert_eq!(registry.generate_id(), Ok("ACC1002".to_string()));

        let ids: HashSet<AccountId> = (0..1000)
            .map(|_| registry.generate_id())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(ids.len(), 1000);
        assert!(!ids.contains("ACC1001"));
    }

    #[test]
    fn custom_id_format() {
        let mut registry = InMemoryRegistry::new(RegistryConfig {
            id_prefix: "BNK-".to_string(),
            first_sequence: 0,
        });
        assert_eq!(registry.generate_id(), Ok("BNK-1".to_string()));
    }

    #[test]
    fn id_counter_does_not_wrap() {
        let mut registry = InMemoryRegistry::new(RegistryConfig {
            id_prefix: "ACC".to_string(),
            first_sequence: u64::MAX - 1,
        });
        assert_eq!(
            registry.open_account("Alice", dec!(1)),
            Ok(format!("ACC{}", u64::MAX))
        );

        // every later attempt fails without touching the registry
        for _ in 0..3 {
            assert_eq!(registry.generate_id(), Err(RegistryError::IdsExhausted));
        }
        assert_eq!(
            registry.open_account("Bob", dec!(1)),
            Err(RegistryError::IdsExhausted)
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.balance(&format!("ACC{}", u64::MAX)), Ok(dec!(1)));
    }

    #[test]
    fn deposit_overflow_keeps_balance() {
        let mut registry = registry();
        let id = registry.open_account("Alice", Decimal::MAX).unwrap();
        let err = registry.deposit(&id, dec!(1)).unwrap_err();
        assert_eq!(err, RegistryError::AccountErr(AccountError::BalanceOverflow));
        assert_eq!(registry.balance(&id), Ok(Decimal::MAX));
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut registry = registry();
        let acc = Account::create("ACC1001".to_string(), "Alice", dec!(100)).unwrap();
        registry.register(acc).unwrap();

        let imposter = Account::create("ACC1001".to_string(), "Mallory", dec!(0)).unwrap();
        let err = registry.register(imposter).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateId {
                id: "ACC1001".to_string()
            }
        );

        // original entry is untouched
        let acc = registry.find("ACC1001").unwrap();
        assert_eq!(acc.holder_name(), "Alice");
        assert_eq!(acc.balance(), dec!(100));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn find_unknown_account() {
        let mut registry = registry();
        registry.open_account("Alice", dec!(100)).unwrap();
        assert!(registry.find("ACC9999").is_none());
        assert_eq!(
            registry.balance("ACC9999"),
            Err(RegistryError::AccountNotFound {
                id: "ACC9999".to_string()
            })
        );
    }

    #[test]
    fn open_account_validates_before_consuming_id() {
        let mut registry = registry();
        let err = registry.open_account("Alice", dec!(-1)).unwrap_err();
        assert_eq!(err, RegistryError::AccountErr(AccountError::InvalidAmount));
        assert!(registry.is_empty());

        let id = registry.open_account("Alice", dec!(0)).unwrap();
        assert_eq!(id, "ACC1001");
    }

    #[test]
    fn scenario() {
        let mut registry = registry();

        let id = registry.open_account("Alice", dec!(100.00)).unwrap();
        assert_eq!(id, "ACC1001");
        assert_eq!(registry.balance(&id), Ok(dec!(100.00)));

        assert_eq!(registry.deposit(&id, dec!(50.00)), Ok(dec!(150.00)));

        let err = registry.withdraw(&id, dec!(200.00)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::AccountErr(AccountError::InsufficientFundsOrInvalidAmount)
        );
        assert_eq!(registry.balance(&id), Ok(dec!(150.00)));

        assert_eq!(registry.withdraw(&id, dec!(150.00)), Ok(dec!(0.00)));
        assert!(registry.find("ACC9999").is_none());
    }

    #[test]
    fn operations_on_missing_account() {
        let mut registry = registry();
        let not_found = RegistryError::AccountNotFound {
            id: "ACC1001".to_string(),
        };
        assert_eq!(registry.deposit("ACC1001", dec!(10)), Err(not_found.clone()));
        assert_eq!(registry.withdraw("ACC1001", dec!(10)), Err(not_found));
        assert!(registry.is_empty());
    }

    #[test]
    fn deposit_errors_propagate() {
        let mut registry = registry();
        let id = registry.open_account("Bob", dec!(5)).unwrap();
        let err = registry.deposit(&id, dec!(0)).unwrap_err();
        assert_eq!(err, RegistryError::AccountErr(AccountError::InvalidAmount));
        assert_eq!(registry.balance(&id), Ok(dec!(5)));
    }

    #[test]
    fn accounts_listed_in_creation_order() {
        let mut registry = registry();
        for name in ["Carol", "Alice", "Bob"] {
            registry.open_account(name, dec!(1)).unwrap();
        }
        let names: Vec<&str> = registry.accounts().map(Account::holder_name).collect();
        assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
    }
}
