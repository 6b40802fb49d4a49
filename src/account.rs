use rust_decimal::Decimal;
use thiserror::Error;

pub type AccountId = String;

#[derive(Debug, PartialEq, Eq)]
enum AccountEventKind {
    Deposited,
    Withdrawn,
}

/// Only produced by the `handle_*` checks and consumed by `apply`, so an accepted event
/// is folded in at most once.
#[derive(Debug)]
struct AccountEvent {
    amount: Decimal,
    kind: AccountEventKind,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Insufficient funds or invalid amount")]
    InsufficientFundsOrInvalidAmount,
    #[error("Deposit would exceed the largest representable balance")]
    BalanceOverflow,
}

#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    holder_name: String,
    balance: Decimal,
}

impl Account {
    pub fn create(
        id: AccountId,
        holder_name: impl Into<String>,
        opening_balance: Decimal,
    ) -> Result<Self, AccountError> {
        Self::check_opening_balance(opening_balance)?;
        Ok(Self {
            id,
            holder_name: holder_name.into(),
            balance: opening_balance,
        })
    }

    pub(crate) fn check_opening_balance(opening_balance: Decimal) -> Result<(), AccountError> {
        if opening_balance < Decimal::ZERO {
            Err(AccountError::InvalidAmount)
        } else {
            Ok(())
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let evt = self.handle_deposit(amount)?;
        self.apply(evt);
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let evt = self.handle_withdrawal(amount)?;
        self.apply(evt);
        Ok(())
    }

    fn apply(&mut self, event: AccountEvent) {
        match event.kind {
            AccountEventKind::Deposited => {
                self.balance += event.amount;
            }
            AccountEventKind::Withdrawn => {
                self.balance -= event.amount;
            }
        }
    }

    fn handle_deposit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        // `apply` adds unchecked, so the sum has to fit here
        if self.balance.checked_add(amount).is_none() {
            return Err(AccountError::BalanceOverflow);
        }
        Ok(AccountEvent {
            amount,
            kind: AccountEventKind::Deposited,
        })
    }

    fn handle_withdrawal(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount > Decimal::ZERO && amount <= self.balance {
            Ok(AccountEvent {
                amount,
                kind: AccountEventKind::Withdrawn,
            })
        } else {
            Err(AccountError::InsufficientFundsOrInvalidAmount)
        }
    }
}
