use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    CreateAccount,
    Deposit,
    Withdraw,
    ViewBalance,
    Exit,
    ListAccounts,
}

impl MenuCommand {
    /// Entries in the order they are shown, with their menu labels.
    pub const ALL: [(MenuCommand, &'static str); 6] = [
        (MenuCommand::CreateAccount, "Create Account"),
        (MenuCommand::Deposit, "Deposit Money"),
        (MenuCommand::Withdraw, "Withdraw Money"),
        (MenuCommand::ViewBalance, "View Account Balance"),
        (MenuCommand::Exit, "Exit"),
        (MenuCommand::ListAccounts, "List Accounts"),
    ];

    pub fn choice(self) -> u8 {
        match self {
            MenuCommand::CreateAccount => 1,
            MenuCommand::Deposit => 2,
            MenuCommand::Withdraw => 3,
            MenuCommand::ViewBalance => 4,
            MenuCommand::Exit => 5,
            MenuCommand::ListAccounts => 6,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid choice `{input}`")]
    InvalidChoice { input: String },
    #[error("`{input}` is not a valid amount")]
    InvalidAmountFormat { input: String },
    #[error("Account holder name must not be empty")]
    EmptyHolderName,
}

impl FromStr for MenuCommand {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        input
            .parse::<u8>()
            .ok()
            .and_then(|choice| {
                Self::ALL
                    .iter()
                    .map(|(cmd, _)| *cmd)
                    .find(|cmd| cmd.choice() == choice)
            })
            .ok_or_else(|| CommandError::InvalidChoice {
                input: input.to_string(),
            })
    }
}

/// Sign is kept, so amount rules stay with the account.
pub fn parse_amount(input: &str) -> Result<Decimal, CommandError> {
    let input = input.trim();
    Decimal::from_str(input).map_err(|_| CommandError::InvalidAmountFormat {
        input: input.to_string(),
    })
}

pub fn parse_holder_name(input: &str) -> Result<String, CommandError> {
    let name = input.trim();
    if name.is_empty() {
        Err(CommandError::EmptyHolderName)
    } else {
        Ok(name.to_string())
    }
}
