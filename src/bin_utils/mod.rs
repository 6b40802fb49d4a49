//! This module could be a separate crate on its own, to bootstrap [`simple_bank`] behind an
//! interactive menu, but it lives here so integration tests can drive whole sessions.

use std::io::{BufRead, Write};

use crate::{
    account::AccountError,
    command::{MenuCommand, parse_amount, parse_holder_name},
    registry::{
        AccountRegistry, RegistryConfig, RegistryError, in_memory_registry::InMemoryRegistry,
    },
};
use anyhow::Result;
use csv_printer::{AccountRow, print_accounts};
use line_reader::LineReader;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};
pub mod csv_printer;
pub mod line_reader;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub registry_config: RegistryConfig,
    pub currency_symbol: String,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: BufRead,
    W: Write + 'w,
{
    /// Runs the menu loop until the operator exits or the input ends.
    pub fn run(self) -> Result<()> {
        let mut session = Session {
            lines: LineReader::new(self.input),
            output: self.output,
            registry: InMemoryRegistry::new(self.registry_config),
            currency_symbol: self.currency_symbol,
        };
        info!("session started");
        loop {
            match session.step()? {
                Flow::Continue => {}
                Flow::Exit => {
                    info!(accounts = session.registry.len(), "session ended by operator");
                    return Ok(());
                }
                Flow::EndOfInput => {
                    info!(
                        accounts = session.registry.len(),
                        line = session.lines.line(),
                        "input exhausted"
                    );
                    return Ok(());
                }
            }
        }
    }
}

enum Flow {
    Continue,
    Exit,
    EndOfInput,
}

/// Snapshot of an account the operator picked by number.
struct KnownAccount {
    id: String,
    holder_name: String,
    balance: Decimal,
}

struct Session<'w, R, W> {
    lines: LineReader<R>,
    output: &'w mut W,
    registry: InMemoryRegistry,
    currency_symbol: String,
}

impl<R, W> Session<'_, R, W>
where
    R: BufRead,
    W: Write,
{
    fn step(&mut self) -> Result<Flow> {
        self.print_menu()?;
        let Some(choice) = self.prompt("Enter your choice: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let command = match choice.parse::<MenuCommand>() {
            Ok(command) => command,
            Err(err) => {
                debug!(%err, "menu choice rejected");
                writeln!(self.output, "Invalid choice. Please try again.")?;
                return Ok(Flow::Continue);
            }
        };
        match command {
            MenuCommand::CreateAccount => self.create_account(),
            MenuCommand::Deposit => self.deposit(),
            MenuCommand::Withdraw => self.withdraw(),
            MenuCommand::ViewBalance => self.view_balance(),
            MenuCommand::ListAccounts => self.list_accounts(),
            MenuCommand::Exit => {
                writeln!(self.output, "Thank you for using Simple Bank System!")?;
                Ok(Flow::Exit)
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "=== Simple Bank System ===")?;
        for (command, label) in MenuCommand::ALL {
            writeln!(self.output, "{}. {label}", command.choice())?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.lines.next_line()
    }

    fn report_error(&mut self, err: impl std::fmt::Display) -> Result<Flow> {
        debug!(%err, line = self.lines.line(), "operation rejected");
        writeln!(self.output, "Error: {err}")?;
        Ok(Flow::Continue)
    }

    /// Half-cents round away from zero.
    fn money(&self, amount: Decimal) -> String {
        let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{:.2}", self.currency_symbol, cents)
    }

    fn create_account(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter account holder name: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let Some(balance) = self.prompt("Enter initial balance: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let name = match parse_holder_name(&name) {
            Ok(name) => name,
            Err(err) => return self.report_error(err),
        };
        let balance = match parse_amount(&balance) {
            Ok(balance) => balance,
            Err(err) => return self.report_error(err),
        };

        match self.registry.open_account(&name, balance) {
            Ok(id) => {
                writeln!(self.output, "Account created successfully!")?;
                writeln!(self.output, "Account Number: {id}")?;
                Ok(Flow::Continue)
            }
            Err(RegistryError::AccountErr(AccountError::InvalidAmount)) => {
                self.report_error("Initial balance cannot be negative")
            }
            Err(err) => self.report_error(err),
        }
    }

    /// Prompts for an account number and looks it up before anything else is asked.
    fn known_account(&mut self) -> Result<Result<KnownAccount, Flow>> {
        let Some(id) = self.prompt("Enter account number: ")? else {
            return Ok(Err(Flow::EndOfInput));
        };
        let id = id.trim();
        match self.registry.find(id) {
            Some(account) => Ok(Ok(KnownAccount {
                id: account.id().to_string(),
                holder_name: account.holder_name().to_string(),
                balance: account.balance(),
            })),
            None => {
                let err = RegistryError::AccountNotFound { id: id.to_string() };
                Ok(Err(self.report_error(err)?))
            }
        }
    }

    fn deposit(&mut self) -> Result<Flow> {
        let id = match self.known_account()? {
            Ok(account) => account.id,
            Err(flow) => return Ok(flow),
        };
        let Some(amount) = self.prompt("Enter deposit amount: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let amount = match parse_amount(&amount) {
            Ok(amount) => amount,
            Err(err) => return self.report_error(err),
        };

        match self.registry.deposit(&id, amount) {
            Ok(balance) => {
                let balance = self.money(balance);
                writeln!(self.output, "Deposit successful!")?;
                writeln!(self.output, "New balance: {balance}")?;
            }
            Err(err @ RegistryError::AccountErr(AccountError::BalanceOverflow)) => {
                return self.report_error(err);
            }
            Err(RegistryError::AccountErr(err)) => {
                debug!(%err, %id, %amount, "deposit rejected");
                writeln!(self.output, "Invalid deposit amount")?;
            }
            Err(err) => return self.report_error(err),
        }
        Ok(Flow::Continue)
    }

    fn withdraw(&mut self) -> Result<Flow> {
        let id = match self.known_account()? {
            Ok(account) => account.id,
            Err(flow) => return Ok(flow),
        };
        let Some(amount) = self.prompt("Enter withdrawal amount: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let amount = match parse_amount(&amount) {
            Ok(amount) => amount,
            Err(err) => return self.report_error(err),
        };

        match self.registry.withdraw(&id, amount) {
            Ok(balance) => {
                let balance = self.money(balance);
                writeln!(self.output, "Withdrawal successful!")?;
                writeln!(self.output, "New balance: {balance}")?;
            }
            Err(RegistryError::AccountErr(err)) => {
                debug!(%err, %id, %amount, "withdrawal rejected");
                writeln!(self.output, "{err}")?;
            }
            Err(err) => return self.report_error(err),
        }
        Ok(Flow::Continue)
    }

    fn view_balance(&mut self) -> Result<Flow> {
        let account = match self.known_account()? {
            Ok(account) => account,
            Err(flow) => return Ok(flow),
        };
        let balance = self.money(account.balance);
        writeln!(self.output, "Account Number: {}", account.id)?;
        writeln!(self.output, "Account Holder: {}", account.holder_name)?;
        writeln!(self.output, "Current Balance: {balance}")?;
        Ok(Flow::Continue)
    }

    fn list_accounts(&mut self) -> Result<Flow> {
        if self.registry.is_empty() {
            writeln!(self.output, "No accounts yet.")?;
            return Ok(Flow::Continue);
        }
        print_accounts(
            &mut *self.output,
            self.registry.accounts().map(|acc| AccountRow {
                id: acc.id(),
                holder: acc.holder_name(),
                balance: acc.balance().normalize(),
            }),
        )?;
        Ok(Flow::Continue)
    }
}
