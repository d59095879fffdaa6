use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::account::{Account, OpenAccount, WithdrawOutcome};

use super::{Bank, OperationError};

/// Session-local account registry. Backed by a `Vec` so that `accounts()`
/// and everything layered on it (search, reporting) observe insertion order;
/// lookups are linear, which is fine for a collection this layer holds.
#[derive(Default)]
pub struct InMemoryBank {
    accounts: Vec<Account>,
}

impl InMemoryBank {
    fn find_mut(&mut self, number: &str) -> Result<&mut Account, OperationError> {
        self.accounts
            .iter_mut()
            .find(|acc| acc.number() == number)
            .ok_or_else(|| OperationError::UnknownAccount(number.to_string()))
    }
}

impl Bank for InMemoryBank {
    fn open_account(&mut self, details: OpenAccount) -> Result<(), OperationError> {
        if self.accounts.iter().any(|acc| acc.number() == details.number) {
            return Err(OperationError::DuplicateAccount(details.number));
        }
        let account = Account::open(details)?;
        debug!(number = account.number(), "account opened");
        self.accounts.push(account);
        Ok(())
    }

    fn deposit(&mut self, number: &str, amount: Decimal) -> Result<Decimal, OperationError> {
        let account = self.find_mut(number)?;
        account.deposit(amount)?;
        debug!(number, %amount, balance = %account.balance(), "deposit");
        Ok(account.balance())
    }

    fn withdraw(
        &mut self,
        number: &str,
        amount: Decimal,
    ) -> Result<WithdrawOutcome, OperationError> {
        let account = self.find_mut(number)?;
        let outcome = account.withdraw(amount)?;
        match outcome {
            WithdrawOutcome::Completed => {
                debug!(number, %amount, balance = %account.balance(), "withdrawal");
            }
            WithdrawOutcome::InsufficientFunds => {
                warn!(number, %amount, balance = %account.balance(), "insufficient funds");
            }
        }
        Ok(outcome)
    }

    fn accounts(&self) -> &[Account] {
        &self.accounts
    }
}
