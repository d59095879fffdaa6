use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::{
    Account, InvalidAmount, OpenAccount, ValidationError, WithdrawOutcome,
};

pub mod in_memory;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Amount(#[from] InvalidAmount),
    #[error("account {0} already exists")]
    DuplicateAccount(String),
    #[error("account {0} not found")]
    UnknownAccount(String),
}

/// Registry of accounts keyed by account number.
///
/// NOTE: Technically this interface is not strictly necessary, but it is a
/// good integration point to replace the in-memory registry with something
/// more sophisticated.
pub trait Bank {
    fn open_account(&mut self, details: OpenAccount) -> Result<(), OperationError>;

    /// Deposits into the account with the given number; returns the new balance.
    fn deposit(&mut self, number: &str, amount: Decimal) -> Result<Decimal, OperationError>;

    fn withdraw(
        &mut self,
        number: &str,
        amount: Decimal,
    ) -> Result<WithdrawOutcome, OperationError>;

    /// All accounts in insertion order.
    fn accounts(&self) -> &[Account];
}
