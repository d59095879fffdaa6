//! This module could be a separate crate on its own, to bootstrap
//! [`bank_ledger`](crate) within a binary, but for simplicity purposes it
//! lives directly in the library so the integration test can drive it too.

use std::io::{Read, Write};

use anyhow::Result;
use thiserror::Error;

use crate::account::OpenAccount;
use crate::bank::{Bank, OperationError, in_memory::InMemoryBank};
use csv_parser::{CsvOperationParser, OperationKind, OperationRow};
use csv_printer::{AccountSummary, print_accounts};

pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum RowError {
    #[error("missing `{0}` column for open")]
    MissingColumn(&'static str),
    #[error(transparent)]
    Operation(#[from] OperationError),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, RowError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut bank = InMemoryBank::default();

        for (line, row) in parser {
            if let Err(err) = apply_row(&mut bank, row) {
                (self.error_printer)(line, err);
            }
        }

        print_accounts(
            self.output,
            bank.accounts().iter().map(|acc| AccountSummary {
                account: acc.number().to_string(),
                owner: acc.owner_name().to_string(),
                balance: acc.balance(),
                opened: acc.open_date(),
                transactions: acc.transactions().len(),
            }),
        )
    }
}

fn apply_row(bank: &mut InMemoryBank, row: OperationRow) -> Result<(), RowError> {
    let amount = row.amount.ok_or(RowError::MissingColumn("amount"));
    match row.kind {
        OperationKind::Open => {
            bank.open_account(OpenAccount {
                number: row.account,
                bik: row.bik.ok_or(RowError::MissingColumn("bik"))?,
                kpp: row.kpp.ok_or(RowError::MissingColumn("kpp"))?,
                correspondent_account: row.corr_account,
                tax_id: row.tax_id,
                owner_name: row.owner.ok_or(RowError::MissingColumn("owner"))?,
                initial_balance: amount?,
            })?;
        }
        OperationKind::Deposit => {
            bank.deposit(&row.account, amount?)?;
        }
        OperationKind::Withdraw => {
            // insufficient funds is a business outcome, not a row error
            bank.withdraw(&row.account, amount?)?;
        }
    }
    Ok(())
}
