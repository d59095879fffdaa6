use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

const ACCOUNT_NUMBER_LEN: usize = 20;
const BIK_LEN: usize = 9;
const KPP_LEN: usize = 9;
const CORR_ACCOUNT_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    OpenAccount,
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::OpenAccount => "Account opening",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }
}

/// One balance-affecting event. Created when an operation succeeds,
/// never mutated afterwards. `amount` is always the magnitude of the
/// operation, regardless of direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    timestamp: DateTime<Utc>,
    kind: TransactionKind,
    amount: Decimal,
    description: String,
}

impl Transaction {
    fn new(kind: TransactionKind, amount: Decimal, description: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            amount,
            description: description.to_string(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.timestamp.format("%d.%m.%Y %H:%M:%S"),
            self.kind.label(),
            self.amount,
            self.description
        )
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("account number must be exactly 20 digits")]
    AccountNumber,
    #[error("BIK must be exactly 9 digits")]
    Bik,
    #[error("KPP must be exactly 9 digits")]
    Kpp,
    #[error("correspondent account must be exactly 20 digits")]
    CorrespondentAccount,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("amount must be positive")]
pub struct InvalidAmount;

/// Outcome of a withdrawal with a valid amount. Insufficient funds is an
/// expected business condition, not an error, so it lives inside `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawOutcome {
    Completed,
    InsufficientFunds,
}

impl WithdrawOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, WithdrawOutcome::Completed)
    }
}

/// Requisites for opening an account. Digit-count fields are validated by
/// [`Account::open`]; `owner_name`, `tax_id` and `initial_balance` are
/// accepted as given.
#[derive(Debug, Clone)]
pub struct OpenAccount {
    pub number: String,
    pub bik: String,
    pub kpp: String,
    pub correspondent_account: Option<String>,
    pub tax_id: Option<String>,
    pub owner_name: String,
    pub initial_balance: Decimal,
}

/// A bank account owning its balance and its append-only transaction
/// history. Identity fields are validated once at construction and are
/// immutable; the balance changes only through [`Account::deposit`] and
/// [`Account::withdraw`], each appending exactly one transaction on success.
#[derive(Debug, Clone)]
pub struct Account {
    number: String,
    bik: String,
    kpp: String,
    correspondent_account: Option<String>,
    tax_id: Option<String>,
    owner_name: String,
    balance: Decimal,
    open_date: NaiveDate,
    transactions: Vec<Transaction>,
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

impl Account {
    /// Validates the requisites and opens the account, recording the opening
    /// transaction. The initial balance is taken as given, sign included.
    pub fn open(details: OpenAccount) -> Result<Self, ValidationError> {
        if !is_digits(&details.number, ACCOUNT_NUMBER_LEN) {
            return Err(ValidationError::AccountNumber);
        }
        if !is_digits(&details.bik, BIK_LEN) {
            return Err(ValidationError::Bik);
        }
        if !is_digits(&details.kpp, KPP_LEN) {
            return Err(ValidationError::Kpp);
        }
        if let Some(corr) = &details.correspondent_account {
            if !is_digits(corr, CORR_ACCOUNT_LEN) {
                return Err(ValidationError::CorrespondentAccount);
            }
        }

        let opening = Transaction::new(
            TransactionKind::OpenAccount,
            details.initial_balance,
            "account opened with initial balance",
        );
        Ok(Self {
            number: details.number,
            bik: details.bik,
            kpp: details.kpp,
            correspondent_account: details.correspondent_account,
            tax_id: details.tax_id,
            owner_name: details.owner_name,
            balance: details.initial_balance,
            open_date: Utc::now().date_naive(),
            transactions: vec![opening],
        })
    }

    /// Adds `amount` to the balance. Fails without mutation when the amount
    /// is not positive.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), InvalidAmount> {
        if amount <= Decimal::ZERO {
            return Err(InvalidAmount);
        }
        self.balance += amount;
        self.transactions.push(Transaction::new(
            TransactionKind::Deposit,
            amount,
            "cash deposit",
        ));
        Ok(())
    }

    /// Subtracts `amount` from the balance. A non-positive amount is an
    /// input fault; an amount exceeding the balance leaves the account
    /// untouched and reports [`WithdrawOutcome::InsufficientFunds`].
    pub fn withdraw(&mut self, amount: Decimal) -> Result<WithdrawOutcome, InvalidAmount> {
        if amount <= Decimal::ZERO {
            return Err(InvalidAmount);
        }
        if amount > self.balance {
            return Ok(WithdrawOutcome::InsufficientFunds);
        }
        self.balance -= amount;
        self.transactions.push(Transaction::new(
            TransactionKind::Withdrawal,
            amount,
            "cash withdrawal",
        ));
        Ok(WithdrawOutcome::Completed)
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn bik(&self) -> &str {
        &self.bik
    }

    pub fn kpp(&self) -> &str {
        &self.kpp
    }

    pub fn correspondent_account(&self) -> Option<&str> {
        self.correspondent_account.as_deref()
    }

    pub fn tax_id(&self) -> Option<&str> {
        self.tax_id.as_deref()
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn open_date(&self) -> NaiveDate {
        self.open_date
    }

    /// The history in chronological order. Borrowed immutably, so callers
    /// can never mutate internal state through it.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Account: {} | Owner: {} | Balance: {}",
            self.number, self.owner_name, self.balance
        )?;
        writeln!(
            f,
            "BIK: {} | KPP: {} | INN: {}",
            self.bik,
            self.kpp,
            self.tax_id.as_deref().unwrap_or("-")
        )?;
        write!(
            f,
            "Corr. account: {} | Opened: {}",
            self.correspondent_account.as_deref().unwrap_or("-"),
            self.open_date
        )
    }
}

// Account identity is the account number alone.
impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}
