use std::fmt;

use rust_decimal::Decimal;

/// Possible errors to occur during account operations
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("cannot deposit less than 0")]
    InvalidAmount,
    #[error("cannot withdraw more than balance")]
    InsufficientFunds,
}

/// The unique identifier of an account
///
/// Identifiers are opaque strings; the ledger only ever compares them.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ledger account
///
/// An account holds a single signed balance. The balance may go negative
/// when a transfer overdraws the debtor; only withdrawals check funds.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    balance: Decimal,
}

impl Account {
    /// Creates a new account with a balance of zero
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            balance: Decimal::ZERO,
        }
    }

    /// The identifier of the account
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// The current balance of the account
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Deposits the specified amount on the account
    ///
    /// Negative amounts are rejected; a deposit can never reduce the balance.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        self.balance += amount;

        Ok(())
    }

    /// Withdraws the specified amount from the account
    ///
    /// Fails if the amount exceeds the current balance; a withdrawal can
    /// never overdraw the account.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds);
        }
        self.balance -= amount;

        Ok(())
    }

    /// Adds the amount unconditionally (the receiving leg of a transfer)
    pub(crate) fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Subtracts the amount unconditionally (the paying leg of a transfer)
    pub(crate) fn debit(&mut self, amount: Decimal) {
        self.balance -= amount;
    }
}
