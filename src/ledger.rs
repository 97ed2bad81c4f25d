use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rust_decimal::Decimal;

use crate::{Account, AccountError, AccountId, TransferRequest};

/// Possible errors to occur during ledger operations
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("invalid account identifier")]
    AccountNotFound,
    #[error("cannot transfer to same account")]
    SameAccount,
}

/// The central ledger holding every account balance
///
/// Accounts are provisioned once at construction; there is no dynamic
/// account creation. All operations go through a single internal lock, so
/// each deposit, withdrawal and transfer is atomic with respect to every
/// other operation, and a failed operation never changes any balance.
#[derive(Debug)]
pub struct Ledger {
    accounts: Mutex<HashMap<AccountId, Account>>,
}

impl Ledger {
    /// Creates a ledger with the default seed accounts, `account-a` and
    /// `account-b`, both starting at zero
    pub fn new() -> Self {
        Self::with_accounts(["account-a", "account-b"])
    }

    /// Creates a ledger holding the given accounts, all starting at zero
    pub fn with_accounts<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AccountId>,
    {
        let accounts = ids
            .into_iter()
            .map(Into::into)
            .map(|id| (id.clone(), Account::new(id)))
            .collect();

        Self {
            accounts: Mutex::new(accounts),
        }
    }

    /// The current balance of the given account
    pub fn balance(&self, id: &AccountId) -> Result<Decimal, LedgerError> {
        let accounts = self.lock();
        let account = accounts.get(id).ok_or(LedgerError::AccountNotFound)?;

        Ok(account.balance())
    }

    /// Deposits the specified amount on the given account
    pub fn deposit(&self, id: &AccountId, amount: Decimal) -> Result<(), LedgerError> {
        let mut accounts = self.lock();
        let account = accounts.get_mut(id).ok_or(LedgerError::AccountNotFound)?;
        account.deposit(amount)?;

        Ok(())
    }

    /// Withdraws the specified amount from the given account
    pub fn withdraw(&self, id: &AccountId, amount: Decimal) -> Result<(), LedgerError> {
        let mut accounts = self.lock();
        let account = accounts.get_mut(id).ok_or(LedgerError::AccountNotFound)?;
        account.withdraw(amount)?;

        Ok(())
    }

    /// Moves the requested amount from the debtor to the creditor
    ///
    /// Both legs apply under the lock as one unit; readers can never observe
    /// a half-applied transfer. There is no balance check on the debtor, so
    /// a transfer may push it below zero.
    pub fn transfer(&self, transfer: &TransferRequest) -> Result<(), LedgerError> {
        if transfer.debtor_id() == transfer.creditor_id() {
            return Err(LedgerError::SameAccount);
        }

        let mut accounts = self.lock();
        if !accounts.contains_key(transfer.debtor_id())
            || !accounts.contains_key(transfer.creditor_id())
        {
            return Err(LedgerError::AccountNotFound);
        }

        // both ids were verified above, under the same lock
        let debtor = accounts
            .get_mut(transfer.debtor_id())
            .expect("debtor account exists");
        debtor.debit(transfer.amount());

        let creditor = accounts
            .get_mut(transfer.creditor_id())
            .expect("creditor account exists");
        creditor.credit(transfer.amount());

        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<AccountId, Account>> {
        self.accounts.lock().expect("ledger lock poisoned")
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use super::*;

    fn account_a() -> AccountId {
        AccountId::from("account-a")
    }

    fn account_b() -> AccountId {
        AccountId::from("account-b")
    }

    #[test]
    fn seed_accounts_start_at_zero() {
        let ledger = Ledger::new();

        assert_eq!(ledger.balance(&account_a()).unwrap(), dec!(0));
        assert_eq!(ledger.balance(&account_b()).unwrap(), dec!(0));
    }

    #[test]
    fn deposit_increases_balance() {
        let ledger = Ledger::new();

        ledger.deposit(&account_a(), dec!(1000)).unwrap();
        ledger.deposit(&account_a(), dec!(2000)).unwrap();

        assert_eq!(ledger.balance(&account_a()).unwrap(), dec!(3000));
    }

    #[test]
    fn negative_deposit_is_rejected() {
        let ledger = Ledger::new();

        let err = ledger.deposit(&account_a(), dec!(-1000)).unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Account(AccountError::InvalidAmount)
        ));
        assert_eq!(ledger.balance(&account_a()).unwrap(), dec!(0));
    }

    #[test]
    fn withdrawal_decreases_balance() {
        let ledger = Ledger::new();

        ledger.deposit(&account_a(), dec!(1000)).unwrap();
        ledger.withdraw(&account_a(), dec!(100)).unwrap();

        assert_eq!(ledger.balance(&account_a()).unwrap(), dec!(900));
    }

    #[test]
    fn withdrawal_beyond_balance_is_rejected() {
        let ledger = Ledger::new();
        ledger.deposit(&account_a(), dec!(1000)).unwrap();

        let err = ledger.withdraw(&account_a(), dec!(2000)).unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Account(AccountError::InsufficientFunds)
        ));
        assert_eq!(ledger.balance(&account_a()).unwrap(), dec!(1000));
    }

    #[test]
    fn transfer_moves_funds_between_accounts() {
        let ledger = Ledger::new();
        ledger.deposit(&account_a(), dec!(1000)).unwrap();

        let transfer = TransferRequest::new("account-a", "account-b", dec!(250));
        ledger.transfer(&transfer).unwrap();

        assert_eq!(ledger.balance(&account_a()).unwrap(), dec!(750));
        assert_eq!(ledger.balance(&account_b()).unwrap(), dec!(250));
    }

    #[test]
    fn transfer_may_overdraw_the_debtor() {
        let ledger = Ledger::new();
        ledger.deposit(&account_a(), dec!(1000)).unwrap();

        let transfer = TransferRequest::new("account-b", "account-a", dec!(1000));
        ledger.transfer(&transfer).unwrap();

        assert_eq!(ledger.balance(&account_b()).unwrap(), dec!(-1000));
        assert_eq!(ledger.balance(&account_a()).unwrap(), dec!(2000));
    }

    #[test]
    fn transfer_to_same_account_is_rejected() {
        let ledger = Ledger::new();
        ledger.deposit(&account_a(), dec!(1000)).unwrap();

        let transfer = TransferRequest::new("account-a", "account-a", dec!(100));
        let err = ledger.transfer(&transfer).unwrap_err();

        assert!(matches!(err, LedgerError::SameAccount));
        assert_eq!(ledger.balance(&account_a()).unwrap(), dec!(1000));
    }

    #[test]
    fn transfer_with_unknown_account_leaves_balances_unchanged() {
        let ledger = Ledger::new();
        ledger.deposit(&account_a(), dec!(1000)).unwrap();

        let from_unknown = TransferRequest::new("account-x", "account-a", dec!(100));
        assert!(matches!(
            ledger.transfer(&from_unknown).unwrap_err(),
            LedgerError::AccountNotFound
        ));

        let to_unknown = TransferRequest::new("account-a", "account-x", dec!(100));
        assert!(matches!(
            ledger.transfer(&to_unknown).unwrap_err(),
            LedgerError::AccountNotFound
        ));

        assert_eq!(ledger.balance(&account_a()).unwrap(), dec!(1000));
        assert_eq!(ledger.balance(&account_b()).unwrap(), dec!(0));
    }

    #[test]
    fn unknown_account_is_rejected_everywhere() {
        let ledger = Ledger::new();
        let unknown = AccountId::from("account-that-does-not-exist");

        assert!(matches!(
            ledger.balance(&unknown).unwrap_err(),
            LedgerError::AccountNotFound
        ));
        assert!(matches!(
            ledger.deposit(&unknown, dec!(1000)).unwrap_err(),
            LedgerError::AccountNotFound
        ));
        assert!(matches!(
            ledger.withdraw(&unknown, dec!(1000)).unwrap_err(),
            LedgerError::AccountNotFound
        ));
    }

    #[test]
    fn custom_seed_accounts() {
        let ledger = Ledger::with_accounts(["alice", "bob", "carol"]);

        ledger.deposit(&AccountId::from("carol"), dec!(5)).unwrap();

        assert_eq!(ledger.balance(&AccountId::from("alice")).unwrap(), dec!(0));
        assert_eq!(ledger.balance(&AccountId::from("carol")).unwrap(), dec!(5));
    }

    #[test]
    fn concurrent_deposits_do_not_lose_updates() {
        let ledger = Arc::new(Ledger::new());

        let handles = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        ledger.deposit(&AccountId::from("account-a"), dec!(1)).unwrap();
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.balance(&account_a()).unwrap(), dec!(800));
    }
}
