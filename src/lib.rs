pub use self::{
    account::{Account, AccountError, AccountId},
    ledger::{Ledger, LedgerError},
    transfer::TransferRequest,
};

pub mod api;

mod account;
mod ledger;
mod transfer;
