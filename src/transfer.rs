use rust_decimal::Decimal;

use crate::account::AccountId;

/// An order to move funds from one account to another
///
/// Transfers are transient values: they are applied to the ledger and never
/// stored. Both legs apply as one unit, and the debtor may end up below zero.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    debtor_id: AccountId,
    creditor_id: AccountId,
    amount: Decimal,
}

impl TransferRequest {
    pub fn new(
        debtor_id: impl Into<AccountId>,
        creditor_id: impl Into<AccountId>,
        amount: Decimal,
    ) -> Self {
        Self {
            debtor_id: debtor_id.into(),
            creditor_id: creditor_id.into(),
            amount,
        }
    }

    /// The account the amount is taken from
    pub fn debtor_id(&self) -> &AccountId {
        &self.debtor_id
    }

    /// The account the amount is credited to
    pub fn creditor_id(&self) -> &AccountId {
        &self.creditor_id
    }

    /// The amount to move
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}
