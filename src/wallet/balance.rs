//! Computes the running balance over a list of transactions.

use crate::{
    api::{Transaction, TransactionKind},
    money::Amount,
};

/// Sum the transactions into a signed balance.
///
/// Incomes add to the balance, outcomes subtract from it.
pub(crate) fn balance(transactions: &[Transaction]) -> Amount {
    transactions
        .iter()
        .fold(Amount::ZERO, |total, transaction| match transaction.kind {
            TransactionKind::Income => total + transaction.value,
            TransactionKind::Outcome => total - transaction.value,
        })
}
