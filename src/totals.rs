//! Aggregates transaction amounts into totals for the dashboards.

use crate::transaction::{Transaction, TransactionType};

/// The sums of a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// The sum of all credit (income) amounts.
    pub credit: f64,
    /// The sum of all debit (expense) amounts.
    pub debit: f64,
    /// Credit minus debit.
    pub balance: f64,
}

impl Totals {
    /// The total amount of money moved in either direction.
    pub fn volume(&self) -> f64 {
        self.credit + self.debit
    }
}

/// Sum credits and debits separately and derive the balance.
///
/// The result does not depend on the order of `transactions`.
pub fn calculate_totals(transactions: &[Transaction]) -> Totals {
    let (credit, debit) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(credit, debit), transaction| {
                match transaction.type_ {
                    TransactionType::Credit => (credit + transaction.amount, debit),
                    TransactionType::Debit => (credit, debit + transaction.amount),
                }
            });

    Totals {
        credit,
        debit,
        balance: credit - debit,
    }
}

/// Sum every amount regardless of type.
pub fn sum_amounts(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount)
        .sum()
}
