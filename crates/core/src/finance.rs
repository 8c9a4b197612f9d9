//! Resident ledger summaries.

use serde::Serialize;

use crate::status::TransactionStatus;

/// Totals over a resident's transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub outstanding: f64,
    pub paid: f64,
    pub unpaid_count: usize,
}

/// Sum paid and unpaid amounts.
pub fn summarize<I>(entries: I) -> BalanceSummary
where
    I: IntoIterator<Item = (TransactionStatus, f64)>,
{
    entries
        .into_iter()
        .fold(BalanceSummary::default(), |mut acc, (status, amount)| {
            match status {
                TransactionStatus::Paid => acc.paid += amount,
                TransactionStatus::Unpaid => {
                    acc.outstanding += amount;
                    acc.unpaid_count += 1;
                }
            }
            acc
        })
}
