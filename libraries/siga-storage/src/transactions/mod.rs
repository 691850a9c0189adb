//! Finance queries: filtering and the income/expense summary

use crate::store::Store;
use serde::{Deserialize, Serialize};
use siga_core::{error::Result, TransactionItem, TransactionStatus, TransactionType};

/// Report filters; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    /// `YYYY-MM`
    pub month: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &TransactionItem) -> bool {
        self.kind.map_or(true, |k| tx.kind == k)
            && self.status.map_or(true, |s| tx.status == s)
            && self
                .month
                .as_deref()
                .map_or(true, |m| tx.date.format("%Y-%m").to_string() == m)
    }
}

/// Totals over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

pub fn summarize(transactions: &[TransactionItem]) -> FinanceSummary {
    let (income, expenses) = transactions
        .iter()
        .fold((0.0, 0.0), |(income, expenses), tx| match tx.kind {
            TransactionType::Income => (income + tx.amount, expenses),
            TransactionType::Expense => (income, expenses + tx.amount),
        });

    FinanceSummary {
        income,
        expenses,
        balance: income - expenses,
    }
}

pub async fn filter(store: &Store, filter: &TransactionFilter) -> Result<Vec<TransactionItem>> {
    let snapshot = store.load().await?;
    Ok(snapshot
        .transactions
        .into_iter()
        .filter(|tx| filter.matches(tx))
        .collect())
}

/// Summary of the transactions matching `filter`
pub async fn summary(store: &Store, filter: &TransactionFilter) -> Result<FinanceSummary> {
    let matching = self::filter(store, filter).await?;
    Ok(summarize(&matching))
}
