//! Finance transaction types

use super::{ids, merge};
use crate::entity::{Entity, EntityKind};
use crate::error::{Result, SigaError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// Whether the movement has been reconciled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Cleared,
    #[default]
    Pending,
}

/// Income or expense entry in the association ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Always finite and non-negative; the sign comes from `kind`
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: TransactionStatus,
}

impl TransactionItem {
    /// Amount with the sign implied by the movement type
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Data for recording a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
}

/// Data for updating a transaction (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransaction {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
}

fn check_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(SigaError::invalid_input(format!(
            "amount must be a non-negative number, got {}",
            amount
        )))
    }
}

impl Entity for TransactionItem {
    type Create = CreateTransaction;
    type Update = UpdateTransaction;

    const KIND: EntityKind = EntityKind::Transaction;
    const COLLECTION: &'static str = "transactions";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(draft: CreateTransaction) -> Result<Self> {
        Ok(Self {
            id: ids::resolve(draft.id),
            kind: draft.kind,
            category: draft.category,
            description: draft.description,
            amount: check_amount(draft.amount)?,
            date: draft.date,
            status: draft.status.unwrap_or_default(),
        })
    }

    fn apply(&mut self, patch: UpdateTransaction) -> Result<()> {
        // Validate before touching any field so a bad patch leaves the record intact
        let amount = patch.amount.map(check_amount).transpose()?;
        merge(&mut self.kind, patch.kind);
        merge(&mut self.category, patch.category);
        merge(&mut self.description, patch.description);
        merge(&mut self.amount, amount);
        merge(&mut self.date, patch.date);
        merge(&mut self.status, patch.status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft(amount: f64) -> CreateTransaction {
        CreateTransaction {
            id: None,
            kind: TransactionType::Expense,
            category: "Logística".to_string(),
            description: "Alquiler de salón".to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            status: None,
        }
    }

    #[test]
    fn type_field_uses_storage_name() {
        let tx = TransactionItem::build(draft(80000.0)).unwrap();
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["status"], "pending");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = TransactionItem::build(draft(-1.0)).unwrap_err();
        assert!(matches!(err, SigaError::InvalidInput(_)));
    }

    #[test]
    fn rejected_patch_leaves_record_untouched() {
        let mut tx = TransactionItem::build(draft(100.0)).unwrap();
        let before = tx.clone();
        let result = tx.apply(UpdateTransaction {
            category: Some("Otro".to_string()),
            amount: Some(f64::NAN),
            ..UpdateTransaction::default()
        });
        assert!(result.is_err());
        assert_eq!(tx, before);
    }

    #[test]
    fn signed_amount_follows_kind() {
        let tx = TransactionItem::build(draft(80.0)).unwrap();
        assert_eq!(tx.signed_amount(), -80.0);
    }

    proptest! {
        #[test]
        fn build_accepts_every_non_negative_amount(amount in 0.0f64..1.0e12) {
            let tx = TransactionItem::build(draft(amount)).unwrap();
            prop_assert_eq!(tx.amount, amount);
            prop_assert!(!tx.id.is_empty());
        }
    }
}
