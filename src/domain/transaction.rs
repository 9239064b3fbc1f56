use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Restock: increases on-hand quantity.
    Input,
    /// Sale: decreases on-hand quantity.
    Output,
}

/// A recorded change in a product's stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub product_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub quantity: u32,
    /// Realized per-unit sale value of an output movement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Per-unit acquisition cost of an input movement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_value: Option<f64>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

/// Payload for recording a new movement. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub product_id: String,
    pub transaction_type: TransactionType,
    pub quantity: u32,
    pub value: Option<f64>,
    pub purchase_value: Option<f64>,
    /// Defaults to the time the movement is stored.
    pub date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Payload for amending a stored movement.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub value: Option<f64>,
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        product_id: impl Into<String>,
        transaction_type: TransactionType,
        quantity: u32,
        value: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            transaction_type,
            quantity,
            value,
            purchase_value: None,
            date: Utc::now(),
            notes: String::new(),
        }
    }

    pub fn at(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_purchase_value(mut self, purchase_value: f64) -> Self {
        self.purchase_value = Some(purchase_value);
        self
    }

    pub fn is_output(&self) -> bool {
        self.transaction_type == TransactionType::Output
    }
}

impl TransactionDraft {
    pub fn input(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            transaction_type: TransactionType::Input,
            quantity,
            value: None,
            purchase_value: None,
            date: None,
            notes: None,
        }
    }

    pub fn output(product_id: impl Into<String>, quantity: u32, value: f64) -> Self {
        Self {
            product_id: product_id.into(),
            transaction_type: TransactionType::Output,
            quantity,
            value: Some(value),
            purchase_value: None,
            date: None,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_purchase_value(mut self, purchase_value: f64) -> Self {
        self.purchase_value = Some(purchase_value);
        self
    }

    /// Signed change this movement applies to on-hand stock.
    pub fn stock_delta(&self) -> i64 {
        match self.transaction_type {
            TransactionType::Input => i64::from(self.quantity),
            TransactionType::Output => -i64::from(self.quantity),
        }
    }
}
