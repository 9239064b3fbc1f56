use chrono::Utc;

use super::error::TransactionError;
use crate::actor_framework::Entity;
use crate::domain::{normalize_id, Transaction, TransactionDraft, TransactionPatch};

impl Entity for Transaction {
    type Id = String;
    type CreatePayload = TransactionDraft;
    type Patch = TransactionPatch;
    type Action = (); // Movements have no custom actions
    type ActionResult = ();
    type Error = TransactionError;

    fn id(&self) -> &String { &self.id }

    /// Builds a movement from a draft, stamping it with the current time
    /// unless the draft carries its own date.
    fn from_create(id: String, draft: TransactionDraft) -> Result<Self, TransactionError> {
        if draft.quantity == 0 {
            return Err(TransactionError::ValidationError("quantity must be positive".to_string()));
        }
        let product_id = normalize_id(&draft.product_id);
        if product_id.is_empty() {
            return Err(TransactionError::ValidationError("product id is required".to_string()));
        }

        Ok(Self {
            id,
            product_id,
            transaction_type: draft.transaction_type,
            quantity: draft.quantity,
            value: draft.value,
            purchase_value: draft.purchase_value,
            date: draft.date.unwrap_or_else(Utc::now),
            notes: draft.notes.unwrap_or_default(),
        })
    }

    /// Only the sale value and the notes of a movement can be amended.
    fn on_update(&mut self, patch: TransactionPatch) -> Result<(), TransactionError> {
        if let Some(value) = patch.value {
            if !value.is_finite() || value < 0.0 {
                return Err(TransactionError::ValidationError(format!("invalid value {value}")));
            }
            self.value = Some(value);
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), TransactionError> {
        Ok(())
    }
}
