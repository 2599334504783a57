use super::aggregate::ItemIdentity;
use crate::shared::validation::FieldErrors;
use thiserror::Error;

/// Why a load item mutation was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Missing or malformed name/quantity/weight
    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    /// The package has no commodity weight to budget against
    #[error("Please enter a valid commodity weight before adding load items")]
    BudgetUnset,

    #[error("Total load item weight cannot exceed {budget} (would be {requested})")]
    BudgetExceeded { budget: f64, requested: f64 },

    /// Server-side failure, message passed through verbatim
    #[error("{0}")]
    RemoteCallFailed(String),

    #[error("Load item {0} not found")]
    ItemNotFound(ItemIdentity),

    #[error("Load item {0} is already saved")]
    AlreadyPersisted(ItemIdentity),

    #[error("No load item is awaiting delete confirmation")]
    NoDeletePending,
}

impl LedgerError {
    pub fn is_budget_error(&self) -> bool {
        matches!(
            self,
            LedgerError::BudgetUnset | LedgerError::BudgetExceeded { .. }
        )
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            LedgerError::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }
}
