use super::error::LedgerError;
use crate::domain::common::AggregateId;
use crate::shared::lenient::{f64_from_number_or_string, u32_from_number_or_string};
use crate::shared::limits::{character_max_message, LOAD_ITEM_NAME_MAX};
use crate::shared::validation::{required_message, FieldErrors};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Identifier assigned by the remote store once creation is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadItemId(pub i64);

impl LoadItemId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for LoadItemId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(LoadItemId::new)
    }
}

impl fmt::Display for LoadItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-generated token for an item the server has not seen yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingId(pub Uuid);

impl PendingId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for PendingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exactly one of the two ids is carried by an item.
///
/// Serialized flattened into the item as `"id": 7` or `"temp_id": "<uuid>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemIdentity {
    #[serde(rename = "id")]
    Persisted(LoadItemId),
    #[serde(rename = "temp_id")]
    Pending(PendingId),
}

impl ItemIdentity {
    pub fn is_pending(&self) -> bool {
        matches!(self, ItemIdentity::Pending(_))
    }

    pub fn persisted_id(&self) -> Option<LoadItemId> {
        match self {
            ItemIdentity::Persisted(id) => Some(*id),
            ItemIdentity::Pending(_) => None,
        }
    }

    pub fn pending_id(&self) -> Option<PendingId> {
        match self {
            ItemIdentity::Pending(id) => Some(*id),
            ItemIdentity::Persisted(_) => None,
        }
    }

    /// Stable key for keyed list rendering
    pub fn key(&self) -> String {
        match self {
            ItemIdentity::Persisted(id) => format!("id-{}", id),
            ItemIdentity::Pending(id) => format!("tmp-{}", id),
        }
    }
}

impl fmt::Display for ItemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemIdentity::Persisted(id) => write!(f, "#{}", id),
            ItemIdentity::Pending(id) => write!(f, "pending {}", id),
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

fn default_quantity() -> u32 {
    1
}

/// One line item of a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadItem {
    #[serde(flatten)]
    pub identity: ItemIdentity,

    pub name: String,

    #[serde(
        default = "default_quantity",
        deserialize_with = "u32_from_number_or_string"
    )]
    pub quantity: u32,

    #[serde(rename = "item_weight", deserialize_with = "f64_from_number_or_string")]
    pub weight: f64,
}

impl LoadItem {
    /// New unsaved item with a fresh pending id
    pub fn pending(draft: &LoadItemDraft) -> Self {
        Self::with_identity(ItemIdentity::Pending(PendingId::new_v4()), draft)
    }

    pub fn persisted(id: LoadItemId, draft: &LoadItemDraft) -> Self {
        Self::with_identity(ItemIdentity::Persisted(id), draft)
    }

    pub fn with_identity(identity: ItemIdentity, draft: &LoadItemDraft) -> Self {
        Self {
            identity,
            name: draft.name().to_string(),
            quantity: draft.quantity(),
            weight: draft.weight(),
        }
    }

    /// Overwrite the editable fields, keeping the identity
    pub fn apply(&mut self, draft: &LoadItemDraft) {
        self.name = draft.name().to_string();
        self.quantity = draft.quantity();
        self.weight = draft.weight();
    }
}

// ============================================================================
// Draft
// ============================================================================

/// Validated name/quantity/weight triple.
///
/// Only constructible through [`LoadItemDraft::new`], so every ledger operation
/// taking a draft can rely on a non-empty name and a positive weight.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadItemDraft {
    name: String,
    quantity: u32,
    weight: f64,
}

impl LoadItemDraft {
    pub fn new(name: impl Into<String>, quantity: u32, weight: f64) -> Result<Self, LedgerError> {
        let name = name.into().trim().to_string();
        let mut errors = FieldErrors::new();

        if name.is_empty() {
            errors.add("item_name", required_message("name"));
        } else if name.chars().count() > LOAD_ITEM_NAME_MAX {
            errors.add("item_name", character_max_message("Name", LOAD_ITEM_NAME_MAX));
        }
        if quantity == 0 {
            errors.add("item_quantity", "Quantity must be at least 1");
        }
        if !weight.is_finite() || weight <= 0.0 {
            errors.add("item_weight", "Weight must be greater than 0");
        }

        errors
            .into_result(Self {
                name,
                quantity,
                weight,
            })
            .map_err(LedgerError::ValidationFailed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl TryFrom<&LoadItem> for LoadItemDraft {
    type Error = LedgerError;

    fn try_from(item: &LoadItem) -> Result<Self, Self::Error> {
        LoadItemDraft::new(item.name.clone(), item.quantity, item.weight)
    }
}
