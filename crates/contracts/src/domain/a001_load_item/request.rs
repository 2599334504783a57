use super::aggregate::{LoadItem, LoadItemDraft, LoadItemId, PendingId};
use serde::{Deserialize, Serialize};

/// Body of `PUT /api/load-items/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadItemPayload {
    pub name: String,
    pub quantity: u32,
    pub item_weight: f64,
}

impl From<&LoadItemDraft> for LoadItemPayload {
    fn from(draft: &LoadItemDraft) -> Self {
        Self {
            name: draft.name().to_string(),
            quantity: draft.quantity(),
            item_weight: draft.weight(),
        }
    }
}

/// Update of one persisted item, as handed to the remote collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateLoadItemRequest {
    pub id: LoadItemId,
    pub data: LoadItemPayload,
}

/// One pending item submitted for creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLoadItem {
    pub temp_id: PendingId,
    pub name: String,
    pub quantity: u32,
    pub item_weight: f64,
}

impl NewLoadItem {
    /// `None` for items that already carry a persisted id
    pub fn from_item(item: &LoadItem) -> Option<Self> {
        item.identity.pending_id().map(|temp_id| Self {
            temp_id,
            name: item.name.clone(),
            quantity: item.quantity,
            item_weight: item.weight,
        })
    }
}

/// Body of `POST /api/packages/{package_id}/load-items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLoadItemsRequest {
    pub items: Vec<NewLoadItem>,
}

impl CreateLoadItemsRequest {
    pub fn from_items(items: &[LoadItem]) -> Self {
        Self {
            items: items.iter().filter_map(NewLoadItem::from_item).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
