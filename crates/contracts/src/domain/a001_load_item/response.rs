use super::aggregate::{LoadItemId, PendingId};
use crate::shared::api::{ApiMessage, DataResponse};
use crate::shared::lenient::{f64_from_number_or_string, u32_from_number_or_string};
use serde::{Deserialize, Serialize};

/// Item shape confirmed by the server after an update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedLoadItem {
    pub name: String,
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub item_quantity: u32,
    #[serde(deserialize_with = "f64_from_number_or_string")]
    pub item_weight: f64,
}

pub type UpdateLoadItemResponse = DataResponse<UpdatedLoadItem>;

pub type DeleteLoadItemResponse = ApiMessage;

/// Server echo of a created item, with the pending id it replaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedLoadItem {
    pub id: LoadItemId,
    pub temp_id: PendingId,
}

pub type CreateLoadItemsResponse = DataResponse<Vec<CreatedLoadItem>>;
