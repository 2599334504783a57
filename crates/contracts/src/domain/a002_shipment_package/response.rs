use super::aggregate::{PackageMap, ShipmentPackage};
use crate::domain::a001_load_item::aggregate::LoadItem;
use crate::shared::api::DataResponse;
use serde::{Deserialize, Serialize};

/// One package of `GET /api/shipments/{id}/packages`, with its saved items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageWithItems {
    #[serde(flatten)]
    pub package: ShipmentPackage,
    #[serde(default)]
    pub load_items: Vec<LoadItem>,
}

pub type ShipmentPackagesResponse = DataResponse<Vec<PackageWithItems>>;

/// Split the fetched packages into the page's records and its package map
pub fn into_page_state(records: Vec<PackageWithItems>) -> (Vec<ShipmentPackage>, PackageMap) {
    let mut map = PackageMap::new();
    let packages = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            map.set_items(index, record.load_items);
            record.package
        })
        .collect();
    (packages, map)
}
