use crate::domain::a001_load_item::aggregate::LoadItem;
use crate::shared::lenient::{option_f64_from_number_or_string, string_from_string_or_number};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Position of a package inside the shipment form
pub type PackageIndex = usize;

/// Unit shown next to the weight field when the package names none
pub const DEFAULT_WEIGHT_UNITS: &str = "lbs";

// ============================================================================
// Package map
// ============================================================================

/// Load items of every package in the shipment form, keyed by package index.
///
/// Owned by the page that hosts the packages; each load-item dialog reads and
/// rewrites exactly one entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageMap(BTreeMap<PackageIndex, Vec<LoadItem>>);

impl PackageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Позиции одного пакета; пусто, если записи нет
    pub fn items(&self, index: PackageIndex) -> &[LoadItem] {
        self.0.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the items of one package; an empty list removes the entry
    pub fn set_items(&mut self, index: PackageIndex, items: Vec<LoadItem>) {
        if items.is_empty() {
            self.0.remove(&index);
        } else {
            self.0.insert(index, items);
        }
    }

    pub fn contains(&self, index: PackageIndex) -> bool {
        self.0.contains_key(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = PackageIndex> + '_ {
        self.0.keys().copied()
    }

    /// Суммарный вес пакета
    pub fn total_weight(&self, index: PackageIndex) -> f64 {
        self.items(index).iter().map(|item| item.weight).sum()
    }

    /// Whether any package still holds items the server has not confirmed
    pub fn has_pending_items(&self) -> bool {
        self.0
            .values()
            .flatten()
            .any(|item| item.identity.is_pending())
    }

    pub fn pending_count(&self, index: PackageIndex) -> usize {
        self.items(index)
            .iter()
            .filter(|item| item.identity.is_pending())
            .count()
    }
}

// ============================================================================
// Package record
// ============================================================================

/// A package of the shipment as the page displays it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentPackage {
    /// Server id, used when posting pending items
    #[serde(deserialize_with = "string_from_string_or_number")]
    pub id: String,
    pub label: String,
    /// Maximum total weight of the package's load items
    #[serde(default, deserialize_with = "option_f64_from_number_or_string")]
    pub commodity_weight: Option<f64>,
    #[serde(default)]
    pub commodity_units: Option<String>,
}

/// What the load-item dialog needs to know about the package it edits
#[derive(Debug, Clone, PartialEq)]
pub struct LoadItemDialogData {
    pub package_index: PackageIndex,
    pub commodity_weight: Option<f64>,
    pub commodity_units: Option<String>,
}

impl LoadItemDialogData {
    pub fn for_package(package_index: PackageIndex, package: &ShipmentPackage) -> Self {
        Self {
            package_index,
            commodity_weight: package.commodity_weight,
            commodity_units: package.commodity_units.clone(),
        }
    }

    pub fn units(&self) -> &str {
        self.commodity_units
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_WEIGHT_UNITS)
    }

    pub fn weight_label(&self) -> String {
        format!("Weight (in {})", self.units())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_load_item::aggregate::{LoadItemDraft, LoadItemId};

    fn item(weight: f64) -> LoadItem {
        LoadItem::pending(&LoadItemDraft::new("Box", 1, weight).unwrap())
    }

    #[test]
    fn test_set_items_empty_removes_entry() {
        let mut map = PackageMap::new();
        map.set_items(0, vec![item(5.0)]);
        map.set_items(2, vec![item(1.0), item(2.0)]);
        assert_eq!(map.indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(map.total_weight(2), 3.0);

        map.set_items(0, Vec::new());
        assert!(!map.contains(0));
        assert!(map.items(0).is_empty());
        assert!(map.contains(2));
    }

    #[test]
    fn test_pending_tracking() {
        let mut map = PackageMap::new();
        let draft = LoadItemDraft::new("Crate", 1, 4.0).unwrap();
        map.set_items(1, vec![LoadItem::persisted(LoadItemId(3), &draft)]);
        assert!(!map.has_pending_items());

        map.set_items(1, vec![LoadItem::persisted(LoadItemId(3), &draft), item(2.0)]);
        assert!(map.has_pending_items());
        assert_eq!(map.pending_count(1), 1);
    }

    #[test]
    fn test_weight_label_defaults_to_lbs() {
        let package = ShipmentPackage {
            id: "pkg-1".into(),
            label: "Package 1".into(),
            commodity_weight: Some(100.0),
            commodity_units: None,
        };
        let data = LoadItemDialogData::for_package(0, &package);
        assert_eq!(data.weight_label(), "Weight (in lbs)");

        let data = LoadItemDialogData {
            commodity_units: Some("kg".into()),
            ..data
        };
        assert_eq!(data.weight_label(), "Weight (in kg)");
    }
}
