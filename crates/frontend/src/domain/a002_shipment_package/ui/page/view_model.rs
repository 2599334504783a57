use crate::domain::a001_load_item::api as load_item_api;
use crate::domain::a002_shipment_package::api;
use crate::shared::notifications::{use_notifications, NotificationCenter};
use contracts::domain::a001_load_item::request::CreateLoadItemsRequest;
use contracts::domain::a001_load_item::LoadItemLedger;
use contracts::domain::a002_shipment_package::{
    into_page_state, LoadItemDialogData, PackageIndex, PackageMap, ShipmentPackage,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// ViewModel страницы пакетов отгрузки.
///
/// Владеет картой пакетов, общей для всех открываемых диалогов позиций.
#[derive(Clone, Copy)]
pub struct ShipmentPackagesVm {
    pub shipment_id: StoredValue<String>,
    pub packages: RwSignal<Vec<ShipmentPackage>>,
    pub package_map: RwSignal<PackageMap>,
    pub is_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    /// Set by the dialog on add/delete, cleared once nothing is pending
    pub has_unsaved: RwSignal<bool>,
    pub dialog: RwSignal<Option<LoadItemDialogData>>,
    pub dialog_open: RwSignal<bool>,
    pub saving: RwSignal<Option<PackageIndex>>,
    notifications: NotificationCenter,
}

impl ShipmentPackagesVm {
    pub fn new(shipment_id: String) -> Self {
        Self {
            shipment_id: StoredValue::new(shipment_id),
            packages: RwSignal::new(Vec::new()),
            package_map: RwSignal::new(PackageMap::new()),
            is_loading: RwSignal::new(false),
            error: RwSignal::new(None),
            has_unsaved: RwSignal::new(false),
            dialog: RwSignal::new(None),
            dialog_open: RwSignal::new(false),
            saving: RwSignal::new(None),
            notifications: use_notifications(),
        }
    }

    pub fn load(&self) {
        let vm = *self;
        let shipment_id = vm.shipment_id.get_value();
        vm.is_loading.set(true);
        spawn_local(async move {
            match api::fetch_shipment_packages(&shipment_id).await {
                Ok(response) => {
                    let (packages, map) = into_page_state(response.data);
                    log::debug!(
                        "shipment {}: loaded {} packages",
                        shipment_id,
                        packages.len()
                    );
                    vm.packages.set(packages);
                    vm.package_map.set(map);
                    vm.has_unsaved.set(false);
                    vm.error.set(None);
                }
                Err(failure) => {
                    log::warn!("loading packages of {} failed: {}", shipment_id, failure);
                    vm.error.set(Some(failure.message));
                }
            }
            vm.is_loading.set(false);
        });
    }

    pub fn open_dialog(&self, index: PackageIndex) {
        let data = self.packages.with_untracked(|packages| {
            packages
                .get(index)
                .map(|package| LoadItemDialogData::for_package(index, package))
        });
        if let Some(data) = data {
            self.dialog.set(Some(data));
            self.dialog_open.set(true);
        }
    }

    pub fn on_items_changed(&self) {
        let pending = self.package_map.with_untracked(|m| m.has_pending_items());
        self.has_unsaved.set(pending);
    }

    /// `2 items, 40 / 100 lbs`
    pub fn summary(&self, index: PackageIndex) -> String {
        let (count, weight) = self
            .package_map
            .with(|m| (m.items(index).len(), m.total_weight(index)));
        let data = self.packages.with(|packages| {
            packages
                .get(index)
                .map(|package| LoadItemDialogData::for_package(index, package))
        });
        match data {
            Some(data) => match data.commodity_weight.filter(|w| w.is_finite() && *w > 0.0) {
                Some(budget) => format!("{} items, {} / {} {}", count, weight, budget, data.units()),
                None => format!("{} items, {} {}", count, weight, data.units()),
            },
            None => format!("{} items", count),
        }
    }

    pub fn pending_count(&self, index: PackageIndex) -> usize {
        self.package_map.with(|m| m.pending_count(index))
    }

    /// Отправить несохранённые позиции пакета и подставить серверные id
    pub fn save_pending_command(&self, index: PackageIndex) {
        let Some(package) = self.packages.with_untracked(|p| p.get(index).cloned()) else {
            return;
        };
        let request = self
            .package_map
            .with_untracked(|m| CreateLoadItemsRequest::from_items(m.items(index)));
        if request.is_empty() {
            return;
        }

        let vm = *self;
        vm.saving.set(Some(index));
        spawn_local(async move {
            match load_item_api::create_load_items(&package.id, &request).await {
                Ok(response) => {
                    let mut ledger = LoadItemLedger::from_package_map(
                        &vm.package_map.get_untracked(),
                        index,
                        package.commodity_weight,
                    );
                    for created in &response.data {
                        if let Err(e) = ledger.confirm_created(created.temp_id, created.id) {
                            log::warn!("package {}: {}", package.id, e);
                        }
                    }
                    vm.package_map.update(|m| ledger.write_back(m));
                    vm.on_items_changed();
                    vm.notifications.success(response.message);
                }
                Err(failure) => {
                    log::warn!("saving items of package {} failed: {}", package.id, failure);
                    vm.notifications.error(failure.message);
                }
            }
            vm.saving.set(None);
        });
    }
}
