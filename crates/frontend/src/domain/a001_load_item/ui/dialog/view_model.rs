use crate::domain::a001_load_item::api;
use crate::shared::notifications::{use_notifications, NotificationCenter};
use contracts::domain::a001_load_item::response::{DeleteLoadItemResponse, UpdateLoadItemResponse};
use contracts::domain::a001_load_item::{
    DeleteOutcome, EditOutcome, ItemIdentity, LedgerError, LoadItemForm, LoadItemId, LoadItemLedger,
};
use contracts::domain::a002_shipment_package::{LoadItemDialogData, PackageMap};
use contracts::shared::api::ApiFailure;
use contracts::shared::notification::Notification;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const LOCAL_UPDATE_MESSAGE: &str = "Load Item Updated Successfully";
pub const LOCAL_DELETE_MESSAGE: &str = "Load Item Deleted Successfully.";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this load item?";

/// Which control a budget rejection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetErrorTarget {
    Add,
    Row(ItemIdentity),
}

/// ViewModel диалога позиций груза для одного пакета
#[derive(Clone, Copy)]
pub struct LoadItemDialogVm {
    /// Owned by the page hosting the packages
    pub package_map: RwSignal<PackageMap>,
    pub data: StoredValue<LoadItemDialogData>,
    pub ledger: RwSignal<LoadItemLedger>,
    pub add_form: RwSignal<LoadItemForm>,
    pub add_errors: RwSignal<FieldErrors>,
    pub budget_error: RwSignal<Option<(BudgetErrorTarget, LedgerError)>>,
    pub confirm_open: RwSignal<bool>,
    pub is_updating: RwSignal<bool>,
    pub is_deleting: RwSignal<bool>,
    on_items_changed: Option<Callback<()>>,
    notifications: NotificationCenter,
}

impl LoadItemDialogVm {
    pub fn new(
        package_map: RwSignal<PackageMap>,
        data: LoadItemDialogData,
        on_items_changed: Option<Callback<()>>,
    ) -> Self {
        let ledger = LoadItemLedger::from_package_map(
            &package_map.get_untracked(),
            data.package_index,
            data.commodity_weight,
        );
        let vm = Self {
            package_map,
            data: StoredValue::new(data),
            ledger: RwSignal::new(ledger),
            add_form: RwSignal::new(LoadItemForm::default()),
            add_errors: RwSignal::new(FieldErrors::new()),
            budget_error: RwSignal::new(None),
            confirm_open: RwSignal::new(false),
            is_updating: RwSignal::new(false),
            is_deleting: RwSignal::new(false),
            on_items_changed,
            notifications: use_notifications(),
        };

        // The page's map is the source of truth; re-read on every change
        let ledger = vm.ledger;
        Effect::new(move |_| {
            let map = package_map.get();
            ledger.update(|l| l.sync_from(&map));
        });

        vm
    }

    pub fn weight_label(&self) -> String {
        self.data.with_value(|d| d.weight_label())
    }

    pub fn units(&self) -> String {
        self.data.with_value(|d| d.units().to_string())
    }

    pub fn has_budget(&self) -> bool {
        self.ledger.with(|l| l.remaining_weight().is_some())
    }

    /// `40 / 100 lbs`, or just the running total without a budget
    pub fn weight_summary(&self) -> String {
        let units = self.units();
        self.ledger.with(|l| match l.budget() {
            Some(budget) if l.remaining_weight().is_some() => {
                format!("{} / {} {}", l.running_weight(), budget, units)
            }
            _ => format!("{} {}", l.running_weight(), units),
        })
    }

    pub fn budget_error_for(&self, target: BudgetErrorTarget) -> Option<String> {
        self.budget_error.with(|e| match e {
            Some((t, err)) if *t == target => Some(err.to_string()),
            _ => None,
        })
    }

    fn commit(&self, ledger: LoadItemLedger) {
        self.package_map.update(|map| ledger.write_back(map));
        self.ledger.set(ledger);
    }

    fn items_changed(&self) {
        if let Some(cb) = self.on_items_changed {
            cb.run(());
        }
    }

    /// Добавить позицию из формы как несохранённую
    pub fn add_command(&self) {
        self.budget_error.set(None);

        let draft = match self.add_form.get_untracked().validate() {
            Ok(draft) => draft,
            Err(LedgerError::ValidationFailed(errors)) => {
                self.add_errors.set(errors);
                return;
            }
            Err(e) => {
                self.budget_error.set(Some((BudgetErrorTarget::Add, e)));
                return;
            }
        };
        self.add_errors.set(FieldErrors::new());

        let mut ledger = self.ledger.get_untracked();
        match ledger.admit(&draft) {
            Ok(pending_id) => {
                log::debug!(
                    "package {}: admitted load item {} ({} total)",
                    ledger.package_index(),
                    pending_id,
                    ledger.running_weight()
                );
                self.commit(ledger);
                self.add_form.set(LoadItemForm::cleared());
                self.items_changed();
            }
            Err(e) => self.budget_error.set(Some((BudgetErrorTarget::Add, e))),
        }
    }

    /// Edit one row.
    ///
    /// Field errors are returned to the row; budget errors are kept on the vm
    /// so the row can show them as helper text.
    pub fn edit_command(&self, target: ItemIdentity, form: LoadItemForm) -> Result<(), FieldErrors> {
        self.budget_error.set(None);

        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(LedgerError::ValidationFailed(errors)) => return Err(errors),
            Err(e) => {
                self.budget_error.set(Some((BudgetErrorTarget::Row(target), e)));
                return Ok(());
            }
        };

        let mut ledger = self.ledger.get_untracked();
        match ledger.edit(&target, &draft) {
            Ok(EditOutcome::Applied) => {
                self.commit(ledger);
                self.notifications.success(LOCAL_UPDATE_MESSAGE);
            }
            Ok(EditOutcome::RemoteUpdate(request)) => {
                let vm = *self;
                vm.is_updating.set(true);
                spawn_local(async move {
                    let result = api::update_load_item(&request).await;
                    let mut ledger = vm.ledger.get_untracked();
                    ledger.sync_from(&vm.package_map.get_untracked());
                    let notification = settle_update(&mut ledger, request.id, result);
                    if !notification.is_error() {
                        vm.commit(ledger);
                    }
                    vm.notifications.notify(notification);
                    vm.is_updating.set(false);
                });
            }
            Err(e) if e.is_budget_error() => {
                self.budget_error.set(Some((BudgetErrorTarget::Row(target), e)));
            }
            Err(e) => self.notifications.error(e.to_string()),
        }
        Ok(())
    }

    /// First step of a delete: open the confirmation prompt
    pub fn request_delete(&self, target: ItemIdentity) {
        let mut result = Ok(());
        self.ledger.update(|l| result = l.request_delete(&target));
        match result {
            Ok(()) => self.confirm_open.set(true),
            Err(e) => self.notifications.error(e.to_string()),
        }
    }

    pub fn cancel_delete(&self) {
        self.ledger.update(|l| l.cancel_delete());
        self.confirm_open.set(false);
    }

    /// Second step of a delete
    pub fn confirm_delete(&self) {
        let mut ledger = self.ledger.get_untracked();
        match ledger.confirm_delete() {
            Ok(DeleteOutcome::Removed(item)) => {
                log::debug!("package {}: removed pending item {}", ledger.package_index(), item.identity);
                self.commit(ledger);
                self.confirm_open.set(false);
                self.notifications.success(LOCAL_DELETE_MESSAGE);
                self.items_changed();
            }
            Ok(DeleteOutcome::RemoteDelete(id)) => {
                // prompt consumed; the item stays until the server confirms
                self.ledger.set(ledger);
                let vm = *self;
                vm.is_deleting.set(true);
                spawn_local(async move {
                    let result = api::delete_load_item(id).await;
                    let mut ledger = vm.ledger.get_untracked();
                    ledger.sync_from(&vm.package_map.get_untracked());
                    let notification = settle_delete(&mut ledger, id, result);
                    let removed = !notification.is_error();
                    if removed {
                        vm.commit(ledger);
                    }
                    vm.notifications.notify(notification);
                    if removed {
                        vm.items_changed();
                    }
                    vm.is_deleting.set(false);
                    vm.confirm_open.set(false);
                });
            }
            Err(e) => {
                self.confirm_open.set(false);
                self.notifications.error(e.to_string());
            }
        }
    }
}

/// Outcome of a remote update applied to the ledger.
///
/// The ledger changes only on success; the returned notification goes to
/// the snackbar either way.
pub(crate) fn settle_update(
    ledger: &mut LoadItemLedger,
    id: LoadItemId,
    result: Result<UpdateLoadItemResponse, ApiFailure>,
) -> Notification {
    match result {
        Ok(response) => {
            if let Err(e) = ledger.apply_remote_update(id, &response.data) {
                log::warn!("updated load item vanished locally: {}", e);
            }
            Notification::success(non_empty_or(response.message, LOCAL_UPDATE_MESSAGE))
        }
        Err(failure) => {
            log::warn!("update of load item {} failed: {}", id, failure);
            Notification::error(failure.message)
        }
    }
}

/// Same for a remote delete; a failure leaves the item in place
pub(crate) fn settle_delete(
    ledger: &mut LoadItemLedger,
    id: LoadItemId,
    result: Result<DeleteLoadItemResponse, ApiFailure>,
) -> Notification {
    match result {
        Ok(response) => {
            if let Err(e) = ledger.apply_remote_delete(id) {
                log::warn!("deleted load item vanished locally: {}", e);
            }
            Notification::success(non_empty_or(response.message, LOCAL_DELETE_MESSAGE))
        }
        Err(failure) => {
            log::warn!("delete of load item {} failed: {}", id, failure);
            Notification::error(failure.message)
        }
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_load_item::response::UpdatedLoadItem;
    use contracts::domain::a001_load_item::{LoadItem, LoadItemDraft};
    use contracts::domain::a002_shipment_package::PackageMap;
    use contracts::shared::api::{ApiMessage, DataResponse};

    fn ledger_with_saved_drum() -> LoadItemLedger {
        let mut map = PackageMap::new();
        let draft = LoadItemDraft::new("Drum", 2, 40.0).unwrap();
        map.set_items(0, vec![LoadItem::persisted(LoadItemId(7), &draft)]);
        LoadItemLedger::from_package_map(&map, 0, Some(100.0))
    }

    #[test]
    fn test_failed_update_keeps_items_and_reports_server_message() {
        let mut ledger = ledger_with_saved_drum();
        let before = ledger.items().to_vec();

        let failure = ApiFailure::from_response(409, r#"{"message":"Load item already shipped"}"#);
        let notification = settle_update(&mut ledger, LoadItemId(7), Err(failure));

        assert!(notification.is_error());
        assert_eq!(notification.message, "Load item already shipped");
        assert_eq!(ledger.items(), &before[..]);
    }

    #[test]
    fn test_update_takes_server_shape() {
        let mut ledger = ledger_with_saved_drum();
        let response = DataResponse {
            message: String::new(),
            data: UpdatedLoadItem {
                name: "Steel drum".into(),
                item_quantity: 3,
                item_weight: 45.0,
            },
        };
        let notification = settle_update(&mut ledger, LoadItemId(7), Ok(response));

        assert!(!notification.is_error());
        assert_eq!(notification.message, LOCAL_UPDATE_MESSAGE);
        assert_eq!(ledger.items()[0].name, "Steel drum");
        assert_eq!(ledger.running_weight(), 45.0);
    }

    #[test]
    fn test_failed_delete_keeps_item() {
        let mut ledger = ledger_with_saved_drum();
        let notification = settle_delete(
            &mut ledger,
            LoadItemId(7),
            Err(ApiFailure::from_response(500, "")),
        );

        assert!(notification.is_error());
        assert_eq!(notification.message, "HTTP 500");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.running_weight(), 40.0);
    }

    #[test]
    fn test_delete_removes_item_with_server_message() {
        let mut ledger = ledger_with_saved_drum();
        let response = ApiMessage {
            message: "Load item deleted".into(),
        };
        let notification = settle_delete(&mut ledger, LoadItemId(7), Ok(response));

        assert_eq!(notification, Notification::success("Load item deleted"));
        assert!(ledger.is_empty());
    }
}
