//! Weight-budget bookkeeping for the load items of one package.
//!
//! The ledger is a local view of one `PackageMap` entry. Mutations that need
//! the server (items with a persisted id) are split in two: the ledger first
//! validates and returns the request to send, and only changes state once the
//! caller reports the confirmed result. Pending items are changed directly.
//!
//! Invariant: after every accepted add or edit, `running_weight() <= budget`.

use super::aggregate::{ItemIdentity, LoadItem, LoadItemDraft, LoadItemId, PendingId};
use super::error::LedgerError;
use super::request::{LoadItemPayload, UpdateLoadItemRequest};
use super::response::UpdatedLoadItem;
use crate::domain::a002_shipment_package::{PackageIndex, PackageMap};

/// Допуск при сравнении суммы весов с бюджетом
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Result of [`LoadItemLedger::edit`]
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Pending item updated in place
    Applied,
    /// Persisted item: nothing changed yet, send this to the server
    RemoteUpdate(UpdateLoadItemRequest),
}

/// Result of [`LoadItemLedger::confirm_delete`]
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// Pending item removed locally
    Removed(LoadItem),
    /// Persisted item: still present until the server confirms the delete
    RemoteDelete(LoadItemId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadItemLedger {
    package_index: PackageIndex,
    items: Vec<LoadItem>,
    budget: Option<f64>,
    delete_prompt: Option<ItemIdentity>,
}

impl LoadItemLedger {
    pub fn new(package_index: PackageIndex, budget: Option<f64>) -> Self {
        Self {
            package_index,
            items: Vec::new(),
            budget,
            delete_prompt: None,
        }
    }

    pub fn from_package_map(
        map: &PackageMap,
        package_index: PackageIndex,
        budget: Option<f64>,
    ) -> Self {
        let mut ledger = Self::new(package_index, budget);
        ledger.sync_from(map);
        ledger
    }

    /// Перечитать позиции пакета из общей карты.
    ///
    /// Запрос на удаление, цель которого исчезла, сбрасывается.
    pub fn sync_from(&mut self, map: &PackageMap) {
        self.items = map.items(self.package_index).to_vec();
        if let Some(target) = self.delete_prompt {
            if self.get(&target).is_none() {
                self.delete_prompt = None;
            }
        }
    }

    /// Записать позиции пакета обратно в карту; пустой список удаляет запись
    pub fn write_back(&self, map: &mut PackageMap) {
        map.set_items(self.package_index, self.items.clone());
    }

    pub fn package_index(&self) -> PackageIndex {
        self.package_index
    }

    pub fn items(&self) -> &[LoadItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn budget(&self) -> Option<f64> {
        self.budget
    }

    pub fn running_weight(&self) -> f64 {
        self.items.iter().map(|item| item.weight).sum()
    }

    /// Weight still admissible, `None` without a usable budget
    pub fn remaining_weight(&self) -> Option<f64> {
        self.effective_budget()
            .ok()
            .map(|budget| (budget - self.running_weight()).max(0.0))
    }

    pub fn get(&self, identity: &ItemIdentity) -> Option<&LoadItem> {
        self.items.iter().find(|item| item.identity == *identity)
    }

    fn position(&self, identity: &ItemIdentity) -> Result<usize, LedgerError> {
        self.items
            .iter()
            .position(|item| item.identity == *identity)
            .ok_or(LedgerError::ItemNotFound(*identity))
    }

    /// A missing, zero, negative or non-finite budget counts as unset
    fn effective_budget(&self) -> Result<f64, LedgerError> {
        match self.budget {
            Some(budget) if budget.is_finite() && budget > 0.0 => Ok(budget),
            _ => Err(LedgerError::BudgetUnset),
        }
    }

    fn check_budget(&self, other_items_weight: f64, weight: f64) -> Result<(), LedgerError> {
        let budget = self.effective_budget()?;
        let requested = other_items_weight + weight;
        if requested > budget + WEIGHT_TOLERANCE {
            return Err(LedgerError::BudgetExceeded { budget, requested });
        }
        Ok(())
    }

    /// Добавить новую позицию, если она укладывается в бюджет
    pub fn admit(&mut self, draft: &LoadItemDraft) -> Result<PendingId, LedgerError> {
        self.check_budget(self.running_weight(), draft.weight())?;

        let pending_id = PendingId::new_v4();
        self.items
            .push(LoadItem::with_identity(ItemIdentity::Pending(pending_id), draft));
        Ok(pending_id)
    }

    /// Edit an item; the budget check leaves the target's current weight out.
    pub fn edit(
        &mut self,
        target: &ItemIdentity,
        draft: &LoadItemDraft,
    ) -> Result<EditOutcome, LedgerError> {
        let index = self.position(target)?;
        let other_items_weight: f64 = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.weight)
            .sum();
        self.check_budget(other_items_weight, draft.weight())?;

        match target {
            ItemIdentity::Pending(_) => {
                self.items[index].apply(draft);
                Ok(EditOutcome::Applied)
            }
            ItemIdentity::Persisted(id) => Ok(EditOutcome::RemoteUpdate(UpdateLoadItemRequest {
                id: *id,
                data: LoadItemPayload::from(draft),
            })),
        }
    }

    /// Replace a persisted item with the shape the server confirmed
    pub fn apply_remote_update(
        &mut self,
        id: LoadItemId,
        confirmed: &UpdatedLoadItem,
    ) -> Result<(), LedgerError> {
        let index = self.position(&ItemIdentity::Persisted(id))?;
        let item = &mut self.items[index];
        item.name = confirmed.name.clone();
        item.quantity = confirmed.item_quantity.max(1);
        item.weight = confirmed.item_weight;
        Ok(())
    }

    /// First step of a delete: remember the target until confirmed
    pub fn request_delete(&mut self, target: &ItemIdentity) -> Result<(), LedgerError> {
        self.position(target)?;
        self.delete_prompt = Some(*target);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.delete_prompt = None;
    }

    pub fn pending_delete(&self) -> Option<ItemIdentity> {
        self.delete_prompt
    }

    /// Second step of a delete.
    ///
    /// The prompt is consumed either way; a failed remote delete leaves the
    /// item in place so the user can try again.
    pub fn confirm_delete(&mut self) -> Result<DeleteOutcome, LedgerError> {
        let target = self
            .delete_prompt
            .take()
            .ok_or(LedgerError::NoDeletePending)?;
        let index = self.position(&target)?;

        match target {
            ItemIdentity::Pending(_) => Ok(DeleteOutcome::Removed(self.items.remove(index))),
            ItemIdentity::Persisted(id) => Ok(DeleteOutcome::RemoteDelete(id)),
        }
    }

    /// Удалить сохранённую позицию после подтверждения сервером
    pub fn apply_remote_delete(&mut self, id: LoadItemId) -> Result<LoadItem, LedgerError> {
        let index = self.position(&ItemIdentity::Persisted(id))?;
        Ok(self.items.remove(index))
    }

    /// Pending → Persisted, once the creation call confirmed the item
    pub fn confirm_created(&mut self, pending: PendingId, id: LoadItemId) -> Result<(), LedgerError> {
        let persisted = ItemIdentity::Persisted(id);
        if self.get(&persisted).is_some() {
            return Err(LedgerError::AlreadyPersisted(persisted));
        }
        let index = self.position(&ItemIdentity::Pending(pending))?;
        self.items[index].identity = persisted;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(weight: f64) -> LoadItemDraft {
        LoadItemDraft::new("Crate", 1, weight).unwrap()
    }

    fn ledger_with(budget: Option<f64>, weights: &[f64]) -> LoadItemLedger {
        let mut ledger = LoadItemLedger::new(0, budget);
        for w in weights {
            ledger.admit(&draft(*w)).unwrap();
        }
        ledger
    }

    #[test]
    fn test_admit_scenario_budget_100() {
        let mut ledger = LoadItemLedger::new(0, Some(100.0));

        ledger.admit(&draft(60.0)).unwrap();
        assert_eq!(ledger.running_weight(), 60.0);

        let err = ledger.admit(&draft(50.0)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::BudgetExceeded {
                budget: 100.0,
                requested: 110.0
            }
        );
        assert_eq!(ledger.running_weight(), 60.0);
        assert_eq!(ledger.len(), 1);

        ledger.admit(&draft(40.0)).unwrap();
        assert_eq!(ledger.running_weight(), 100.0);
        assert_eq!(ledger.remaining_weight(), Some(0.0));
    }

    #[test]
    fn test_admit_without_budget_is_rejected() {
        for budget in [None, Some(0.0), Some(-5.0), Some(f64::INFINITY)] {
            let mut ledger = LoadItemLedger::new(0, budget);
            assert_eq!(ledger.admit(&draft(1.0)), Err(LedgerError::BudgetUnset));
            assert!(ledger.is_empty());
            assert_eq!(ledger.remaining_weight(), None);
        }
    }

    #[test]
    fn test_running_weight_tracks_every_accepted_admit() {
        let budget = 250.0;
        let mut ledger = LoadItemLedger::new(3, Some(budget));
        let mut expected = 0.0;
        let mut seed: u32 = 7;

        for _ in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let weight = f64::from(seed % 40 + 1);
            match ledger.admit(&draft(weight)) {
                Ok(_) => expected += weight,
                Err(LedgerError::BudgetExceeded { .. }) => {
                    assert!(expected + weight > budget);
                }
                Err(other) => panic!("unexpected {:?}", other),
            }
            assert_eq!(ledger.running_weight(), expected);
            assert!(ledger.running_weight() <= budget);
        }
    }

    #[test]
    fn test_float_sums_within_tolerance_are_admitted() {
        let mut ledger = LoadItemLedger::new(0, Some(0.3));
        ledger.admit(&draft(0.1)).unwrap();
        ledger.admit(&draft(0.2)).unwrap();
    }

    #[test]
    fn test_edit_scenario_excludes_target_weight() {
        let mut ledger = ledger_with(Some(100.0), &[60.0, 30.0]);
        let first = ledger.items()[0].identity;

        assert_eq!(ledger.edit(&first, &draft(70.0)), Ok(EditOutcome::Applied));
        assert_eq!(ledger.items()[0].weight, 70.0);
        assert_eq!(ledger.running_weight(), 100.0);

        let err = ledger.edit(&first, &draft(71.0)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::BudgetExceeded {
                budget: 100.0,
                requested: 101.0
            }
        );
        assert_eq!(ledger.items()[0].weight, 70.0);
    }

    #[test]
    fn test_name_and_quantity_edit_at_full_budget() {
        let mut ledger = ledger_with(Some(100.0), &[50.0, 50.0]);
        let second = ledger.items()[1].identity;

        let renamed = LoadItemDraft::new("Renamed crate", 9, 50.0).unwrap();
        assert_eq!(ledger.edit(&second, &renamed), Ok(EditOutcome::Applied));
        assert_eq!(ledger.items()[1].name, "Renamed crate");
        assert_eq!(ledger.items()[1].quantity, 9);
    }

    #[test]
    fn test_edit_persisted_item_defers_to_server() {
        let mut map = PackageMap::new();
        let original = LoadItem::persisted(LoadItemId(11), &draft(20.0));
        map.set_items(0, vec![original.clone()]);
        let mut ledger = LoadItemLedger::from_package_map(&map, 0, Some(50.0));

        let target = ItemIdentity::Persisted(LoadItemId(11));
        let changed = LoadItemDraft::new("Pallet", 2, 25.0).unwrap();
        let outcome = ledger.edit(&target, &changed).unwrap();
        assert_eq!(
            outcome,
            EditOutcome::RemoteUpdate(UpdateLoadItemRequest {
                id: LoadItemId(11),
                data: LoadItemPayload {
                    name: "Pallet".into(),
                    quantity: 2,
                    item_weight: 25.0,
                },
            })
        );
        // untouched until the server confirms
        assert_eq!(ledger.items()[0], original);

        let confirmed = UpdatedLoadItem {
            name: "Pallet".into(),
            item_quantity: 2,
            item_weight: 25.0,
        };
        ledger.apply_remote_update(LoadItemId(11), &confirmed).unwrap();
        assert_eq!(ledger.items()[0].name, "Pallet");
        assert_eq!(ledger.items()[0].identity, target);
        assert_eq!(ledger.running_weight(), 25.0);
    }

    #[test]
    fn test_edit_unknown_item() {
        let mut ledger = ledger_with(Some(10.0), &[1.0]);
        let ghost = ItemIdentity::Persisted(LoadItemId(99));
        assert_eq!(
            ledger.edit(&ghost, &draft(1.0)),
            Err(LedgerError::ItemNotFound(ghost))
        );
    }

    #[test]
    fn test_edit_without_budget() {
        let mut map = PackageMap::new();
        map.set_items(0, vec![LoadItem::pending(&draft(5.0))]);
        let mut ledger = LoadItemLedger::from_package_map(&map, 0, None);
        let target = ledger.items()[0].identity;
        assert_eq!(ledger.edit(&target, &draft(5.0)), Err(LedgerError::BudgetUnset));
    }

    #[test]
    fn test_delete_pending_item_after_confirmation() {
        let mut ledger = ledger_with(Some(100.0), &[10.0, 15.0]);
        let target = ledger.items()[0].identity;

        assert_eq!(ledger.confirm_delete(), Err(LedgerError::NoDeletePending));

        ledger.request_delete(&target).unwrap();
        assert_eq!(ledger.pending_delete(), Some(target));
        match ledger.confirm_delete().unwrap() {
            DeleteOutcome::Removed(item) => assert_eq!(item.weight, 10.0),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(ledger.running_weight(), 15.0);
        assert_eq!(ledger.pending_delete(), None);
    }

    #[test]
    fn test_cancelled_delete_keeps_item() {
        let mut ledger = ledger_with(Some(100.0), &[10.0]);
        let target = ledger.items()[0].identity;
        ledger.request_delete(&target).unwrap();
        ledger.cancel_delete();
        assert_eq!(ledger.confirm_delete(), Err(LedgerError::NoDeletePending));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_failed_remote_delete_leaves_item_actionable() {
        let mut map = PackageMap::new();
        map.set_items(
            0,
            vec![
                LoadItem::persisted(LoadItemId(1), &draft(30.0)),
                LoadItem::persisted(LoadItemId(2), &draft(20.0)),
            ],
        );
        let mut ledger = LoadItemLedger::from_package_map(&map, 0, Some(100.0));
        let target = ItemIdentity::Persisted(LoadItemId(1));

        ledger.request_delete(&target).unwrap();
        assert_eq!(
            ledger.confirm_delete(),
            Ok(DeleteOutcome::RemoteDelete(LoadItemId(1)))
        );
        // remote call failed: nothing applied
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.running_weight(), 50.0);

        // and the user can retry
        ledger.request_delete(&target).unwrap();
        assert!(matches!(
            ledger.confirm_delete(),
            Ok(DeleteOutcome::RemoteDelete(_))
        ));
        let removed = ledger.apply_remote_delete(LoadItemId(1)).unwrap();
        assert_eq!(removed.weight, 30.0);
        assert_eq!(ledger.running_weight(), 20.0);
    }

    #[test]
    fn test_deleting_last_item_clears_package_entry() {
        let mut map = PackageMap::new();
        map.set_items(0, vec![LoadItem::pending(&draft(5.0))]);
        map.set_items(1, vec![LoadItem::pending(&draft(7.0))]);

        let mut ledger = LoadItemLedger::from_package_map(&map, 1, Some(10.0));
        let target = ledger.items()[0].identity;
        ledger.request_delete(&target).unwrap();
        ledger.confirm_delete().unwrap();
        ledger.write_back(&mut map);

        assert!(!map.contains(1));
        assert!(map.contains(0));
    }

    #[test]
    fn test_confirm_created_keeps_fields() {
        let mut ledger = ledger_with(Some(100.0), &[12.0]);
        let before = ledger.items()[0].clone();
        let pending = before.identity.pending_id().unwrap();

        ledger.confirm_created(pending, LoadItemId(501)).unwrap();
        let after = &ledger.items()[0];
        assert_eq!(after.identity, ItemIdentity::Persisted(LoadItemId(501)));
        assert_eq!(
            (&after.name, after.quantity, after.weight),
            (&before.name, before.quantity, before.weight)
        );

        // one-way: the pending id is gone
        assert_eq!(
            ledger.confirm_created(pending, LoadItemId(502)),
            Err(LedgerError::ItemNotFound(ItemIdentity::Pending(pending)))
        );
    }

    #[test]
    fn test_confirm_created_rejects_duplicate_server_id() {
        let mut ledger = ledger_with(Some(100.0), &[1.0, 2.0]);
        let a = ledger.items()[0].identity.pending_id().unwrap();
        let b = ledger.items()[1].identity.pending_id().unwrap();
        ledger.confirm_created(a, LoadItemId(9)).unwrap();
        assert_eq!(
            ledger.confirm_created(b, LoadItemId(9)),
            Err(LedgerError::AlreadyPersisted(ItemIdentity::Persisted(LoadItemId(9))))
        );
    }

    #[test]
    fn test_sync_from_drops_stale_delete_prompt() {
        let mut map = PackageMap::new();
        map.set_items(0, vec![LoadItem::pending(&draft(5.0))]);
        let mut ledger = LoadItemLedger::from_package_map(&map, 0, Some(10.0));
        let target = ledger.items()[0].identity;
        ledger.request_delete(&target).unwrap();

        map.set_items(0, Vec::new());
        ledger.sync_from(&map);
        assert!(ledger.is_empty());
        assert_eq!(ledger.pending_delete(), None);
    }
}
