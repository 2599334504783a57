use super::view_model::{BudgetErrorTarget, LoadItemDialogVm, DELETE_CONFIRMATION};
use crate::shared::confirm_dialog::ConfirmDialog;
use crate::shared::icons::icon;
use contracts::domain::a001_load_item::{LedgerError, LoadItem, LoadItemForm};
use contracts::domain::a002_shipment_package::{LoadItemDialogData, PackageMap};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use thaw::*;

fn field_error(errors: RwSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|e| {
            e.get(field)
                .map(|message| view! { <span class="field-error">{message.to_string()}</span> })
        })
    }
}

fn budget_error(vm: LoadItemDialogVm, target: BudgetErrorTarget) -> impl IntoView {
    move || {
        vm.budget_error_for(target)
            .map(|message| view! { <span class="field-error budget-error">{message}</span> })
    }
}

/// Row key that changes with the item, so an edited row starts from the new values
fn row_key(item: &LoadItem) -> String {
    format!(
        "{}|{}|{}|{}",
        item.identity.key(),
        item.name,
        item.quantity,
        item.weight
    )
}

#[component]
pub fn LoadItemDialog(
    open: RwSignal<bool>,
    package_map: RwSignal<PackageMap>,
    dialog_data: LoadItemDialogData,
    #[prop(optional)] on_items_changed: Option<Callback<()>>,
) -> impl IntoView {
    let vm = LoadItemDialogVm::new(package_map, dialog_data, on_items_changed);

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>
                        <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                            <span>"Add Load Item"</span>
                            <Show when=move || vm.is_updating.get()>
                                <Spinner size=SpinnerSize::Tiny />
                            </Show>
                        </Flex>
                    </DialogTitle>
                    <DialogContent>
                        <div class="details-form load-item-form">
                            <div class="form-group">
                                <label for="load-item-name">{"Name"}</label>
                                <input
                                    type="text"
                                    id="load-item-name"
                                    prop:value=move || vm.add_form.get().item_name
                                    on:input=move |ev| {
                                        vm.add_form.update(|f| f.item_name = event_target_value(&ev));
                                    }
                                    placeholder="Item name"
                                />
                                {field_error(vm.add_errors, "item_name")}
                            </div>

                            <div class="form-group">
                                <label for="load-item-quantity">{"Quantity"}</label>
                                <QuantityStepper form=vm.add_form input_id="load-item-quantity" />
                                {field_error(vm.add_errors, "item_quantity")}
                            </div>

                            <div class="form-group">
                                <label for="load-item-weight">{vm.weight_label()}</label>
                                <input
                                    type="number"
                                    id="load-item-weight"
                                    min="1"
                                    prop:value=move || vm.add_form.get().item_weight
                                    on:input=move |ev| {
                                        vm.add_form.update(|f| f.item_weight = event_target_value(&ev));
                                    }
                                />
                                {field_error(vm.add_errors, "item_weight")}
                                {budget_error(vm, BudgetErrorTarget::Add)}
                                <Show when=move || !vm.has_budget()>
                                    <span class="helper-text">{LedgerError::BudgetUnset.to_string()}</span>
                                </Show>
                            </div>

                            <div class="details-actions">
                                <button
                                    class="btn btn-primary"
                                    on:click=move |_| vm.add_command()
                                    disabled=move || !vm.add_form.get().can_submit()
                                >
                                    {icon("plus")}
                                    {"Add"}
                                </button>
                                <span class="load-item-total">
                                    {move || format!("Total: {}", vm.weight_summary())}
                                </span>
                            </div>
                        </div>

                        <div class="load-item-list">
                            <Show
                                when=move || vm.ledger.with(|l| !l.items().is_empty())
                                fallback=|| view! { <p class="empty-state">"No load items yet"</p> }
                            >
                                <For
                                    each=move || vm.ledger.get().items().to_vec()
                                    key=row_key
                                    children=move |item: LoadItem| {
                                        view! { <LoadItemRow vm=vm item=item /> }
                                    }
                                />
                            </Show>
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| open.set(false)
                        >
                            "Close"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>

        <ConfirmDialog
            open=vm.confirm_open
            message=DELETE_CONFIRMATION
            on_confirm=Callback::new(move |_| vm.confirm_delete())
            on_cancel=Callback::new(move |_| vm.cancel_delete())
            is_loading=Signal::derive(move || vm.is_deleting.get())
        />
    }
}

/// `-` / input / `+`; the input keeps digits only
#[component]
fn QuantityStepper(form: RwSignal<LoadItemForm>, #[prop(into)] input_id: String) -> impl IntoView {
    view! {
        <div class="quantity-stepper">
            <button
                class="btn btn-icon"
                on:click=move |_| form.update(|f| f.decrement_quantity())
                disabled=move || form.get().quantity_value() <= 1
            >
                {icon("chevron-down")}
            </button>
            <input
                type="text"
                id=input_id
                inputmode="numeric"
                prop:value=move || form.get().item_quantity
                on:input=move |ev| {
                    form.update(|f| f.set_quantity_input(&event_target_value(&ev)));
                }
            />
            <button class="btn btn-icon" on:click=move |_| form.update(|f| f.increment_quantity())>
                {icon("chevron-up")}
            </button>
        </div>
    }
}

/// One existing item with its own edit form
#[component]
fn LoadItemRow(vm: LoadItemDialogVm, item: LoadItem) -> impl IntoView {
    let identity = item.identity;
    let key = identity.key();
    let form = RwSignal::new(LoadItemForm::from_item(&item));
    let errors = RwSignal::new(FieldErrors::new());
    let original = StoredValue::new(item);

    let is_dirty = move || original.with_value(|item| form.get().is_dirty_against(item));

    let on_update = move |_| match vm.edit_command(identity, form.get_untracked()) {
        Ok(()) => errors.set(FieldErrors::new()),
        Err(field_errors) => errors.set(field_errors),
    };

    view! {
        <div class="load-item-row" class:load-item-row--pending=identity.is_pending()>
            <div class="form-group">
                <input
                    type="text"
                    prop:value=move || form.get().item_name
                    on:input=move |ev| form.update(|f| f.item_name = event_target_value(&ev))
                />
                {field_error(errors, "item_name")}
            </div>
            <div class="form-group">
                <QuantityStepper form=form input_id=format!("{}-quantity", key) />
                {field_error(errors, "item_quantity")}
            </div>
            <div class="form-group">
                <input
                    type="number"
                    min="1"
                    title=vm.weight_label()
                    prop:value=move || form.get().item_weight
                    on:input=move |ev| form.update(|f| f.item_weight = event_target_value(&ev))
                />
                {field_error(errors, "item_weight")}
                {budget_error(vm, BudgetErrorTarget::Row(identity))}
            </div>
            <div class="load-item-row__actions">
                <button
                    class="btn btn-secondary"
                    title="Update"
                    on:click=on_update
                    disabled=move || vm.is_updating.get() || !is_dirty()
                >
                    {icon("save")}
                </button>
                <button
                    class="btn btn-danger"
                    title="Delete"
                    on:click=move |_| vm.request_delete(identity)
                    disabled=move || vm.is_deleting.get()
                >
                    {icon("delete")}
                </button>
            </div>
        </div>
    }
}
