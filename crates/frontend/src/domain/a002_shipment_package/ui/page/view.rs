use super::view_model::ShipmentPackagesVm;
use crate::domain::a001_load_item::ui::dialog::LoadItemDialog;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ShipmentPackagesPage(shipment_id: String) -> impl IntoView {
    let vm = ShipmentPackagesVm::new(shipment_id);
    vm.load();

    view! {
        <div class="details-container shipment-packages">
            <div class="details-header">
                <h3>
                    {icon("shipments")}
                    {move || format!("Shipment {} packages", vm.shipment_id.get_value())}
                </h3>
                <Show when=move || vm.has_unsaved.get()>
                    <span class="badge badge-warning">"Unsaved load items"</span>
                </Show>
            </div>

            {move || vm.error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            })}

            <Show when=move || !vm.is_loading.get() fallback=|| view! { <Spinner /> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Package"</th>
                            <th>"Load items"</th>
                            <th>"Pending"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || 0..vm.packages.with(|p| p.len())
                            key=|index| *index
                            children=move |index| {
                                let label = vm.packages.with_untracked(|p| {
                                    p.get(index).map(|p| p.label.clone()).unwrap_or_default()
                                });
                                view! {
                                    <tr>
                                        <td>{label}</td>
                                        <td>{move || vm.summary(index)}</td>
                                        <td>{move || vm.pending_count(index)}</td>
                                        <td class="actions">
                                            <button
                                                class="btn btn-secondary"
                                                on:click=move |_| vm.open_dialog(index)
                                            >
                                                {icon("edit")}
                                                {"Load items"}
                                            </button>
                                            <button
                                                class="btn btn-primary"
                                                on:click=move |_| vm.save_pending_command(index)
                                                disabled=move || {
                                                    vm.pending_count(index) == 0 || vm.saving.get().is_some()
                                                }
                                            >
                                                {icon("save")}
                                                {move || if vm.saving.get() == Some(index) {
                                                    "Saving..."
                                                } else {
                                                    "Save pending items"
                                                }}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            {move || vm.dialog.get().map(|data| view! {
                <LoadItemDialog
                    open=vm.dialog_open
                    package_map=vm.package_map
                    dialog_data=data
                    on_items_changed=Callback::new(move |_| vm.on_items_changed())
                />
            })}
        </div>
    }
}
