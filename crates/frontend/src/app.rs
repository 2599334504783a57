use crate::domain::a002_shipment_package::ui::page::ShipmentPackagesPage;
use crate::shared::api_utils::query_param;
use crate::shared::icons::icon;
use crate::shared::notifications::{NotificationCenter, NotificationHost};
use crate::system::users::ui::details::ManageUserDialog;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn App() -> impl IntoView {
    // Snackbar sink shared by every dialog and page
    provide_context(NotificationCenter::new());

    let shipment_id = query_param("shipment");
    let edit_user_id = query_param("user");
    let preselected_role = query_param("role").and_then(|r| r.parse::<i64>().ok());

    let user_dialog_open = RwSignal::new(edit_user_id.is_some());
    // Bumped on each open so the dialog starts from a fresh form
    let user_dialog_session = RwSignal::new(0u32);

    view! {
        <ConfigProvider>
            <div class="app-shell">
                <header class="app-header">
                    <span class="app-title">{icon("shipments")}{"Shipments"}</span>
                    <button
                        class="btn btn-secondary"
                        on:click=move |_| {
                            user_dialog_session.update(|s| *s += 1);
                            user_dialog_open.set(true);
                        }
                    >
                        {icon("users")}
                        {"Create user"}
                    </button>
                </header>

                <main class="app-content">
                    {match shipment_id {
                        Some(id) => view! { <ShipmentPackagesPage shipment_id=id /> }.into_any(),
                        None => view! {
                            <p class="empty-state">"Open a shipment with ?shipment=<id>"</p>
                        }.into_any(),
                    }}
                </main>

                {move || user_dialog_open.get().then(|| {
                    // first session edits the user from the query string, later ones create
                    let user_id = if user_dialog_session.get_untracked() == 0 {
                        edit_user_id.clone()
                    } else {
                        None
                    };
                    view! {
                        <ManageUserDialog
                            open=user_dialog_open
                            user_id=user_id
                            role_id=preselected_role
                        />
                    }
                })}

                <NotificationHost />
            </div>
        </ConfigProvider>
    }
}
