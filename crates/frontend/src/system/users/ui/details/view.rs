use super::view_model::ManageUserVm;
use crate::shared::icons::icon;
use contracts::system::roles::{Role, RoleId};
use contracts::system::timezones::profile_timezones;
use contracts::system::users::ManageUserForm;
use leptos::prelude::*;
use thaw::*;

/// Text input bound to one form field; typing clears that field's error
fn text_field(
    vm: ManageUserVm,
    field: &'static str,
    label: &'static str,
    input_type: &'static str,
    read: fn(&ManageUserForm) -> String,
    write: fn(&mut ManageUserForm, String),
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=field>{label}</label>
            <input
                type=input_type
                id=field
                prop:value=move || vm.form.with(read)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    vm.form.update(|f| write(f, value));
                    vm.errors.update(|e| {
                        e.remove(field);
                    });
                }
                disabled=move || vm.is_saving.get()
            />
            {move || vm.error_for(field).map(|m| view! { <span class="field-error">{m}</span> })}
        </div>
    }
}

#[component]
pub fn ManageUserDialog(
    open: RwSignal<bool>,
    /// Edit mode when set
    #[prop(default = None)]
    user_id: Option<String>,
    /// Role preselected when creating from a role
    #[prop(default = None)]
    role_id: Option<RoleId>,
    #[prop(optional)] on_saved: Option<Callback<()>>,
) -> impl IntoView {
    let vm = ManageUserVm::new(user_id, role_id);
    vm.load();

    let current_timezone = Memo::new(move |_| vm.form.with(|f| f.profile_timezone.clone()));

    let on_saved = Callback::new(move |_| {
        open.set(false);
        if let Some(cb) = on_saved {
            cb.run(());
        }
    });

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>
                        {move || if vm.is_edit_mode() { "Edit User" } else { "Create User" }}
                    </DialogTitle>
                    <DialogContent>
                        <Show when=move || !vm.is_loading.get() fallback=|| view! { <Spinner /> }>
                            <div class="details-form">
                                {text_field(vm, "first_name", "First Name", "text",
                                    |f| f.first_name.clone(), |f, v| f.first_name = v)}
                                {text_field(vm, "last_name", "Last Name", "text",
                                    |f| f.last_name.clone(), |f, v| f.last_name = v)}
                                {text_field(vm, "email", "Email", "email",
                                    |f| f.email.clone(), |f, v| f.email = v)}
                                {text_field(vm, "mobile", "Phone Number", "tel",
                                    |f| f.mobile.clone(), |f, v| f.mobile = v)}

                                <div class="form-group">
                                    <label>{"Roles"}</label>
                                    <button
                                        class="btn btn-secondary role-select"
                                        on:click=move |_| vm.roles_open.update(|o| *o = !*o)
                                    >
                                        {move || vm.roles_label()}
                                        {move || if vm.roles_open.get() { icon("chevron-up") } else { icon("chevron-down") }}
                                    </button>
                                    <Show when=move || vm.roles_open.get()>
                                        <div class="role-options">
                                            <For
                                                each=move || vm.roles.get()
                                                key=|role| role.id
                                                children=move |role: Role| {
                                                    let id = role.id;
                                                    view! {
                                                        <label class="role-option">
                                                            <input
                                                                type="checkbox"
                                                                prop:checked=move || vm.form.with(|f| f.has_role(id))
                                                                on:change=move |_| vm.toggle_role(id)
                                                            />
                                                            {role.label()}
                                                        </label>
                                                    }
                                                }
                                            />
                                        </div>
                                    </Show>
                                    {move || vm.error_for("roles").map(|m| view! { <span class="field-error">{m}</span> })}
                                </div>

                                <div class="form-group">
                                    <label for="profile_timezone">{"Profile Timezone"}</label>
                                    <select
                                        id="profile_timezone"
                                        on:change=move |ev| {
                                            let value = event_target_value(&ev);
                                            vm.form.update(|f| f.profile_timezone = value);
                                            vm.errors.update(|e| {
                                                e.remove("profile_timezone");
                                            });
                                        }
                                    >
                                        <option value="" selected=move || current_timezone.with(|tz| tz.is_empty())>
                                            "Select timezone"
                                        </option>
                                        {profile_timezones()
                                            .into_iter()
                                            .map(|zone| view! {
                                                <option value=zone selected=move || current_timezone.get() == zone>
                                                    {zone}
                                                </option>
                                            })
                                            .collect_view()}
                                    </select>
                                    {move || vm.error_for("profile_timezone").map(|m| view! { <span class="field-error">{m}</span> })}
                                </div>
                            </div>
                        </Show>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| open.set(false)
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.save_command(on_saved)
                            disabled=Signal::derive(move || vm.is_saving.get() || vm.is_loading.get())
                        >
                            {move || if vm.is_saving.get() {
                                "Please wait..."
                            } else if vm.is_edit_mode() {
                                "Update"
                            } else {
                                "Create"
                            }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
