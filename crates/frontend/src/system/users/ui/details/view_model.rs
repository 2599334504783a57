use crate::shared::notifications::{use_notifications, NotificationCenter};
use crate::system::auth::storage;
use crate::system::users::api;
use contracts::shared::validation::FieldErrors;
use contracts::system::roles::{selected_roles_label, Role, RoleId};
use contracts::system::users::ManageUserForm;
use leptos::prelude::*;
use leptos::task::spawn_local;

const SAVED_MESSAGE: &str = "User saved";

#[derive(Clone, Copy)]
pub struct ManageUserVm {
    pub user_id: StoredValue<Option<String>>,
    pub form: RwSignal<ManageUserForm>,
    pub errors: RwSignal<FieldErrors>,
    pub roles: RwSignal<Vec<Role>>,
    pub roles_open: RwSignal<bool>,
    pub is_loading: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
    notifications: NotificationCenter,
}

impl ManageUserVm {
    pub fn new(user_id: Option<String>, preselected_role: Option<RoleId>) -> Self {
        let timezone = storage::default_profile_timezone();
        Self {
            user_id: StoredValue::new(user_id),
            form: RwSignal::new(ManageUserForm::initial(
                None,
                preselected_role,
                timezone.as_deref(),
            )),
            errors: RwSignal::new(FieldErrors::new()),
            roles: RwSignal::new(Vec::new()),
            roles_open: RwSignal::new(false),
            is_loading: RwSignal::new(false),
            is_saving: RwSignal::new(false),
            notifications: use_notifications(),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.user_id.with_value(|id| id.is_some())
    }

    pub fn roles_label(&self) -> String {
        let selected = self.form.with(|f| f.roles.clone());
        self.roles.with(|roles| selected_roles_label(roles, &selected))
    }

    pub fn error_for(&self, field: &str) -> Option<String> {
        self.errors.with(|e| e.get(field).map(str::to_string))
    }

    /// Roles always; the user itself in edit mode
    pub fn load(&self) {
        let vm = *self;
        vm.is_loading.set(true);
        spawn_local(async move {
            match api::fetch_roles().await {
                Ok(roles) => vm.roles.set(roles),
                Err(failure) => {
                    log::warn!("loading roles failed: {}", failure);
                    vm.notifications.error(failure.message);
                }
            }

            if let Some(id) = vm.user_id.get_value() {
                match api::fetch_user(&id).await {
                    Ok(user) => {
                        let timezone = storage::default_profile_timezone();
                        vm.form
                            .set(ManageUserForm::initial(Some(&user), None, timezone.as_deref()));
                    }
                    Err(failure) => {
                        log::warn!("loading user {} failed: {}", id, failure);
                        vm.notifications.error(failure.message);
                    }
                }
            }
            vm.is_loading.set(false);
        });
    }

    pub fn toggle_role(&self, role: RoleId) {
        self.form.update(|f| f.toggle_role(role));
        self.errors.update(|e| {
            e.remove("roles");
        });
    }

    /// Validate, then create or update depending on the mode
    pub fn save_command(&self, on_saved: Callback<()>) {
        let payload = match self.form.get_untracked().validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.errors.set(errors);
                return;
            }
        };
        self.errors.set(FieldErrors::new());

        let vm = *self;
        vm.is_saving.set(true);
        spawn_local(async move {
            let result = match vm.user_id.get_value() {
                Some(id) => api::update_user(&id, &payload).await,
                None => api::create_user(&payload).await,
            };
            match result {
                Ok(response) => {
                    let message = if response.message.trim().is_empty() {
                        SAVED_MESSAGE.to_string()
                    } else {
                        response.message
                    };
                    vm.notifications.success(message);
                    on_saved.run(());
                }
                Err(failure) if failure.has_field_errors() => {
                    log::debug!("user form rejected: {}", failure);
                    vm.errors.set(failure.field_errors);
                }
                Err(failure) => {
                    log::warn!("saving user failed: {}", failure);
                    vm.notifications.error(failure.message);
                }
            }
            vm.is_saving.set(false);
        });
    }
}
