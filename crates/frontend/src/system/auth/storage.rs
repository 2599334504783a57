use contracts::system::auth::StoredAuth;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
/// Signed-in user profile written by the login flow
const AUTH_KEY: &str = "auth";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Получить access token из localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .or_else(|| get_stored_auth()?.access_token)
        .filter(|token| !token.is_empty())
}

/// Профиль вошедшего пользователя; `None`, если его нет или он не читается
pub fn get_stored_auth() -> Option<StoredAuth> {
    let raw = get_local_storage()?.get_item(AUTH_KEY).ok()??;
    match serde_json::from_str::<StoredAuth>(&raw) {
        Ok(auth) => Some(auth),
        Err(e) => {
            log::warn!("Ignoring unreadable '{}' entry in localStorage: {}", AUTH_KEY, e);
            None
        }
    }
}

/// Timezone preselected for newly created users
pub fn default_profile_timezone() -> Option<String> {
    get_stored_auth()?.default_timezone().map(str::to_string)
}
