use contracts::shared::api::{ApiFailure, ApiMessage, DataResponse};
use contracts::system::roles::Role;
use contracts::system::users::{PlatformUser, UserPayload};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_base, read_json, send_error, serialize_error, with_auth};

/// Fetch one user for editing
pub async fn fetch_user(id: &str) -> Result<PlatformUser, ApiFailure> {
    let url = format!("{}/api/users/{}", api_base(), urlencoding::encode(id));
    let response = with_auth(Request::get(&url))
        .send()
        .await
        .map_err(send_error)?;

    let body: DataResponse<PlatformUser> = read_json(response).await?;
    Ok(body.data)
}

/// Roles offered in the role select
pub async fn fetch_roles() -> Result<Vec<Role>, ApiFailure> {
    let response = with_auth(Request::get(&format!("{}/api/roles", api_base())))
        .send()
        .await
        .map_err(send_error)?;

    let body: DataResponse<Vec<Role>> = read_json(response).await?;
    Ok(body.data)
}

/// Create new user
pub async fn create_user(payload: &UserPayload) -> Result<ApiMessage, ApiFailure> {
    let response = with_auth(Request::post(&format!("{}/api/users", api_base())))
        .json(payload)
        .map_err(serialize_error)?
        .send()
        .await
        .map_err(send_error)?;

    read_json(response).await
}

/// Update user
pub async fn update_user(id: &str, payload: &UserPayload) -> Result<ApiMessage, ApiFailure> {
    let url = format!("{}/api/users/{}", api_base(), urlencoding::encode(id));
    let response = with_auth(Request::put(&url))
        .json(payload)
        .map_err(serialize_error)?
        .send()
        .await
        .map_err(send_error)?;

    read_json(response).await
}
