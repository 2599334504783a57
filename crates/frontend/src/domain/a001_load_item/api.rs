use contracts::domain::a001_load_item::request::{CreateLoadItemsRequest, UpdateLoadItemRequest};
use contracts::domain::a001_load_item::response::{
    CreateLoadItemsResponse, DeleteLoadItemResponse, UpdateLoadItemResponse,
};
use contracts::domain::a001_load_item::LoadItemId;
use contracts::domain::common::AggregateId;
use contracts::shared::api::ApiFailure;
use gloo_net::http::Request;

use crate::shared::api_utils::{api_base, read_json, send_error, serialize_error, with_auth};

/// Delete a persisted load item
pub async fn delete_load_item(id: LoadItemId) -> Result<DeleteLoadItemResponse, ApiFailure> {
    let url = format!("{}/api/load-items/{}", api_base(), id.as_string());
    let response = with_auth(Request::delete(&url))
        .send()
        .await
        .map_err(send_error)?;

    read_json(response).await
}

/// Update a persisted load item; the response carries the confirmed shape
pub async fn update_load_item(
    request: &UpdateLoadItemRequest,
) -> Result<UpdateLoadItemResponse, ApiFailure> {
    let url = format!("{}/api/load-items/{}", api_base(), request.id.as_string());
    let response = with_auth(Request::put(&url))
        .json(&request.data)
        .map_err(serialize_error)?
        .send()
        .await
        .map_err(send_error)?;

    read_json(response).await
}

/// Create the pending items of a package
pub async fn create_load_items(
    package_id: &str,
    request: &CreateLoadItemsRequest,
) -> Result<CreateLoadItemsResponse, ApiFailure> {
    let url = format!(
        "{}/api/packages/{}/load-items",
        api_base(),
        urlencoding::encode(package_id)
    );
    let response = with_auth(Request::post(&url))
        .json(request)
        .map_err(serialize_error)?
        .send()
        .await
        .map_err(send_error)?;

    read_json(response).await
}
