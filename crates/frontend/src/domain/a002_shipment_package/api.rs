use contracts::domain::a002_shipment_package::ShipmentPackagesResponse;
use contracts::shared::api::ApiFailure;
use gloo_net::http::Request;

use crate::shared::api_utils::{api_base, read_json, send_error, with_auth};

/// Fetch the packages of a shipment together with their saved load items
pub async fn fetch_shipment_packages(
    shipment_id: &str,
) -> Result<ShipmentPackagesResponse, ApiFailure> {
    let url = format!(
        "{}/api/shipments/{}/packages",
        api_base(),
        urlencoding::encode(shipment_id)
    );
    let response = with_auth(Request::get(&url))
        .send()
        .await
        .map_err(send_error)?;

    read_json(response).await
}
