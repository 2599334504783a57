//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.

use crate::system::auth::storage;
use contracts::shared::api::ApiFailure;
use gloo_net::http::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Port the API server listens on, on the same host as the page
pub const API_PORT: u16 = 3000;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using [`API_PORT`] for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Значение параметра строки запроса текущей страницы
pub fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    parse_query(&search).remove(name)
}

/// Параметры строки запроса; пустые значения отбрасываются
fn parse_query(search: &str) -> HashMap<String, String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
}

/// Attach the bearer token when one is stored
pub fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Decode a JSON body, turning non-2xx responses into [`ApiFailure`]
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiFailure> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiFailure::from_response(status, &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiFailure::message(format!("Failed to parse response: {}", e)))
}

pub fn send_error(e: gloo_net::Error) -> ApiFailure {
    ApiFailure::message(format!("Failed to send request: {}", e))
}

pub fn serialize_error(e: gloo_net::Error) -> ApiFailure {
    ApiFailure::message(format!("Failed to serialize request: {}", e))
}
