//! Shared GET-and-decode plumbing for both clients

use crate::error::{FetchError, Resource};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build the `reqwest` client shared by the directory and weather clients
///
/// Without a timeout a hung upstream call keeps its screen loading until the
/// screen is left and the fetch is cancelled.
///
/// # Errors
///
/// Returns the `reqwest` error if the TLS backend cannot be initialised.
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Issue a GET and decode the JSON body
///
/// `endpoint` is only used for logging so query secrets never reach the logs.
pub(crate) async fn get_json<T>(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    query: &[(&str, &str)],
    resource: Resource,
) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let url = format!("{}{endpoint}", base_url.trim_end_matches('/'));
    tracing::debug!(%resource, endpoint, "Fetching");

    let response = client.get(&url).query(query).send().await.map_err(|e| {
        tracing::warn!(%resource, endpoint, error = %e, "Request failed");
        FetchError::Network {
            resource,
            message: e.to_string(),
        }
    })?;

    match response.status() {
        status if status.is_success() => {},
        StatusCode::NOT_FOUND => {
            tracing::warn!(%resource, endpoint, "Upstream reported not found");
            return Err(FetchError::NotFound { resource });
        },
        status => {
            tracing::warn!(%resource, endpoint, status = status.as_u16(), "Upstream error status");
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        },
    }

    let body = response.bytes().await.map_err(|e| FetchError::Network {
        resource,
        message: e.to_string(),
    })?;

    serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(%resource, endpoint, error = %e, "Response body did not decode");
        FetchError::Decode {
            resource,
            message: e.to_string(),
        }
    })
}
