//! Weather service client

use crate::error::{FetchError, Resource};
use crate::http::get_json;
use crate::types::{WeatherResponse, WeatherSnapshot};
use reqwest::Client;
use std::fmt;
use std::future::Future;

/// Current-conditions lookup by city name
pub trait WeatherClient: Send + Sync {
    /// Fetch current conditions for `city`
    ///
    /// An unknown city is reported as [`FetchError::NotFound`].
    fn current(&self, city: &str) -> impl Future<Output = Result<WeatherSnapshot, FetchError>> + Send;
}

/// OpenWeatherMap client, metric units
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a client with a default `reqwest` client
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Create a client sharing an existing `reqwest` client
    #[must_use]
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

// The API key stays out of debug output
impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WeatherClient for OpenWeatherClient {
    fn current(&self, city: &str) -> impl Future<Output = Result<WeatherSnapshot, FetchError>> + Send {
        let city = city.to_string();
        async move {
            let response: WeatherResponse = get_json(
                &self.client,
                &self.base_url,
                "/weather",
                &[
                    ("q", city.as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
                Resource::Weather,
            )
            .await?;
            Ok(WeatherSnapshot::from(response))
        }
    }
}
