//! In-memory weather client

use dashboard_api::{FetchError, Resource, WeatherClient, WeatherSnapshot};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct Cities {
    known: HashMap<String, WeatherSnapshot>,
    delays: HashMap<String, Duration>,
    outage: Option<FetchError>,
    queries: Vec<String>,
}

/// Weather client answering from a fixed table of cities
///
/// Lookups are case-insensitive. Unknown cities answer
/// [`FetchError::NotFound`], like the real service.
#[derive(Debug, Clone, Default)]
pub struct StaticWeather {
    cities: Arc<Mutex<Cities>>,
}

impl StaticWeather {
    /// Empty table; every lookup is not found
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city answering with `snapshot`
    #[must_use]
    pub fn with_city(self, city: &str, snapshot: WeatherSnapshot) -> Self {
        self.lock().known.insert(city.to_lowercase(), snapshot);
        self
    }

    /// Delay answers for `city`
    #[must_use]
    pub fn slow_for(self, city: &str, delay: Duration) -> Self {
        self.lock().delays.insert(city.to_lowercase(), delay);
        self
    }

    /// Fail every lookup with `error`
    #[must_use]
    pub fn unavailable(self, error: FetchError) -> Self {
        self.lock().outage = Some(error);
        self
    }

    /// Cities queried so far, in order
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.lock().queries.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cities> {
        self.cities.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Snapshot with plausible values for `city`
#[must_use]
pub fn snapshot(city: &str, temperature: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        city_name: city.to_string(),
        temperature,
        humidity: 60.0,
        condition_description: "scattered clouds".to_string(),
        icon: "03d".to_string(),
    }
}

impl WeatherClient for StaticWeather {
    fn current(&self, city: &str) -> impl Future<Output = Result<WeatherSnapshot, FetchError>> + Send {
        let key = city.to_lowercase();
        let (delay, answer) = {
            let mut cities = self.lock();
            cities.queries.push(city.to_string());
            let delay = cities.delays.get(&key).copied().unwrap_or_default();
            let answer = match (&cities.outage, cities.known.get(&key)) {
                (Some(error), _) => Err(error.clone()),
                (None, Some(found)) => Ok(found.clone()),
                (None, None) => Err(FetchError::NotFound {
                    resource: Resource::Weather,
                }),
            };
            (delay, answer)
        };

        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            answer
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let weather = StaticWeather::new().with_city("London", snapshot("London", 11.0));

        let found = weather.current("LONDON").await.unwrap();
        assert_eq!(found.city_name, "London");
        assert_eq!(weather.queries(), vec!["LONDON".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_city() {
        let err = StaticWeather::new().current("Atlantis").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
