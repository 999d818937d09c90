//! Record types served by the directory and weather services

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Directory-assigned user identifier
    UserId
);
numeric_id!(
    /// Directory-assigned post identifier
    PostId
);
numeric_id!(
    /// Directory-assigned todo identifier
    TodoId
);

/// Geographic coordinates, kept as the strings the service sends
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Geo {
    /// Latitude
    pub lat: String,
    /// Longitude
    pub lng: String,
}

/// Postal address of a user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    /// Street name
    pub street: String,
    /// Suite or apartment
    pub suite: String,
    /// City
    pub city: String,
    /// Postal code
    pub zipcode: String,
    /// Coordinates
    pub geo: Geo,
}

/// Employer of a user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Company name
    pub name: String,
    /// Slogan
    pub catch_phrase: String,
    /// Business description
    pub bs: String,
}

/// A directory user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier
    pub id: UserId,
    /// Full name
    pub name: String,
    /// Handle shown in analytics, e.g. "Bret"
    pub username: String,
    /// Contact email
    pub email: String,
    /// Postal address
    #[serde(default)]
    pub address: Address,
    /// Phone number, free-form
    #[serde(default)]
    pub phone: String,
    /// Website host
    #[serde(default)]
    pub website: String,
    /// Employer
    #[serde(default)]
    pub company: Company,
}

/// A post, foreign-keyed to its author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Identifier
    pub id: PostId,
    /// Author
    pub user_id: UserId,
    /// Headline
    pub title: String,
    /// Text body
    pub body: String,
}

/// A todo item, foreign-keyed to its owner
///
/// `completed` is only ever changed locally once fetched; nothing is written
/// back to the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Identifier
    pub id: TodoId,
    /// Owner
    pub user_id: UserId,
    /// Description
    pub title: String,
    /// Completion flag
    pub completed: bool,
}

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// City name as reported by the service
    pub city_name: String,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Human-readable condition, e.g. "light rain"
    pub condition_description: String,
    /// Icon code, e.g. "10d"
    pub icon: String,
}

impl WeatherSnapshot {
    /// URL of the condition icon image
    #[must_use]
    pub fn icon_url(&self) -> Option<String> {
        if self.icon.is_empty() {
            return None;
        }
        Some(format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon))
    }
}

/// Wire shape of the weather service's current-conditions response
#[derive(Debug, Deserialize)]
pub(crate) struct WeatherResponse {
    name: String,
    main: WeatherMain,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
    icon: String,
}

impl From<WeatherResponse> for WeatherSnapshot {
    fn from(response: WeatherResponse) -> Self {
        let (condition_description, icon) = response
            .weather
            .into_iter()
            .next()
            .map(|c| (c.description, c.icon))
            .unwrap_or_default();

        Self {
            city_name: response.name,
            temperature: response.main.temp,
            humidity: response.main.humidity,
            condition_description,
            icon,
        }
    }
}
