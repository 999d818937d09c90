//! # Dashboard API Clients
//!
//! Read-only clients for the two remote services the dashboard talks to:
//!
//! - the **directory service**, serving users, posts and todos
//! - the **weather service**, serving current conditions for a named city
//!
//! Both are exposed as traits ([`DirectoryClient`], [`WeatherClient`]) so
//! reducers can be driven by in-memory implementations in tests, with
//! `reqwest`-backed production implementations alongside.
//!
//! ## Example
//!
//! ```no_run
//! use dashboard_api::{DirectoryClient, HttpDirectoryClient};
//!
//! # async fn example() -> Result<(), dashboard_api::FetchError> {
//! let directory = HttpDirectoryClient::new("https://jsonplaceholder.typicode.com");
//! let users = directory.users().await?;
//! println!("{} users", users.len());
//! # Ok(())
//! # }
//! ```
//!
//! Every failure is a [`FetchError`] tagged with the [`Resource`] that was
//! being fetched, so callers branch on variants rather than message text.

pub mod directory;
pub mod error;
mod http;
pub mod types;
pub mod weather;

// Re-export main types for convenience
pub use directory::{DirectoryClient, HttpDirectoryClient};
pub use error::{FetchError, Resource};
pub use http::build_http_client;
pub use types::{Address, Company, Geo, Post, PostId, Todo, TodoId, User, UserId, WeatherSnapshot};
pub use weather::{OpenWeatherClient, WeatherClient};
