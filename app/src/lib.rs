//! # Dashboard
//!
//! A terminal dashboard over a user directory and a weather service.
//!
//! ## Screens
//!
//! - `/login`: credential form, the only screen an anonymous session sees
//! - `/dashboard`: users, analytics, personal notes and a weather search
//! - `/users/{id}`: one user's record, posts and toggleable todos
//!
//! ## Architecture
//!
//! All state lives in [`AppState`] and changes only through [`AppReducer`].
//! Remote fetches are [`Effect`](dashboard_core::effect::Effect) descriptions
//! executed by the [`Store`](dashboard_runtime::Store); their results come
//! back as actions. Screen fetches are cancelled when the screen is left.
//!
//! ```ignore
//! use dashboard::{AppAction, AppEnvironment, AppReducer, AppState, DashboardStore};
//!
//! let store: DashboardStore<_, _> =
//!     Store::new(AppState::default(), AppReducer::new(), environment);
//!
//! let mut handle = store.send(AppAction::Navigate { path: "/dashboard".into() }).await?;
//! handle.wait().await;
//! println!("{}", store.state(dashboard::view::render).await);
//! ```

pub mod analytics;
pub mod app;
pub mod auth;
pub mod command;
pub mod config;
pub mod notes;
pub mod router;
pub mod screen;
pub mod session;
pub mod todos;
pub mod view;

pub use app::{AppAction, AppEnvironment, AppReducer, AppState, SCREEN_FETCH, WEATHER_FETCH};
pub use auth::{Authenticator, Credentials, Identity, Rejected, StaticAuthenticator};
pub use command::{Command, CommandError};
pub use config::{ConfigError, DashboardConfig, Environment};
pub use notes::{Note, NoteId, NotesAction, Priority};
pub use router::{Navigation, Route};
pub use session::Session;

/// A store running the dashboard reducer
pub type DashboardStore<D, W> =
    dashboard_runtime::Store<AppState, AppAction, AppEnvironment<D, W>, AppReducer<D, W>>;
