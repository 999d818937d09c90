//! Path parsing and the authentication guard

use dashboard_api::UserId;
use std::fmt;

/// A screen the dashboard can show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login`
    #[default]
    Login,
    /// `/dashboard`
    Dashboard,
    /// `/users/{id}`
    UserDetail(UserId),
}

impl Route {
    /// Parse a path; `None` for anything that is not a known route
    ///
    /// A single trailing slash is accepted. User ids must be plain decimal.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.strip_suffix('/').unwrap_or(path);

        match path {
            "/login" => Some(Self::Login),
            "/dashboard" => Some(Self::Dashboard),
            _ => {
                let id = path.strip_prefix("/users/")?;
                if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                id.parse().ok().map(|id| Self::UserDetail(UserId(id)))
            },
        }
    }

    /// Canonical path
    #[must_use]
    pub fn path(&self) -> String {
        self.to_string()
    }

    /// Whether only authenticated sessions may see this route
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("/login"),
            Self::Dashboard => f.write_str("/dashboard"),
            Self::UserDetail(id) => write!(f, "/users/{id}"),
        }
    }
}

/// Outcome of resolving a requested path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    /// Where the session actually lands
    pub route: Route,
    /// Whether that differs from what was asked for
    pub redirected: bool,
}

/// Apply the guard rules to a requested path
///
/// Anonymous sessions only ever reach `/login`. Authenticated sessions asking
/// for `/login` or an unknown path land on `/dashboard`.
#[must_use]
pub fn resolve(path: &str, authenticated: bool) -> Navigation {
    let requested = Route::parse(path);

    let route = match (requested, authenticated) {
        (Some(route), true) if route.requires_auth() => route,
        (_, true) => Route::Dashboard,
        (_, false) => Route::Login,
    };

    Navigation {
        route,
        redirected: requested != Some(route),
    }
}
