//! Per-screen state and fetch progress

use crate::analytics::AnalyticsSummary;
use dashboard_api::{FetchError, Post, Todo, User, UserId, WeatherSnapshot};

/// Progress of one fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    /// Request in flight
    Loading,
    /// Request succeeded
    Loaded(T),
    /// Request failed
    Failed(FetchError),
}

impl<T> Loadable<T> {
    /// Whether the request is still in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded value, if any
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    /// The failure, if any
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Loading | Self::Loaded(_) => None,
        }
    }
}

impl<T> From<Result<T, FetchError>> for Loadable<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(error) => Self::Failed(error),
        }
    }
}

/// `/login`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginScreen {
    /// Message from the last rejected attempt
    pub error: Option<String>,
}

/// `/dashboard`
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardScreen {
    /// Every user in the directory
    pub users: Loadable<Vec<User>>,
    /// Every post in the directory
    pub posts: Loadable<Vec<Post>>,
}

impl DashboardScreen {
    /// Both fetches in flight
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            users: Loadable::Loading,
            posts: Loadable::Loading,
        }
    }

    /// Analytics over the fetched users and posts and the resident `todos`
    ///
    /// Loading until both fetches finish; failed if either failed. A loaded
    /// but empty user list yields `Loaded(None)`.
    #[must_use]
    pub fn analytics(&self, todos: &[Todo]) -> Loadable<Option<AnalyticsSummary>> {
        match (&self.users, &self.posts) {
            (Loadable::Failed(error), _) | (_, Loadable::Failed(error)) => {
                Loadable::Failed(error.clone())
            },
            (Loadable::Loaded(users), Loadable::Loaded(posts)) => {
                Loadable::Loaded(AnalyticsSummary::compute(users, posts, todos))
            },
            _ => Loadable::Loading,
        }
    }
}

/// `/users/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct UserDetailScreen {
    /// Whose screen this is
    pub user_id: UserId,
    /// The user's record
    pub user: Loadable<User>,
    /// The user's posts
    pub posts: Loadable<Vec<Post>>,
    /// Whether the user's todos are still being fetched into the shared list
    pub todos_loading: bool,
    /// Why the todo fetch failed, if it did
    pub todos_error: Option<FetchError>,
}

impl UserDetailScreen {
    /// All fetches for `user_id` in flight
    #[must_use]
    pub const fn loading(user_id: UserId) -> Self {
        Self {
            user_id,
            user: Loadable::Loading,
            posts: Loadable::Loading,
            todos_loading: true,
            todos_error: None,
        }
    }
}

/// The active screen
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Login form
    Login(LoginScreen),
    /// Users, analytics, notes and weather
    Dashboard(DashboardScreen),
    /// One user's record, posts and todos
    UserDetail(UserDetailScreen),
}

impl Default for Screen {
    fn default() -> Self {
        Self::Login(LoginScreen::default())
    }
}

impl Screen {
    /// The login screen, if active
    #[must_use]
    pub const fn login(&self) -> Option<&LoginScreen> {
        match self {
            Self::Login(screen) => Some(screen),
            _ => None,
        }
    }

    /// The dashboard screen, if active
    #[must_use]
    pub const fn dashboard(&self) -> Option<&DashboardScreen> {
        match self {
            Self::Dashboard(screen) => Some(screen),
            _ => None,
        }
    }

    /// The user-detail screen, if active
    #[must_use]
    pub const fn user_detail(&self) -> Option<&UserDetailScreen> {
        match self {
            Self::UserDetail(screen) => Some(screen),
            _ => None,
        }
    }
}

/// Weather search box and its latest result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherWidget {
    /// The city last searched for, trimmed
    pub query: Option<String>,
    /// Progress of that search
    pub result: Option<Loadable<WeatherSnapshot>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_api::Resource;
    use dashboard_testing::fixtures;

    #[test]
    fn test_analytics_waits_for_both_fetches() {
        let mut screen = DashboardScreen::loading();
        screen.users = Loadable::Loaded(fixtures::users());

        assert!(screen.analytics(&[]).is_loading());

        screen.posts = Loadable::Loaded(fixtures::posts());
        let analytics = screen.analytics(&fixtures::todos());
        assert_eq!(
            analytics.loaded().and_then(Option::as_ref).map(|s| s.total_users),
            Some(4)
        );
    }

    #[test]
    fn test_analytics_fails_if_either_fetch_failed() {
        let mut screen = DashboardScreen::loading();
        screen.posts = Loadable::Failed(FetchError::Status {
            resource: Resource::Posts,
            status: 502,
        });

        assert_eq!(
            screen.analytics(&[]).error().map(FetchError::resource),
            Some(Resource::Posts)
        );
    }

    #[test]
    fn test_empty_directory_has_no_summary() {
        let screen = DashboardScreen {
            users: Loadable::Loaded(Vec::new()),
            posts: Loadable::Loaded(Vec::new()),
        };

        assert_eq!(screen.analytics(&[]), Loadable::Loaded(None));
    }
}
