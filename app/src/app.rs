//! The composed application reducer
//!
//! Owns the session, notes, shared todo list, active route/screen and the
//! weather widget. Screen data is fetched by cancellable effects grouped under
//! [`SCREEN_FETCH`]; navigating anywhere cancels the group before the next
//! screen's fetches start, and results addressed to a screen that is no longer
//! active are dropped.

use crate::auth::{Authenticator, Credentials, Rejected};
use crate::notes::{NotesAction, NotesReducer, NotesState};
use crate::router::{Route, resolve};
use crate::screen::{DashboardScreen, Loadable, LoginScreen, Screen, UserDetailScreen, WeatherWidget};
use crate::session::Session;
use crate::todos::{TodoListAction, TodoListReducer, TodoListState};
use dashboard_api::{DirectoryClient, FetchError, Post, Todo, User, UserId, WeatherClient, WeatherSnapshot};
use dashboard_core::environment::Clock;
use dashboard_core::{SmallVec, async_effect, cancellable, effect::Effect, reducer::Reducer, smallvec};
use std::marker::PhantomData;
use std::sync::Arc;

/// Cancellation group for the active screen's fetches
pub const SCREEN_FETCH: &str = "screen-fetch";

/// Cancellation group for the in-flight weather search
pub const WEATHER_FETCH: &str = "weather-fetch";

/// Everything the dashboard knows
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Who is logged in
    pub session: Session,
    /// Personal notes
    pub notes: NotesState,
    /// Shared todo list, seeded by user-detail screens
    pub todos: TodoListState,
    /// Active route
    pub route: Route,
    /// Active screen and its fetch progress
    pub screen: Screen,
    /// Weather search, kept for the whole session
    pub weather: WeatherWidget,
}

/// Inputs to the application reducer
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Submit the login form
    Login {
        /// Submitted pair
        credentials: Credentials,
    },
    /// End the session
    Logout,
    /// Go to a path, subject to the route guard
    Navigate {
        /// Requested path
        path: String,
    },
    /// Note command
    Notes(NotesAction),
    /// Todo list command
    Todos(TodoListAction),
    /// Look up current weather for a city
    SearchWeather {
        /// City as typed
        city: String,
    },

    /// Dashboard user list arrived
    UsersLoaded {
        /// Fetch outcome
        result: Result<Vec<User>, FetchError>,
    },
    /// Dashboard post list arrived
    PostsLoaded {
        /// Fetch outcome
        result: Result<Vec<Post>, FetchError>,
    },
    /// User-detail record arrived
    UserLoaded {
        /// Screen the fetch was made for
        user_id: UserId,
        /// Fetch outcome
        result: Result<User, FetchError>,
    },
    /// User-detail posts arrived
    UserPostsLoaded {
        /// Screen the fetch was made for
        user_id: UserId,
        /// Fetch outcome
        result: Result<Vec<Post>, FetchError>,
    },
    /// User-detail todos arrived
    UserTodosLoaded {
        /// Screen the fetch was made for
        user_id: UserId,
        /// Fetch outcome
        result: Result<Vec<Todo>, FetchError>,
    },
    /// Weather search finished
    WeatherLoaded {
        /// City the search was made for
        city: String,
        /// Fetch outcome
        result: Result<WeatherSnapshot, FetchError>,
    },
}

/// Injected dependencies
pub struct AppEnvironment<D, W> {
    /// Directory service client
    pub directory: Arc<D>,
    /// Weather service client
    pub weather: Arc<W>,
    /// Credential check
    pub authenticator: Arc<dyn Authenticator>,
    /// Time source for note timestamps
    pub clock: Arc<dyn Clock>,
}

impl<D, W> Clone for AppEnvironment<D, W> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            weather: Arc::clone(&self.weather),
            authenticator: Arc::clone(&self.authenticator),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// Application reducer, generic over the two remote clients
pub struct AppReducer<D, W> {
    notes: NotesReducer,
    todos: TodoListReducer,
    _clients: PhantomData<fn() -> (D, W)>,
}

impl<D, W> AppReducer<D, W> {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            notes: NotesReducer,
            todos: TodoListReducer,
            _clients: PhantomData,
        }
    }
}

impl<D, W> Default for AppReducer<D, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, W> Clone for AppReducer<D, W> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<D, W> AppReducer<D, W>
where
    D: DirectoryClient + 'static,
    W: WeatherClient + 'static,
{
    fn navigate(
        &self,
        state: &mut AppState,
        path: &str,
        env: &AppEnvironment<D, W>,
    ) -> SmallVec<[Effect<AppAction>; 4]> {
        let navigation = resolve(path, state.session.is_authenticated());
        if navigation.redirected {
            tracing::debug!(requested = path, route = %navigation.route, "Redirected");
        }
        tracing::info!(route = %navigation.route, "Navigating");

        state.route = navigation.route;
        let fetch = match navigation.route {
            Route::Login => {
                state.screen = Screen::Login(LoginScreen::default());
                None
            },
            Route::Dashboard => {
                state.screen = Screen::Dashboard(DashboardScreen::loading());
                Some(dashboard_fetch(env))
            },
            Route::UserDetail(user_id) => {
                state.screen = Screen::UserDetail(UserDetailScreen::loading(user_id));
                Some(user_detail_fetch(env, user_id))
            },
        };

        let mut effects: SmallVec<[Effect<AppAction>; 4]> = smallvec![Effect::Cancel {
            id: SCREEN_FETCH.into()
        }];
        if let Some(fetch) = fetch {
            effects.push(cancellable! {
                id: SCREEN_FETCH,
                effect: fetch
            });
        }
        effects
    }

    fn search_weather(
        state: &mut AppState,
        city: &str,
        env: &AppEnvironment<D, W>,
    ) -> SmallVec<[Effect<AppAction>; 4]> {
        let city = city.trim();
        if city.is_empty() {
            tracing::debug!("Ignoring blank weather search");
            return smallvec![Effect::None];
        }

        tracing::debug!(city, "Searching weather");
        state.weather = WeatherWidget {
            query: Some(city.to_string()),
            result: Some(Loadable::Loading),
        };

        let weather = Arc::clone(&env.weather);
        let city = city.to_string();
        let search = async_effect! {
            let result = weather.current(&city).await;
            Some(AppAction::WeatherLoaded { city, result })
        };
        smallvec![search.cancellable(WEATHER_FETCH)]
    }
}

fn dashboard_fetch<D, W>(env: &AppEnvironment<D, W>) -> Effect<AppAction>
where
    D: DirectoryClient + 'static,
{
    let directory = Arc::clone(&env.directory);
    let users = async_effect! {
        Some(AppAction::UsersLoaded { result: directory.users().await })
    };

    let directory = Arc::clone(&env.directory);
    let posts = async_effect! {
        Some(AppAction::PostsLoaded { result: directory.posts().await })
    };

    Effect::merge(vec![users, posts])
}

fn user_detail_fetch<D, W>(env: &AppEnvironment<D, W>, user_id: UserId) -> Effect<AppAction>
where
    D: DirectoryClient + 'static,
{
    let directory = Arc::clone(&env.directory);
    let user = async_effect! {
        Some(AppAction::UserLoaded { user_id, result: directory.user(user_id).await })
    };

    let directory = Arc::clone(&env.directory);
    let posts = async_effect! {
        Some(AppAction::UserPostsLoaded { user_id, result: directory.posts_for_user(user_id).await })
    };

    let directory = Arc::clone(&env.directory);
    let todos = async_effect! {
        Some(AppAction::UserTodosLoaded { user_id, result: directory.todos_for_user(user_id).await })
    };

    Effect::merge(vec![user, posts, todos])
}

/// The active user-detail screen, if it belongs to `user_id`
fn detail_for(screen: &mut Screen, user_id: UserId) -> Option<&mut UserDetailScreen> {
    match screen {
        Screen::UserDetail(detail) if detail.user_id == user_id => Some(detail),
        _ => {
            tracing::debug!(%user_id, "Discarding result for inactive user screen");
            None
        },
    }
}

fn active_dashboard(screen: &mut Screen) -> Option<&mut DashboardScreen> {
    match screen {
        Screen::Dashboard(dashboard) => Some(dashboard),
        _ => {
            tracing::debug!("Discarding dashboard result: dashboard not active");
            None
        },
    }
}

impl<D, W> Reducer for AppReducer<D, W>
where
    D: DirectoryClient + 'static,
    W: WeatherClient + 'static,
{
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<D, W>;

    fn reduce(
        &self,
        state: &mut AppState,
        action: AppAction,
        env: &AppEnvironment<D, W>,
    ) -> SmallVec<[Effect<AppAction>; 4]> {
        match action {
            AppAction::Login { credentials } => {
                let username = credentials.username.clone();
                if state.session.login(env.authenticator.as_ref(), credentials) {
                    tracing::info!(%username, "Logged in");
                    self.navigate(state, &Route::Dashboard.path(), env)
                } else {
                    tracing::info!(%username, "Login rejected");
                    if let Screen::Login(login) = &mut state.screen {
                        login.error = Some(Rejected.to_string());
                    }
                    smallvec![Effect::None]
                }
            },

            AppAction::Logout => {
                if let Some(identity) = state.session.identity() {
                    tracing::info!(username = identity.username(), "Logged out");
                }
                state.session.logout();
                state.weather = WeatherWidget::default();

                let mut effects = self.navigate(state, &Route::Login.path(), env);
                effects.push(Effect::Cancel {
                    id: WEATHER_FETCH.into(),
                });
                effects
            },

            AppAction::Navigate { path } => self.navigate(state, &path, env),

            AppAction::Notes(action) => {
                if !state.session.is_authenticated() {
                    tracing::debug!("Ignoring note command: not logged in");
                    return smallvec![Effect::None];
                }
                self.notes
                    .reduce(&mut state.notes, action, &env.clock)
                    .into_iter()
                    .map(|effect| effect.map(AppAction::Notes))
                    .collect()
            },

            AppAction::Todos(action) => {
                if !state.session.is_authenticated() {
                    tracing::debug!("Ignoring todo command: not logged in");
                    return smallvec![Effect::None];
                }
                self.todos
                    .reduce(&mut state.todos, action, &())
                    .into_iter()
                    .map(|effect| effect.map(AppAction::Todos))
                    .collect()
            },

            AppAction::SearchWeather { city } => {
                if !state.session.is_authenticated() {
                    tracing::debug!("Ignoring weather search: not logged in");
                    return smallvec![Effect::None];
                }
                Self::search_weather(state, &city, env)
            },

            AppAction::UsersLoaded { result } => {
                if let Err(error) = &result {
                    tracing::warn!(%error, "Dashboard users failed to load");
                }
                if let Some(dashboard) = active_dashboard(&mut state.screen) {
                    dashboard.users = result.into();
                }
                smallvec![Effect::None]
            },

            AppAction::PostsLoaded { result } => {
                if let Err(error) = &result {
                    tracing::warn!(%error, "Dashboard posts failed to load");
                }
                if let Some(dashboard) = active_dashboard(&mut state.screen) {
                    dashboard.posts = result.into();
                }
                smallvec![Effect::None]
            },

            AppAction::UserLoaded { user_id, result } => {
                if let Some(detail) = detail_for(&mut state.screen, user_id) {
                    detail.user = result.into();
                }
                smallvec![Effect::None]
            },

            AppAction::UserPostsLoaded { user_id, result } => {
                if let Some(detail) = detail_for(&mut state.screen, user_id) {
                    detail.posts = result.into();
                }
                smallvec![Effect::None]
            },

            AppAction::UserTodosLoaded { user_id, result } => {
                let Some(detail) = detail_for(&mut state.screen, user_id) else {
                    return smallvec![Effect::None];
                };
                detail.todos_loading = false;

                match result {
                    Ok(todos) => self
                        .todos
                        .reduce(&mut state.todos, TodoListAction::ReplaceAll(todos), &())
                        .into_iter()
                        .map(|effect| effect.map(AppAction::Todos))
                        .collect(),
                    Err(error) => {
                        tracing::warn!(%user_id, %error, "User todos failed to load");
                        detail.todos_error = Some(error);
                        smallvec![Effect::None]
                    },
                }
            },

            AppAction::WeatherLoaded { city, result } => {
                if state.weather.query.as_deref() == Some(city.as_str()) {
                    if let Err(error) = &result {
                        tracing::warn!(%city, %error, "Weather lookup failed");
                    }
                    state.weather.result = Some(result.into());
                } else {
                    tracing::debug!(%city, "Discarding weather for superseded search");
                }
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Identity, StaticAuthenticator};
    use crate::notes::Priority;
    use dashboard_api::{Resource, TodoId};
    use dashboard_testing::fixtures::{self, FIXTURE_PASSWORD, FIXTURE_USERNAME};
    use dashboard_testing::{ReducerTest, StaticDirectory, StaticWeather, assertions, test_clock};

    type TestReducer = AppReducer<StaticDirectory, StaticWeather>;

    fn env() -> AppEnvironment<StaticDirectory, StaticWeather> {
        AppEnvironment {
            directory: Arc::new(StaticDirectory::new(
                fixtures::users(),
                fixtures::posts(),
                fixtures::todos(),
            )),
            weather: Arc::new(StaticWeather::new()),
            authenticator: Arc::new(StaticAuthenticator::new(FIXTURE_USERNAME, FIXTURE_PASSWORD)),
            clock: Arc::new(test_clock()),
        }
    }

    fn logged_in() -> AppState {
        AppState {
            session: Session::Authenticated(Identity::new(FIXTURE_USERNAME)),
            route: Route::Dashboard,
            screen: Screen::Dashboard(DashboardScreen::loading()),
            ..AppState::default()
        }
    }

    fn on_user(user_id: u64) -> AppState {
        AppState {
            route: Route::UserDetail(UserId(user_id)),
            screen: Screen::UserDetail(UserDetailScreen::loading(UserId(user_id))),
            ..logged_in()
        }
    }

    #[test]
    fn test_login_success_opens_dashboard() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AppState::default())
            .when_action(AppAction::Login {
                credentials: Credentials::new(FIXTURE_USERNAME, FIXTURE_PASSWORD),
            })
            .then_state(|state| {
                assert!(state.session.is_authenticated());
                assert_eq!(state.route, Route::Dashboard);
                assert!(state.screen.dashboard().is_some());
            })
            .then_effects(|effects| {
                assertions::assert_cancels(effects, SCREEN_FETCH);
                assertions::assert_has_cancellable(effects, SCREEN_FETCH);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_login_failure_shows_error() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AppState::default())
            .when_action(AppAction::Login {
                credentials: Credentials::new(FIXTURE_USERNAME, "wrong"),
            })
            .then_state(|state| {
                assert_eq!(state.session, Session::Anonymous);
                assert_eq!(state.route, Route::Login);
                assert_eq!(
                    state.screen.login().and_then(|l| l.error.as_deref()),
                    Some("Invalid username or password")
                );
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_anonymous_navigation_is_redirected_to_login() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AppState::default())
            .when_action(AppAction::Navigate {
                path: "/users/1".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.route, Route::Login);
                assert!(state.screen.login().is_some());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_cancels(effects, SCREEN_FETCH);
            })
            .run();
    }

    #[test]
    fn test_user_detail_navigation_starts_three_fetches() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(logged_in())
            .when_action(AppAction::Navigate {
                path: "/users/2".to_string(),
            })
            .then_state(|state| {
                let detail = state.screen.user_detail();
                assert_eq!(detail.map(|d| d.user_id), Some(UserId(2)));
                assert!(detail.is_some_and(|d| d.user.is_loading() && d.todos_loading));
            })
            .then_effects(|effects| {
                let fetches = effects.iter().find_map(|e| match e {
                    Effect::Cancellable { effect, .. } => match effect.as_ref() {
                        Effect::Parallel(inner) => Some(inner.len()),
                        _ => None,
                    },
                    _ => None,
                });
                assert_eq!(fetches, Some(3));
            })
            .run();
    }

    #[test]
    fn test_todos_for_inactive_user_are_discarded() {
        let mut state = on_user(2);
        state.todos.replace_all(vec![fixtures::todo(21, 2, "mine", false)]);

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(AppAction::UserTodosLoaded {
                user_id: UserId(1),
                result: Ok(vec![fixtures::todo(1, 1, "stale", true)]),
            })
            .then_state(|state| {
                assert_eq!(state.todos.len(), 1);
                assert_eq!(state.todos.todos()[0].id, TodoId(21));
                assert!(state.screen.user_detail().is_some_and(|d| d.todos_loading));
            })
            .run();
    }

    #[test]
    fn test_todos_for_active_user_replace_list() {
        let mut state = on_user(3);
        state.todos.replace_all(fixtures::todos());

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(AppAction::UserTodosLoaded {
                user_id: UserId(3),
                result: Ok(vec![fixtures::todo(41, 3, "aliquid", false)]),
            })
            .then_state(|state| {
                assert_eq!(state.todos.len(), 1);
                assert!(state.screen.user_detail().is_some_and(|d| !d.todos_loading));
            })
            .run();
    }

    #[test]
    fn test_todo_fetch_failure_keeps_list() {
        let mut state = on_user(3);
        state.todos.replace_all(fixtures::todos());

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(AppAction::UserTodosLoaded {
                user_id: UserId(3),
                result: Err(FetchError::Status {
                    resource: Resource::Todos,
                    status: 500,
                }),
            })
            .then_state(|state| {
                assert_eq!(state.todos.len(), 10);
                let detail = state.screen.user_detail();
                assert!(detail.is_some_and(|d| !d.todos_loading && d.todos_error.is_some()));
            })
            .run();
    }

    #[test]
    fn test_dashboard_results_after_leaving_are_discarded() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(on_user(1))
            .when_action(AppAction::UsersLoaded {
                result: Ok(fixtures::users()),
            })
            .then_state(|state| {
                assert!(state.screen.dashboard().is_none());
            })
            .run();
    }

    #[test]
    fn test_blank_weather_search_is_ignored() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(logged_in())
            .when_action(AppAction::SearchWeather {
                city: "   ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.weather, WeatherWidget::default());
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_weather_search_is_cancellable() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(logged_in())
            .when_action(AppAction::SearchWeather {
                city: " Paris ".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.weather.query.as_deref(), Some("Paris"));
                assert_eq!(state.weather.result, Some(Loadable::Loading));
            })
            .then_effects(|effects| {
                assertions::assert_has_cancellable(effects, WEATHER_FETCH);
            })
            .run();
    }

    #[test]
    fn test_weather_for_superseded_city_is_discarded() {
        let mut state = logged_in();
        state.weather = WeatherWidget {
            query: Some("Oslo".to_string()),
            result: Some(Loadable::Loading),
        };

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(AppAction::WeatherLoaded {
                city: "Paris".to_string(),
                result: Err(FetchError::NotFound {
                    resource: Resource::Weather,
                }),
            })
            .then_state(|state| {
                assert_eq!(state.weather.result, Some(Loadable::Loading));
            })
            .run();
    }

    #[test]
    fn test_note_commands_require_login() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(AppState::default())
            .when_action(AppAction::Notes(NotesAction::Add {
                text: "sneaky".to_string(),
                priority: Priority::Important,
            }))
            .then_state(|state| {
                assert!(state.notes.is_empty());
            })
            .run();
    }

    #[test]
    fn test_logout_cancels_everything_and_returns_to_login() {
        let mut state = on_user(1);
        state.weather.query = Some("Rome".to_string());

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(AppAction::Logout)
            .then_state(|state| {
                assert_eq!(state.session, Session::Anonymous);
                assert_eq!(state.route, Route::Login);
                assert_eq!(state.weather, WeatherWidget::default());
            })
            .then_effects(|effects| {
                assertions::assert_cancels(effects, SCREEN_FETCH);
                assertions::assert_cancels(effects, WEATHER_FETCH);
            })
            .run();
    }
}
